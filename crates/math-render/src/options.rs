use crate::bracket::Bracket;
use crate::charset::CharSet;
use crate::precedence;

/// How a non-integer number is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DecimalMode {
    /// Always render as a decimal, even if that can only approximate the
    /// value.
    ForceDecimal,
    /// Always render as a fraction. Never loses precision, but the fraction
    /// may become very big.
    ForceFraction,
    /// Render as a decimal if the value has a finite decimal expansion that
    /// fits the precision budget, otherwise as a fraction.
    DecimalIfPossible,
    /// Choose automatically, based on the precision of the input and the
    /// size of the fraction.
    Smart,
}

/// How many and how big spaces to insert between rendered parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SpaceMode {
    /// Omit spaces where possible.
    Compact,
    /// Omit spaces around visually small operands, add them where the output
    /// is bigger.
    Auto,
    /// Always pad operators with spaces.
    Force,
}

/// An immutable configuration bundle threaded through every render call.
///
/// The same option may have a different impact in different render modes,
/// and some options are ignored by some modes completely. Every setter
/// returns a new value; an options value is never mutated.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum number of fractional digits of an approximated decimal.
    pub precision: u32,
    /// How non-integer numbers are displayed.
    pub decimal_mode: DecimalMode,
    /// Whether very big or very small numbers switch to scientific notation.
    pub scientific: bool,
    /// Fractions whose operands are single tokens narrower than this render
    /// inline (`a/b`) instead of stacked. Art rendering only.
    pub small_fraction_limit: usize,
    /// The bracket style used for matrices and vectors when not specified
    /// explicitly.
    pub matrix_brackets: Bracket,
    /// The allowed output repertoire. Unsupported glyphs fall back to ASCII
    /// approximations. Art and inline rendering only.
    pub charset: CharSet,
    /// Whether to automatically insert the parentheses required to keep the
    /// semantic meaning of the tree, e.g. `a·(b+c)` rather than `a·b+c`.
    pub auto_parenthesis: bool,
    /// The precedence of the operator context enclosing the expression
    /// currently being rendered.
    pub outside_precedence: i32,
    /// How spaces are inserted.
    pub space_mode: SpaceMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            precision: 40,
            decimal_mode: DecimalMode::Smart,
            scientific: true,
            small_fraction_limit: 4,
            matrix_brackets: Bracket::Square,
            charset: CharSet::unicode(),
            auto_parenthesis: true,
            outside_precedence: precedence::MIN,
            space_mode: SpaceMode::Auto,
        }
    }
}

impl RenderOptions {
    /// # Panics
    /// Panics if `precision` is zero.
    pub fn with_precision(&self, precision: u32) -> Self {
        assert!(precision >= 1, "precision must be at least 1");
        RenderOptions {
            precision,
            ..self.clone()
        }
    }

    pub fn with_decimal_mode(&self, decimal_mode: DecimalMode) -> Self {
        RenderOptions {
            decimal_mode,
            ..self.clone()
        }
    }

    pub fn with_scientific(&self, scientific: bool) -> Self {
        RenderOptions {
            scientific,
            ..self.clone()
        }
    }

    pub fn with_small_fraction_limit(&self, small_fraction_limit: usize) -> Self {
        RenderOptions {
            small_fraction_limit,
            ..self.clone()
        }
    }

    pub fn with_matrix_brackets(&self, matrix_brackets: Bracket) -> Self {
        RenderOptions {
            matrix_brackets,
            ..self.clone()
        }
    }

    pub fn with_charset(&self, charset: CharSet) -> Self {
        RenderOptions {
            charset,
            ..self.clone()
        }
    }

    pub fn with_auto_parenthesis(&self, auto_parenthesis: bool) -> Self {
        RenderOptions {
            auto_parenthesis,
            ..self.clone()
        }
    }

    pub fn with_outside_precedence(&self, outside_precedence: i32) -> Self {
        RenderOptions {
            outside_precedence,
            ..self.clone()
        }
    }

    pub fn with_space_mode(&self, space_mode: SpaceMode) -> Self {
        RenderOptions {
            space_mode,
            ..self.clone()
        }
    }

    /// Shorthand used on every recursive render call.
    pub(crate) fn outside(&self, outside_precedence: i32) -> Self {
        self.with_outside_precedence(outside_precedence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_return_new_values() {
        let base = RenderOptions::default();
        let changed = base.with_precision(5).with_scientific(false);
        assert_eq!(base.precision, 40);
        assert!(base.scientific);
        assert_eq!(changed.precision, 5);
        assert!(!changed.scientific);
    }

    #[test]
    #[should_panic(expected = "precision must be at least 1")]
    fn zero_precision_is_rejected() {
        let _ = RenderOptions::default().with_precision(0);
    }
}
