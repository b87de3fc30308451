use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};
use text_canvas::TextCanvas;

use crate::bracket::Bracket;
use crate::error::ExprError;
use crate::mathml::{MathDisplay, MathMlNode};
use crate::options::{RenderOptions, SpaceMode};
use crate::symbol::{self, SymbolForms};
use crate::{art, inline, latex, mathml, mathml_render, number, precedence};

/// An immutable, acyclic expression tree node.
///
/// The variant set is closed: every node is one of the catalog variants
/// below, owns its children by value, and exposes nothing but the render
/// contract — no evaluation, no simplification. Nodes are built bottom-up
/// through the builder functions of this module and never mutated
/// afterwards, so a tree may be rendered concurrently with any number of
/// option sets.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expr {
    /// A named identifier (`operator: false`) or operator symbol
    /// (`operator: true`), rendered verbatim on every surface.
    Literal { operator: bool, value: String },
    /// A number rendered exactly as the given text.
    NumberLiteral(String),
    /// An exact number, formatted according to the render options. The
    /// `precise` flag records whether the value came from an exact source
    /// (integer, fraction) or an inexact floating one.
    Rational { value: BigRational, precise: bool },
    /// A special symbol with one form per output surface.
    Glyph(Box<SymbolForms>),
    /// A binary operation written between its operands. Non-associative
    /// operations parenthesize their right operand at equal precedence.
    Infix {
        symbol: Box<Expr>,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        precedence: i32,
        associative: bool,
    },
    Prefix {
        symbol: Box<Expr>,
        value: Box<Expr>,
        precedence: i32,
    },
    Postfix {
        symbol: Box<Expr>,
        value: Box<Expr>,
        precedence: i32,
    },
    /// Arithmetic negation; binds tighter than addition but looser than
    /// multiplication.
    Negate(Box<Expr>),
    Fraction {
        num: Box<Expr>,
        denom: Box<Expr>,
    },
    /// A radical; the degree may be the empty number literal for a plain
    /// square root.
    Root {
        degree: Box<Expr>,
        radicand: Box<Expr>,
    },
    Superscript {
        base: Box<Expr>,
        script: Box<Expr>,
    },
    Subscript {
        base: Box<Expr>,
        script: Box<Expr>,
    },
    SuperSubscript {
        base: Box<Expr>,
        sup: Box<Expr>,
        sub: Box<Expr>,
    },
    /// A big operator (sum, product, limit) with optional bounds drawn
    /// below and above the symbol.
    BigSymbol {
        symbol: Box<Expr>,
        sub: Option<Box<Expr>>,
        sup: Option<Box<Expr>>,
        body: Box<Expr>,
    },
    Integral {
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
        body: Box<Expr>,
    },
    /// A rectangular grid of cells; all rows have the same length.
    Grid(Vec<Vec<Expr>>),
    /// Two grids with the same row count, separated by a full-height
    /// vertical bar.
    AugmentedGrid {
        left: Vec<Vec<Expr>>,
        right: Vec<Vec<Expr>>,
    },
    Brackets {
        kind: Bracket,
        inner: Box<Expr>,
    },
    /// A one-sided bracket.
    BracketLiteral {
        kind: Bracket,
        left: bool,
        inner: Box<Expr>,
    },
    /// Brackets whose style is taken from the render options at render
    /// time.
    MatrixBrackets(Box<Expr>),
    /// The set-builder bar between an element pattern and a predicate.
    Middle {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Delimiter-separated values.
    List {
        delimiter: Box<Expr>,
        elements: Vec<Expr>,
    },
    /// Two expressions side by side; `implicit_space` marks implicit
    /// multiplication or function application, which may insert a space
    /// depending on the space mode.
    Concatenation {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        implicit_space: bool,
    },
    /// Free text.
    Text(String),
    /// The exponential function: `exp(x)` inline, `e^x` elsewhere.
    Exp(Box<Expr>),
}

impl Expr {
    /// The binding strength used for automatic parenthesization. Leaf nodes
    /// report the maximum so they are never parenthesized.
    pub fn precedence(&self) -> i32 {
        match self {
            Expr::Literal { .. } | Expr::Glyph(_) | Expr::Text(_) => precedence::MAX,
            Expr::NumberLiteral(value) => {
                if value.starts_with('-') {
                    precedence::NEGATE
                } else {
                    precedence::MAX
                }
            }
            Expr::Rational { value, .. } => {
                if value.is_negative() {
                    precedence::NEGATE
                } else {
                    precedence::MAX
                }
            }
            Expr::Infix { precedence, .. }
            | Expr::Prefix { precedence, .. }
            | Expr::Postfix { precedence, .. } => *precedence,
            Expr::Negate(_) => precedence::NEGATE,
            Expr::Fraction { .. } => precedence::FRACTION,
            Expr::Root { .. } => precedence::ROOT,
            Expr::Superscript { .. } => precedence::SUPERSCRIPT,
            Expr::Subscript { .. } => precedence::SUBSCRIPT,
            Expr::SuperSubscript { .. } => precedence::SUPERSCRIPT.min(precedence::SUBSCRIPT),
            Expr::BigSymbol { .. } | Expr::Integral { .. } => precedence::ITERATION,
            Expr::Grid(rows) => {
                if rows.len() == 1 && rows[0].len() == 1 {
                    rows[0][0].precedence()
                } else {
                    precedence::GRID
                }
            }
            Expr::AugmentedGrid { .. } | Expr::Middle { .. } => precedence::MID,
            Expr::Brackets { .. } | Expr::MatrixBrackets(_) => precedence::BRACKETS,
            Expr::BracketLiteral { .. } => precedence::SINGLE_BRACKET,
            Expr::List { elements, .. } => match elements.as_slice() {
                [] => precedence::MAX,
                [only] => only.precedence(),
                _ => precedence::COMMA,
            },
            Expr::Concatenation {
                lhs,
                rhs,
                implicit_space,
            } => {
                if *implicit_space {
                    precedence::IMPLICIT
                } else {
                    lhs.precedence().min(rhs.precedence())
                }
            }
            Expr::Exp(_) => precedence::FUNCTION_CALL.min(precedence::POWER),
        }
    }

    /// The single place where parenthesization is decided: when the
    /// enclosing context binds tighter than this node, the node is rendered
    /// inside round brackets instead.
    fn parenthesize(&self, options: &RenderOptions) -> bool {
        options.auto_parenthesis && options.outside_precedence > self.precedence()
    }

    /// Renders as a single-line string approximation.
    pub fn render_inline(&self, options: &RenderOptions) -> String {
        if self.parenthesize(options) {
            inline::brackets(Bracket::Round, self, options)
        } else {
            inline::render(self, options)
        }
    }

    /// Renders as multi-line typeset art on a [`TextCanvas`].
    pub fn render_art(&self, options: &RenderOptions) -> TextCanvas {
        if self.parenthesize(options) {
            art::brackets(Bracket::Round, self, options)
        } else {
            art::render(self, options)
        }
    }

    /// Renders as LaTeX source.
    pub fn render_latex(&self, options: &RenderOptions) -> String {
        if self.parenthesize(options) {
            latex::brackets(Bracket::Round, self, options)
        } else {
            latex::render(self, options)
        }
    }

    /// Renders as a MathML markup node.
    pub fn render_mathml(&self, options: &RenderOptions) -> MathMlNode {
        if self.parenthesize(options) {
            mathml_render::brackets(Bracket::Round, self, options)
        } else {
            mathml_render::render(self, options)
        }
    }

    /// Renders as MathML embedded in a root `<math>` element with the
    /// display attributes for the requested layout.
    pub fn render_mathml_doc(&self, options: &RenderOptions, display: MathDisplay) -> MathMlNode {
        mathml::math_root(self.render_mathml(options), display)
    }
}

/// The plain-text debug form: the tree printed as the builder calls that
/// would construct it, e.g. `frac(+(a, 2), b)`.
impl std::fmt::Debug for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn comma_joined(f: &mut std::fmt::Formatter<'_>, items: &[Expr]) -> std::fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item:?}")?;
            }
            Ok(())
        }

        fn rows(f: &mut std::fmt::Formatter<'_>, rows: &[Vec<Expr>]) -> std::fmt::Result {
            f.write_str("[")?;
            for (i, r) in rows.iter().enumerate() {
                if i != 0 {
                    f.write_str(", ")?;
                }
                f.write_str("[")?;
                comma_joined(f, r)?;
                f.write_str("]")?;
            }
            f.write_str("]")
        }

        fn opt(f: &mut std::fmt::Formatter<'_>, value: Option<&Expr>) -> std::fmt::Result {
            match value {
                Some(value) => write!(f, "{value:?}"),
                None => f.write_str("_"),
            }
        }

        match self {
            Expr::Literal { value, .. } | Expr::NumberLiteral(value) => f.write_str(value),
            Expr::Rational { value, .. } => {
                if value.denom().is_one() {
                    write!(f, "{}", value.numer())
                } else {
                    write!(f, "{}/{}", value.numer(), value.denom())
                }
            }
            Expr::Glyph(forms) => f.write_str(forms.inline.trim()),
            Expr::Infix {
                symbol, lhs, rhs, ..
            } => write!(f, "{symbol:?}({lhs:?}, {rhs:?})"),
            Expr::Prefix { symbol, value, .. } => write!(f, "prefix({symbol:?}, {value:?})"),
            Expr::Postfix { symbol, value, .. } => write!(f, "postfix({symbol:?}, {value:?})"),
            Expr::Negate(value) => write!(f, "neg({value:?})"),
            Expr::Fraction { num, denom } => write!(f, "frac({num:?}, {denom:?})"),
            Expr::Root { degree, radicand } => write!(f, "root({degree:?}, {radicand:?})"),
            Expr::Superscript { base, script } => write!(f, "sup({base:?}, {script:?})"),
            Expr::Subscript { base, script } => write!(f, "sub({base:?}, {script:?})"),
            Expr::SuperSubscript { base, sup, sub } => {
                write!(f, "supsub({base:?}, {sup:?}, {sub:?})")
            }
            Expr::BigSymbol {
                symbol,
                sub,
                sup,
                body,
            } => {
                write!(f, "big({symbol:?}, ")?;
                opt(f, sub.as_deref())?;
                f.write_str(", ")?;
                opt(f, sup.as_deref())?;
                write!(f, ", {body:?})")
            }
            Expr::Integral { lower, upper, body } => {
                f.write_str("int(")?;
                opt(f, lower.as_deref())?;
                f.write_str(", ")?;
                opt(f, upper.as_deref())?;
                write!(f, ", {body:?})")
            }
            Expr::Grid(grid_rows) => {
                f.write_str("grid(")?;
                rows(f, grid_rows)?;
                f.write_str(")")
            }
            Expr::AugmentedGrid { left, right } => {
                f.write_str("augmented(")?;
                rows(f, left)?;
                f.write_str(", ")?;
                rows(f, right)?;
                f.write_str(")")
            }
            Expr::Brackets { kind, inner } => write!(f, "brackets({kind:?}, {inner:?})"),
            Expr::BracketLiteral { kind, left, inner } => {
                let side = if *left { "left" } else { "right" };
                write!(f, "{side}({kind:?}, {inner:?})")
            }
            Expr::MatrixBrackets(inner) => write!(f, "matrix_brackets({inner:?})"),
            Expr::Middle { lhs, rhs } => write!(f, "mid({lhs:?}, {rhs:?})"),
            Expr::List {
                delimiter,
                elements,
            } => {
                write!(f, "list({delimiter:?}, [")?;
                comma_joined(f, elements)?;
                f.write_str("])")
            }
            Expr::Concatenation {
                lhs,
                rhs,
                implicit_space,
            } => {
                let kind = if *implicit_space { "implicit" } else { "concat" };
                write!(f, "{kind}({lhs:?}, {rhs:?})")
            }
            Expr::Text(text) => write!(f, "text({text})"),
            Expr::Exp(value) => write!(f, "exp({value:?})"),
        }
    }
}

pub(crate) fn is_sup_node(e: &Expr) -> bool {
    matches!(e, Expr::Superscript { .. } | Expr::SuperSubscript { .. })
}

pub(crate) fn is_sub_node(e: &Expr) -> bool {
    matches!(e, Expr::Subscript { .. } | Expr::SuperSubscript { .. })
}

/// Node kinds that never get a space next to them in implicit
/// concatenations (their own shape already separates them visually).
fn no_space_kind(e: &Expr) -> bool {
    matches!(
        e,
        Expr::Brackets { .. } | Expr::BracketLiteral { .. } | Expr::Fraction { .. } | Expr::Grid(_)
    )
}

/// Whether an (implicit) concatenation renders a space between its parts.
pub(crate) fn concat_space(
    lhs: &Expr,
    rhs: &Expr,
    maybe_space: bool,
    options: &RenderOptions,
) -> bool {
    if !maybe_space {
        return false;
    }
    if options.space_mode == SpaceMode::Force {
        return true;
    }
    if no_space_kind(lhs) || no_space_kind(rhs) {
        return false;
    }
    let (Expr::NumberLiteral(a), Expr::NumberLiteral(b)) = (lhs, rhs) else {
        return true;
    };
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.contains('\n') || b.contains('\n') {
        return true;
    }
    // Two adjacent bare numbers would read as one.
    let last = a.chars().next_back();
    let first = b.chars().next();
    matches!((last, first), (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit())
}

fn unwrap_built(result: Result<Expr, ExprError>) -> Expr {
    match result {
        Ok(expr) => expr,
        Err(err) => panic!("{err}"),
    }
}

fn boxed(e: Expr) -> Box<Expr> {
    Box::new(e)
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// An exact integer.
pub fn num(value: i64) -> Expr {
    Expr::Rational {
        value: BigRational::from_integer(BigInt::from(value)),
        precise: true,
    }
}

/// An exact fraction.
///
/// # Panics
/// Panics if `denominator` is zero.
pub fn num_ratio(numerator: i64, denominator: i64) -> Expr {
    unwrap_built(try_num_ratio(numerator, denominator))
}

pub fn try_num_ratio(numerator: i64, denominator: i64) -> Result<Expr, ExprError> {
    if denominator == 0 {
        return Err(ExprError::ZeroDenominator);
    }
    Ok(Expr::Rational {
        value: BigRational::new(BigInt::from(numerator), BigInt::from(denominator)),
        precise: true,
    })
}

/// An exact arbitrary-precision value. `precise` records whether the value
/// came from an exact source, which influences the smart decimal mode.
pub fn num_big(value: BigRational, precise: bool) -> Expr {
    Expr::Rational { value, precise }
}

/// The exact rational value of a float, treated as a precise number.
///
/// # Panics
/// Panics if `value` is not finite.
pub fn num_f64(value: f64) -> Expr {
    Expr::Rational {
        value: number::rational_from_f64(value),
        precise: true,
    }
}

/// The exact rational value of a float, treated as an approximation: the
/// smart decimal mode will always render it as a decimal.
///
/// # Panics
/// Panics if `value` is not finite.
pub fn num_approx(value: f64) -> Expr {
    Expr::Rational {
        value: number::rational_from_f64(value),
        precise: false,
    }
}

/// A number rendered exactly as the given text, bypassing the number
/// formatter entirely.
pub fn num_str(literal: impl Into<String>) -> Expr {
    Expr::NumberLiteral(literal.into())
}

// ---------------------------------------------------------------------------
// Names and symbols
// ---------------------------------------------------------------------------

/// A named identifier, e.g. a variable or function name.
pub fn name(literal: impl Into<String>) -> Expr {
    Expr::Literal {
        operator: false,
        value: literal.into(),
    }
}

/// An operator symbol. Differs from [`name`] only in MathML tagging.
pub fn symbol(literal: impl Into<String>) -> Expr {
    Expr::Literal {
        operator: true,
        value: literal.into(),
    }
}

/// A named identifier with an explicit form per output surface. The ASCII
/// and Unicode forms may be multi-line art.
///
/// # Panics
/// Panics if the inline form contains a newline.
pub fn custom_name(inline: &str, ascii: &str, unicode: &str, latex: &str, mathml: &str) -> Expr {
    unwrap_built(try_custom_name(inline, ascii, unicode, latex, mathml))
}

pub fn try_custom_name(
    inline: &str,
    ascii: &str,
    unicode: &str,
    latex: &str,
    mathml: &str,
) -> Result<Expr, ExprError> {
    if memchr::memchr(b'\n', inline.as_bytes()).is_some() {
        return Err(ExprError::MultilineSymbol);
    }
    Ok(Expr::Glyph(Box::new(SymbolForms::new(
        false, inline, ascii, unicode, latex, mathml,
    ))))
}

/// An operator symbol with an explicit form per output surface.
///
/// # Panics
/// Panics if the inline form contains a newline.
pub fn custom_symbol(inline: &str, ascii: &str, unicode: &str, latex: &str, mathml: &str) -> Expr {
    unwrap_built(try_custom_symbol(inline, ascii, unicode, latex, mathml))
}

pub fn try_custom_symbol(
    inline: &str,
    ascii: &str,
    unicode: &str,
    latex: &str,
    mathml: &str,
) -> Result<Expr, ExprError> {
    if memchr::memchr(b'\n', inline.as_bytes()).is_some() {
        return Err(ExprError::MultilineSymbol);
    }
    Ok(Expr::Glyph(Box::new(SymbolForms::new(
        true, inline, ascii, unicode, latex, mathml,
    ))))
}

// ---------------------------------------------------------------------------
// Brackets
// ---------------------------------------------------------------------------

/// Round parentheses.
pub fn par(inner: Expr) -> Expr {
    brackets(Bracket::Round, inner)
}

pub fn brackets(kind: Bracket, inner: Expr) -> Expr {
    Expr::Brackets {
        kind,
        inner: boxed(inner),
    }
}

pub fn curly(inner: Expr) -> Expr {
    brackets(Bracket::Curly, inner)
}

pub fn ceil(inner: Expr) -> Expr {
    brackets(Bracket::Ceil, inner)
}

pub fn floor(inner: Expr) -> Expr {
    brackets(Bracket::Floor, inner)
}

pub fn abs(inner: Expr) -> Expr {
    brackets(Bracket::Abs, inner)
}

/// A left bracket without its closing counterpart.
pub fn left(kind: Bracket, inner: Expr) -> Expr {
    Expr::BracketLiteral {
        kind,
        left: true,
        inner: boxed(inner),
    }
}

/// A right bracket without its opening counterpart.
pub fn right(kind: Bracket, inner: Expr) -> Expr {
    Expr::BracketLiteral {
        kind,
        left: false,
        inner: boxed(inner),
    }
}

/// Brackets in the style selected by the matrix-bracket render option.
pub fn matrix_brackets(inner: Expr) -> Expr {
    Expr::MatrixBrackets(boxed(inner))
}

// ---------------------------------------------------------------------------
// Fractions, grids and matrices
// ---------------------------------------------------------------------------

pub fn frac(numerator: Expr, denominator: Expr) -> Expr {
    Expr::Fraction {
        num: boxed(numerator),
        denom: boxed(denominator),
    }
}

/// A single-row grid.
pub fn row(elements: Vec<Expr>) -> Expr {
    grid(vec![elements])
}

/// A single-column grid.
pub fn column(elements: Vec<Expr>) -> Expr {
    grid(elements.into_iter().map(|e| vec![e]).collect())
}

/// A grid of cells.
///
/// # Panics
/// Panics if the grid is empty or its rows have unequal lengths.
pub fn grid(rows: Vec<Vec<Expr>>) -> Expr {
    unwrap_built(try_grid(rows))
}

pub fn try_grid(rows: Vec<Vec<Expr>>) -> Result<Expr, ExprError> {
    let expected = rows.first().map_or(0, Vec::len);
    if expected == 0 {
        return Err(ExprError::EmptyGrid);
    }
    for (i, r) in rows.iter().enumerate() {
        if r.len() != expected {
            return Err(ExprError::RaggedGrid {
                row: i,
                expected,
                found: r.len(),
            });
        }
    }
    Ok(Expr::Grid(rows))
}

/// A column vector in square brackets.
pub fn vec_of(elements: Vec<Expr>) -> Expr {
    vec_in(Bracket::Square, elements)
}

pub fn vec_in(kind: Bracket, elements: Vec<Expr>) -> Expr {
    brackets(kind, column(elements))
}

/// A row vector in square brackets.
pub fn row_vec(elements: Vec<Expr>) -> Expr {
    row_vec_in(Bracket::Square, elements)
}

pub fn row_vec_in(kind: Bracket, elements: Vec<Expr>) -> Expr {
    brackets(kind, row(elements))
}

/// A matrix: a grid wrapped in the bracket style from the render options.
///
/// # Panics
/// Panics if the grid is empty or its rows have unequal lengths.
pub fn matrix(rows: Vec<Vec<Expr>>) -> Expr {
    matrix_brackets(grid(rows))
}

/// A matrix with an explicit bracket style, or a bare grid for `None`.
pub fn matrix_in(kind: Option<Bracket>, rows: Vec<Vec<Expr>>) -> Expr {
    match kind {
        Some(kind) => brackets(kind, grid(rows)),
        None => grid(rows),
    }
}

/// Two blocks separated by a full-height vertical bar: an augmented grid if
/// both are grids with the same row count, a plain set-builder bar
/// otherwise.
pub fn mid(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Grid(left), Expr::Grid(right)) if left.len() == right.len() => {
            Expr::AugmentedGrid { left, right }
        }
        (a, b) => Expr::Middle {
            lhs: boxed(a),
            rhs: boxed(b),
        },
    }
}

/// An augmented grid from its two halves.
///
/// # Panics
/// Panics if either half is not a valid grid or the row counts differ.
pub fn aug_grid(left: Vec<Vec<Expr>>, right: Vec<Vec<Expr>>) -> Expr {
    unwrap_built(try_aug_grid(left, right))
}

pub fn try_aug_grid(left: Vec<Vec<Expr>>, right: Vec<Vec<Expr>>) -> Result<Expr, ExprError> {
    let left = match try_grid(left)? {
        Expr::Grid(rows) => rows,
        _ => unreachable!(),
    };
    let right = match try_grid(right)? {
        Expr::Grid(rows) => rows,
        _ => unreachable!(),
    };
    if left.len() != right.len() {
        return Err(ExprError::MismatchedAugmentedRows {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(Expr::AugmentedGrid { left, right })
}

/// An augmented matrix in square brackets.
pub fn aug_matrix(a: Expr, b: Expr) -> Expr {
    brackets(Bracket::Square, mid(a, b))
}

pub fn aug_matrix_in(kind: Option<Bracket>, a: Expr, b: Expr) -> Expr {
    match kind {
        Some(kind) => brackets(kind, mid(a, b)),
        None => mid(a, b),
    }
}

// ---------------------------------------------------------------------------
// Sets, lists and calls
// ---------------------------------------------------------------------------

/// The set of elements matching `pattern` such that `predicate` holds.
pub fn set(pattern: Expr, predicate: Expr) -> Expr {
    set_of(mid(pattern, predicate))
}

pub fn set_of(inner: Expr) -> Expr {
    curly(inner)
}

/// Comma-separated values.
pub fn list(values: Vec<Expr>) -> Expr {
    custom_list(symbol(","), values)
}

pub fn custom_list(delimiter: Expr, values: Vec<Expr>) -> Expr {
    Expr::List {
        delimiter: boxed(delimiter),
        elements: values,
    }
}

/// A parenthesized, comma-separated tuple.
pub fn tuple(values: Vec<Expr>) -> Expr {
    par(list(values))
}

/// A function application `f(params...)`.
pub fn call(function_name: &str, params: Vec<Expr>) -> Expr {
    call_on(name(function_name), params)
}

pub fn call_on(function: Expr, mut params: Vec<Expr>) -> Expr {
    if params.len() == 1 {
        let param = params.remove(0);
        let arg = match param {
            p @ Expr::Brackets {
                kind: Bracket::Round,
                ..
            } => p,
            p => par(p),
        };
        implicit(function, arg)
    } else {
        implicit(function, par(list(params)))
    }
}

/// Two expressions side by side with implicit-multiplication spacing.
pub fn implicit(a: Expr, b: Expr) -> Expr {
    Expr::Concatenation {
        lhs: boxed(a),
        rhs: boxed(b),
        implicit_space: true,
    }
}

/// Two expressions side by side with no space in between.
pub fn concat(a: Expr, b: Expr) -> Expr {
    Expr::Concatenation {
        lhs: boxed(a),
        rhs: boxed(b),
        implicit_space: false,
    }
}

// ---------------------------------------------------------------------------
// Infix, prefix and postfix operations
// ---------------------------------------------------------------------------

/// A binary operation with an arbitrary symbol. `associative` controls
/// whether the right operand parenthesizes at equal precedence.
pub fn infix(symbol: Expr, a: Expr, b: Expr, precedence: i32, associative: bool) -> Expr {
    Expr::Infix {
        symbol: boxed(symbol),
        lhs: boxed(a),
        rhs: boxed(b),
        precedence,
        associative,
    }
}

/// A binary operation with a plain text symbol.
///
/// # Panics
/// Panics if the symbol contains a newline.
pub fn infix_sym(sym: &str, a: Expr, b: Expr, precedence: i32, associative: bool) -> Expr {
    if memchr::memchr(b'\n', sym.as_bytes()).is_some() {
        panic!("{}", ExprError::MultilineSymbol);
    }
    infix(symbol(sym), a, b, precedence, associative)
}

pub fn prefix(symbol: Expr, value: Expr, precedence: i32) -> Expr {
    Expr::Prefix {
        symbol: boxed(symbol),
        value: boxed(value),
        precedence,
    }
}

/// A prefix operation with a plain text symbol.
///
/// # Panics
/// Panics if the symbol contains a newline.
pub fn prefix_sym(sym: &str, value: Expr, precedence: i32) -> Expr {
    if memchr::memchr(b'\n', sym.as_bytes()).is_some() {
        panic!("{}", ExprError::MultilineSymbol);
    }
    prefix(symbol(sym), value, precedence)
}

pub fn postfix(symbol: Expr, value: Expr, precedence: i32) -> Expr {
    Expr::Postfix {
        symbol: boxed(symbol),
        value: boxed(value),
        precedence,
    }
}

/// A postfix operation with a plain text symbol.
///
/// # Panics
/// Panics if the symbol contains a newline.
pub fn postfix_sym(sym: &str, value: Expr, precedence: i32) -> Expr {
    if memchr::memchr(b'\n', sym.as_bytes()).is_some() {
        panic!("{}", ExprError::MultilineSymbol);
    }
    postfix(symbol(sym), value, precedence)
}

/// `a + b`. Adding a negated value rewrites to a subtraction.
pub fn plus(a: Expr, b: Expr) -> Expr {
    match b {
        Expr::Negate(inner) => minus(a, *inner),
        b => infix(symbol::plus_sign(), a, b, precedence::PLUS, true),
    }
}

pub fn minus(a: Expr, b: Expr) -> Expr {
    infix(symbol::minus_sign(), a, b, precedence::MINUS, false)
}

pub fn mult(a: Expr, b: Expr) -> Expr {
    infix(symbol::times_sign(), a, b, precedence::MULTIPLY, true)
}

pub fn div(a: Expr, b: Expr) -> Expr {
    infix(symbol::divide_sign(), a, b, precedence::DIVIDE, false)
}

/// The vector cross product `a ⨯ b`.
pub fn cross(a: Expr, b: Expr) -> Expr {
    infix(symbol::cross_sign(), a, b, precedence::MULTIPLY, true)
}

pub fn modulo(a: Expr, b: Expr) -> Expr {
    infix(symbol::modulo_sign(), a, b, precedence::MODULO, false)
}

pub fn eq(a: Expr, b: Expr) -> Expr {
    infix(symbol::eq_sign(), a, b, precedence::EQUALS, true)
}

pub fn neq(a: Expr, b: Expr) -> Expr {
    infix(symbol::neq_sign(), a, b, precedence::EQUALS, true)
}

pub fn approx(a: Expr, b: Expr) -> Expr {
    infix(symbol::approx_sign(), a, b, precedence::EQUALS, true)
}

pub fn napprox(a: Expr, b: Expr) -> Expr {
    infix(symbol::napprox_sign(), a, b, precedence::EQUALS, true)
}

pub fn less(a: Expr, b: Expr) -> Expr {
    infix(symbol::less_sign(), a, b, precedence::LESS, true)
}

pub fn nless(a: Expr, b: Expr) -> Expr {
    infix(symbol::nless_sign(), a, b, precedence::LESS, true)
}

pub fn greater(a: Expr, b: Expr) -> Expr {
    infix(symbol::greater_sign(), a, b, precedence::GREATER, true)
}

pub fn ngreater(a: Expr, b: Expr) -> Expr {
    infix(symbol::ngreater_sign(), a, b, precedence::GREATER, true)
}

pub fn leq(a: Expr, b: Expr) -> Expr {
    infix(symbol::leq_sign(), a, b, precedence::LESS_OR_EQUAL, true)
}

pub fn nleq(a: Expr, b: Expr) -> Expr {
    infix(symbol::nleq_sign(), a, b, precedence::LESS_OR_EQUAL, true)
}

pub fn geq(a: Expr, b: Expr) -> Expr {
    infix(symbol::geq_sign(), a, b, precedence::GREATER_OR_EQUAL, true)
}

pub fn ngeq(a: Expr, b: Expr) -> Expr {
    infix(symbol::ngeq_sign(), a, b, precedence::GREATER_OR_EQUAL, true)
}

/// The definition `a := b`.
pub fn define(a: Expr, b: Expr) -> Expr {
    infix(symbol::define_sign(), a, b, precedence::DEFINE, true)
}

pub fn define_rev(a: Expr, b: Expr) -> Expr {
    infix(symbol::define_rev_sign(), a, b, precedence::DEFINE, true)
}

/// Set membership `a ∈ b`.
pub fn elem(a: Expr, b: Expr) -> Expr {
    infix(symbol::elem_sign(), a, b, precedence::IN, false)
}

pub fn nelem(a: Expr, b: Expr) -> Expr {
    infix(symbol::nelem_sign(), a, b, precedence::IN, false)
}

/// Set containment `a ∋ b`.
pub fn contains_elem(a: Expr, b: Expr) -> Expr {
    infix(symbol::contains_sign(), a, b, precedence::IN, false)
}

pub fn ncontains_elem(a: Expr, b: Expr) -> Expr {
    infix(symbol::ncontains_sign(), a, b, precedence::IN, false)
}

pub fn and(a: Expr, b: Expr) -> Expr {
    infix(symbol::and_sign(), a, b, precedence::AND, true)
}

pub fn or(a: Expr, b: Expr) -> Expr {
    infix(symbol::or_sign(), a, b, precedence::OR, true)
}

/// Arithmetic negation `-v`.
pub fn neg(value: Expr) -> Expr {
    Expr::Negate(boxed(value))
}

/// Logical negation `¬v`.
pub fn not(value: Expr) -> Expr {
    prefix(symbol::not_sign(), value, precedence::NOT)
}

pub fn factorial(value: Expr) -> Expr {
    postfix(symbol::factorial_sign(), value, precedence::FACTORIAL)
}

pub fn percent(value: Expr) -> Expr {
    postfix(symbol::percent_sign(), value, precedence::PERCENT)
}

pub fn degree(value: Expr) -> Expr {
    postfix(symbol::degree_sign(), value, precedence::DEGREE)
}

// ---------------------------------------------------------------------------
// Scripts, roots and big operators
// ---------------------------------------------------------------------------

/// The power `a^b`.
pub fn pow(a: Expr, b: Expr) -> Expr {
    sup(a, b)
}

/// A superscript. Superscripting an existing subscript merges both into a
/// combined super-subscript so they stack on the same base.
pub fn sup(a: Expr, b: Expr) -> Expr {
    match a {
        Expr::Subscript { base, script } => Expr::SuperSubscript {
            base,
            sup: boxed(b),
            sub: script,
        },
        a => Expr::Superscript {
            base: boxed(a),
            script: boxed(b),
        },
    }
}

/// A subscript; see [`sup`] for the merging rule.
pub fn sub(a: Expr, b: Expr) -> Expr {
    match a {
        Expr::Superscript { base, script } => Expr::SuperSubscript {
            base,
            sup: script,
            sub: boxed(b),
        },
        a => Expr::Subscript {
            base: boxed(a),
            script: boxed(b),
        },
    }
}

/// The exponential function.
pub fn exp(value: Expr) -> Expr {
    Expr::Exp(boxed(value))
}

pub fn sqrt(value: Expr) -> Expr {
    root(num_str(""), value)
}

pub fn cbrt(value: Expr) -> Expr {
    root(num_str("3"), value)
}

pub fn root(degree: Expr, value: Expr) -> Expr {
    Expr::Root {
        degree: boxed(degree),
        radicand: boxed(value),
    }
}

/// Free text.
pub fn text(text: impl Into<String>) -> Expr {
    Expr::Text(text.into())
}

/// A sum with a lower bound.
pub fn sum_of(lower: Expr, body: Expr) -> Expr {
    big(symbol::sum_sym(), Some(lower), None, body)
}

pub fn sum_bounds(lower: Expr, upper: Expr, body: Expr) -> Expr {
    big(symbol::sum_sym(), Some(lower), Some(upper), body)
}

/// A product with a lower bound.
pub fn prod_of(lower: Expr, body: Expr) -> Expr {
    big(symbol::prod_sym(), Some(lower), None, body)
}

pub fn prod_bounds(lower: Expr, upper: Expr, body: Expr) -> Expr {
    big(symbol::prod_sym(), Some(lower), Some(upper), body)
}

/// The limit of `body` as `var` approaches `target`.
pub fn lim_of(var: &str, target: Expr, body: Expr) -> Expr {
    lim_expr(name(var), target, body)
}

pub fn lim_expr(var: Expr, target: Expr, body: Expr) -> Expr {
    big(
        symbol::lim_sym(),
        Some(infix(
            symbol::arrow(Some(true), false),
            var,
            target,
            precedence::LAMBDA,
            false,
        )),
        None,
        body,
    )
}

/// A big operator with optional bounds below and above its symbol.
pub fn big(symbol: Expr, lower: Option<Expr>, upper: Option<Expr>, body: Expr) -> Expr {
    Expr::BigSymbol {
        symbol: boxed(symbol),
        sub: lower.map(boxed),
        sup: upper.map(boxed),
        body: boxed(body),
    }
}

/// An integral over `var` with optional bounds.
pub fn integral(lower: Option<Expr>, upper: Option<Expr>, body: Expr, var: Expr) -> Expr {
    Expr::Integral {
        lower: lower.map(boxed),
        upper: upper.map(boxed),
        body: boxed(concat(body, concat(name(" d"), var))),
    }
}

pub fn integral_var(lower: Option<Expr>, upper: Option<Expr>, body: Expr, var: &str) -> Expr {
    integral(lower, upper, body, name(var))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExprError;

    const WORD: usize = std::mem::size_of::<usize>();

    #[test]
    fn struct_size_stays_bounded() {
        assert!(std::mem::size_of::<Expr>() <= 10 * WORD, "size of Expr");
    }

    #[test]
    fn grid_shape_is_validated() {
        assert_eq!(try_grid(vec![]), Err(ExprError::EmptyGrid));
        assert_eq!(try_grid(vec![vec![]]), Err(ExprError::EmptyGrid));
        assert_eq!(
            try_grid(vec![vec![name("a"), name("b")], vec![name("c")]]),
            Err(ExprError::RaggedGrid {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
        assert!(try_grid(vec![vec![name("a")], vec![name("b")]]).is_ok());
    }

    #[test]
    #[should_panic(expected = "grid rows must be of the same size")]
    fn ragged_grid_panics_at_construction() {
        let _ = grid(vec![vec![name("a"), name("b")], vec![name("c")]]);
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(try_num_ratio(1, 0), Err(ExprError::ZeroDenominator));
    }

    #[test]
    fn augmented_grid_row_counts_must_match() {
        assert_eq!(
            try_aug_grid(vec![vec![name("a")]], vec![vec![name("b")], vec![name("c")]]),
            Err(ExprError::MismatchedAugmentedRows { left: 1, right: 2 })
        );
    }

    #[test]
    fn plus_with_negated_rhs_becomes_minus() {
        let e = plus(name("a"), neg(name("b")));
        assert_eq!(e.render_inline(&crate::RenderOptions::default()), "a-b");
    }

    #[test]
    fn scripts_merge_into_super_subscript() {
        let e = sup(sub(name("x"), name("i")), num_str("2"));
        assert!(matches!(e, Expr::SuperSubscript { .. }));
        let e = sub(sup(name("x"), num_str("2")), name("i"));
        assert!(matches!(e, Expr::SuperSubscript { .. }));
    }

    #[test]
    fn mid_of_matching_grids_is_augmented() {
        let a = grid(vec![vec![name("a")], vec![name("b")]]);
        let b = grid(vec![vec![name("c")], vec![name("d")]]);
        assert!(matches!(mid(a, b), Expr::AugmentedGrid { .. }));
        let g = grid(vec![vec![name("a")]]);
        assert!(matches!(mid(g, name("p")), Expr::Middle { .. }));
    }

    #[test]
    fn leaf_precedences() {
        assert_eq!(name("x").precedence(), precedence::MAX);
        assert_eq!(num_str("-3").precedence(), precedence::NEGATE);
        assert_eq!(num(-3).precedence(), precedence::NEGATE);
        assert_eq!(num(3).precedence(), precedence::MAX);
    }

    #[test]
    #[should_panic(expected = "newline")]
    fn infix_symbols_must_be_single_line() {
        let _ = infix_sym("a\nb", name("x"), name("y"), precedence::PLUS, true);
    }
}
