use std::fmt;

/// An error raised by a checked expression constructor.
///
/// All of these are argument-validation failures: they are reported
/// immediately when the expression is built, never deferred to render time.
/// The panicking builder functions wrap the checked constructors, so a
/// successfully constructed tree always renders without errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A grid was constructed without any elements.
    EmptyGrid,
    /// A grid row does not have the same length as the first row.
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The two halves of an augmented grid have different row counts.
    MismatchedAugmentedRows { left: usize, right: usize },
    /// A rational number was constructed with a zero denominator.
    ZeroDenominator,
    /// An inline-only symbol or operator contains a newline character.
    MultilineSymbol,
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::EmptyGrid => write!(f, "at least one grid element required"),
            ExprError::RaggedGrid {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid rows must be of the same size (row {row} has {found} elements, expected {expected})"
            ),
            ExprError::MismatchedAugmentedRows { left, right } => write!(
                f,
                "augmented grids must have the same number of rows ({left} vs {right})"
            ),
            ExprError::ZeroDenominator => write!(f, "division by zero"),
            ExprError::MultilineSymbol => {
                write!(f, "inline symbol may not contain newline characters")
            }
        }
    }
}

impl std::error::Error for ExprError {}
