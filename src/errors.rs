// ============================================================================
// Engine Errors
// Error types for order submission and book maintenance
// ============================================================================

use crate::domain::Side;
use std::fmt;

/// Errors that can occur while submitting orders or maintaining the book.
///
/// All of these signal a caller or dispatch bug rather than an operational
/// failure: the engine has no I/O and nothing to retry. A failed call leaves
/// the book untouched and matching may continue with subsequent orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A side label was neither "buy" nor "sell"
    UnrecognizedSide(String),
    /// An order was inserted into the book side of the opposite side
    InvalidSide { expected: Side, actual: Side },
    /// Price resolution was attempted between two market orders
    NoPriceAvailable,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnrecognizedSide(label) => {
                write!(f, "order side not recognized: {:?}", label)
            },
            EngineError::InvalidSide { expected, actual } => {
                write!(
                    f,
                    "cannot add a {} order to the {} side of the book",
                    actual, expected
                )
            },
            EngineError::NoPriceAvailable => {
                write!(f, "no price available: only market orders found")
            },
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
