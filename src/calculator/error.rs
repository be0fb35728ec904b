//! Error kinds produced by the evaluator and the input state machine.

use thiserror::Error;

/// Why a calculation could not produce a displayable number.
///
/// All kinds are recoverable by user action; the host only ever shows a
/// generic indicator, but the kind is kept around for diagnostics and tests.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum CalcError {
    /// A character outside the expression allow-list.
    #[error("invalid character '{0}' in expression")]
    InvalidCharacter(char),

    /// Open/close parenthesis counts do not match.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    /// Division whose right-hand side evaluated to exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A unary function applied outside its mathematical domain.
    #[error("{function} is undefined for {value}")]
    Domain { function: &'static str, value: f64 },

    /// The value is infinite, NaN, or too wide for the display.
    #[error("result is not a displayable finite number")]
    NonFiniteResult,

    /// Any other failure: syntax errors, empty input, unknown names.
    #[error("calculation error: {0}")]
    Calculation(String),
}

impl CalcError {
    pub(crate) fn calculation(message: impl Into<String>) -> Self {
        Self::Calculation(message.into())
    }

    /// Short machine-friendly name of the kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCharacter(_) => "InvalidCharacter",
            Self::UnbalancedParentheses => "UnbalancedParentheses",
            Self::DivisionByZero => "DivisionByZero",
            Self::Domain { .. } => "DomainError",
            Self::NonFiniteResult => "NonFiniteResult",
            Self::Calculation(_) => "CalculationError",
        }
    }
}
