use thiserror::Error;

/// Errors raised by the emissions and ESG calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessError {
    /// Input rejected before any arithmetic; the message is user-facing.
    #[error("{0}")]
    Validation(String),
    /// Production divisor was zero, negative or non-finite.
    #[error("division guard: {0}")]
    Division(&'static str),
}

impl AssessError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AssessError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AssessError::Validation(_))
    }
}
