use thiserror::Error;

/// Failures raised by the ledger core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Ledger invariant violated: {0}")]
    InvariantViolation(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        LedgerError::InvalidInput(message.into())
    }
}
