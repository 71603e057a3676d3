use super::super::storage::StoreError;
use shared::order::{CommandError, CommandErrorCode};
use thiserror::Error;

/// Engine errors
///
/// `ItemTerminal` and `Conflict` are expected races, not faults: the caller
/// is told to refresh their view and resubmit. No error leaves the aggregate
/// partially mutated: the engine only persists on `Ok`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Item already rejected or cancelled: {0}")]
    ItemTerminal(String),

    #[error("Nothing to cancel: {0}")]
    NothingToCancel(String),

    #[error("Stale view: caller saw {caller} active items, current is {current}")]
    Conflict { caller: usize, current: usize },

    #[error("Payment precondition failed: {0}")]
    PaymentPrecondition(String),
}

impl EngineError {
    /// Wire-level error code for this error
    pub fn code(&self) -> CommandErrorCode {
        match self {
            EngineError::Store(_) => CommandErrorCode::InternalError,
            EngineError::InvalidInput(_) => CommandErrorCode::InvalidInput,
            EngineError::NotFound(_) => CommandErrorCode::NotFound,
            EngineError::Forbidden(_) => CommandErrorCode::Forbidden,
            EngineError::InvalidState(_) => CommandErrorCode::InvalidState,
            EngineError::ItemTerminal(_) => CommandErrorCode::ItemTerminal,
            EngineError::NothingToCancel(_) => CommandErrorCode::NothingToCancel,
            EngineError::Conflict { .. } => CommandErrorCode::Conflict,
            EngineError::PaymentPrecondition(_) => CommandErrorCode::PaymentPrecondition,
        }
    }

    /// Recoverable by the caller reloading state and resubmitting
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::ItemTerminal(_) | EngineError::Conflict { .. }
        )
    }
}

impl From<EngineError> for CommandError {
    fn from(err: EngineError) -> Self {
        let code = err.code();
        if let EngineError::Store(e) = &err {
            tracing::error!(error = %e, "Store error during command processing");
        }
        CommandError::new(code, err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
