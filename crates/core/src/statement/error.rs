//! Statement error types.
//!
//! One flat error enum covers every use case; the `StatementAction` context
//! identifies which use case refused the request, so there is no duplicated
//! per-use-case error type for the same underlying condition.

use rust_decimal::Decimal;
use thiserror::Error;

use finledger_shared::{OperationId, UserId};

use crate::directory::DirectoryError;

/// The use case an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementAction {
    /// Recording a deposit.
    Deposit,
    /// Recording a withdrawal.
    Withdraw,
    /// Querying balance and statement.
    GetBalance,
    /// Looking up a single statement operation.
    GetOperation,
    /// Transferring funds between users.
    Transfer,
}

impl std::fmt::Display for StatementAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Withdraw => write!(f, "withdraw"),
            Self::GetBalance => write!(f, "get_balance"),
            Self::GetOperation => write!(f, "get_operation"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

/// Failure while talking to the statement store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed; the operation was not committed.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Errors surfaced by the statement use cases.
///
/// Every use case fails fast on the first violated precondition; no partial
/// state is committed when any of these is returned.
#[derive(Debug, Error)]
pub enum StatementError {
    /// Amount is zero or negative; checked before any lookup.
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// The referenced user does not resolve in the directory.
    #[error("{action}: user not found: {user_id}")]
    UserNotFound {
        /// Use case that performed the lookup.
        action: StatementAction,
        /// The id that failed to resolve (sender or receiver for transfers).
        user_id: UserId,
    },

    /// The requested debit exceeds the current balance.
    #[error("{action}: insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Use case that performed the check.
        action: StatementAction,
        /// Amount the caller asked to debit.
        requested: Decimal,
        /// Balance at the time of the check.
        available: Decimal,
    },

    /// The operation does not exist or belongs to a different user.
    #[error("statement operation {operation_id} not found for user {user_id}")]
    StatementNotFound {
        /// The queried user.
        user_id: UserId,
        /// The operation id that failed to resolve.
        operation_id: OperationId,
    },

    /// The user directory backend failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The statement store backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StatementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::StatementNotFound { .. } => "STATEMENT_NOT_FOUND",
            Self::Directory(_) => "DIRECTORY_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount(_) | Self::InsufficientFunds { .. } => 400,
            Self::UserNotFound { .. } | Self::StatementNotFound { .. } => 404,
            Self::Directory(_) | Self::Store(_) => 500,
        }
    }
}
