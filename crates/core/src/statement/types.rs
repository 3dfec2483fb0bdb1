//! Statement domain types.
//!
//! A statement is the append-only sequence of operations recorded against a
//! user. Operations are never updated or deleted; corrections require a new
//! compensating operation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finledger_shared::{OperationId, UserId};

/// Kind of statement operation.
///
/// A transfer produces two operations: a `TransferOut` recorded against the
/// sender and a `TransferIn` recorded against the receiver. Only the credit
/// side carries the counterparty, pointing back at the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Funds paid in by the user.
    Deposit,
    /// Funds paid out by the user.
    Withdraw,
    /// Debit side of a transfer, recorded against the sender.
    TransferOut,
    /// Credit side of a transfer, recorded against the receiver.
    TransferIn {
        /// The sender of the transfer.
        counterparty: UserId,
    },
}

impl OperationKind {
    /// Returns true if this kind increases the owner's balance.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn { .. })
    }
}

/// A single recorded statement operation.
///
/// Immutable once created; the store assigns `id` and `created_at` at append
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier for this operation.
    pub id: OperationId,
    /// The user this operation is recorded against.
    pub user_id: UserId,
    /// What the operation does to the balance.
    pub kind: OperationKind,
    /// Amount moved (always positive).
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// When the operation was recorded.
    pub created_at: DateTime<Utc>,
}

impl Operation {
    /// Returns the signed amount (positive for credits, negative for debits).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

/// Input for appending a new operation to the store.
#[derive(Debug, Clone)]
pub struct NewOperation {
    /// The user to record against.
    pub user_id: UserId,
    /// What the operation does to the balance.
    pub kind: OperationKind,
    /// Amount moved (validated positive by the service).
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
}

/// Result of a balance query: the derived balance plus the full statement.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    /// Derived balance over the statement.
    pub balance: Decimal,
    /// All operations in insertion order.
    pub statement: Vec<Operation>,
}

/// The two operations committed by a successful transfer.
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    /// Debit leg, recorded against the sender.
    pub debit: Operation,
    /// Credit leg, recorded against the receiver.
    pub credit: Operation,
}
