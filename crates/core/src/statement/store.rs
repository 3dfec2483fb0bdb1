//! Statement store capability.
//!
//! The store is a leaf data component: it appends operations and answers
//! reads, with no knowledge of the business rules. User existence is checked
//! by the service before any append, so the store does not re-validate it.

use async_trait::async_trait;
use rust_decimal::Decimal;

use finledger_shared::{OperationId, UserId};

use super::error::StoreError;
use super::types::{NewOperation, Operation};

/// Append-only storage for statement operations.
///
/// Reads never mutate; `append` and `append_transfer` are the only writes.
#[async_trait]
pub trait StatementStore: Send + Sync {
    /// Appends one operation, minting its id and timestamp.
    async fn append(&self, input: NewOperation) -> Result<Operation, StoreError>;

    /// Appends a transfer's debit and credit legs as one atomic unit.
    ///
    /// Either both operations become visible or neither does. A half-applied
    /// transfer is data corruption, not an error outcome, so implementations
    /// must commit the pair inside a single transaction or critical section.
    async fn append_transfer(
        &self,
        debit: NewOperation,
        credit: NewOperation,
    ) -> Result<(Operation, Operation), StoreError>;

    /// Looks up one operation scoped to a user.
    ///
    /// Returns `None` if the id is unknown or the operation belongs to a
    /// different user.
    async fn find_by_id(
        &self,
        user_id: UserId,
        operation_id: OperationId,
    ) -> Result<Option<Operation>, StoreError>;

    /// Returns the user's statement in insertion order.
    ///
    /// Each call is a fresh snapshot, not a live cursor.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Operation>, StoreError>;

    /// Returns the user's derived balance.
    async fn balance(&self, user_id: UserId) -> Result<Decimal, StoreError>;
}
