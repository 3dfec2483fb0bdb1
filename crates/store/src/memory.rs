//! In-memory statement store.
//!
//! One writer lock guards all ledgers, so the two legs of a transfer commit
//! as a single critical section: readers either see both or neither.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use finledger_core::statement::{
    compute_balance, NewOperation, Operation, StatementStore, StoreError,
};
use finledger_shared::{OperationId, UserId};

type Ledgers = HashMap<UserId, Vec<Operation>>;

/// Append-only in-memory statement store.
#[derive(Debug, Default)]
pub struct MemoryStatementStore {
    ledgers: RwLock<Ledgers>,
}

impl MemoryStatementStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(input: NewOperation) -> Operation {
        Operation {
            id: OperationId::new(),
            user_id: input.user_id,
            kind: input.kind,
            amount: input.amount,
            description: input.description,
            created_at: Utc::now(),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledgers>, StoreError> {
        self.ledgers
            .read()
            .map_err(|_| StoreError::Backend("ledger lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledgers>, StoreError> {
        self.ledgers
            .write()
            .map_err(|_| StoreError::Backend("ledger lock poisoned".to_string()))
    }
}

#[async_trait]
impl StatementStore for MemoryStatementStore {
    async fn append(&self, input: NewOperation) -> Result<Operation, StoreError> {
        let operation = Self::mint(input);
        let mut ledgers = self.write()?;
        ledgers
            .entry(operation.user_id)
            .or_default()
            .push(operation.clone());
        debug!(user_id = %operation.user_id, operation_id = %operation.id, "operation appended");
        Ok(operation)
    }

    async fn append_transfer(
        &self,
        debit: NewOperation,
        credit: NewOperation,
    ) -> Result<(Operation, Operation), StoreError> {
        let debit = Self::mint(debit);
        let credit = Self::mint(credit);

        // Both pushes happen under one writer guard; no reader can observe
        // the debit without the credit.
        let mut ledgers = self.write()?;
        ledgers
            .entry(debit.user_id)
            .or_default()
            .push(debit.clone());
        ledgers
            .entry(credit.user_id)
            .or_default()
            .push(credit.clone());
        debug!(
            sender = %debit.user_id,
            receiver = %credit.user_id,
            "transfer pair appended"
        );
        Ok((debit, credit))
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        operation_id: OperationId,
    ) -> Result<Option<Operation>, StoreError> {
        let ledgers = self.read()?;
        Ok(ledgers
            .get(&user_id)
            .and_then(|ops| ops.iter().find(|op| op.id == operation_id).cloned()))
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Operation>, StoreError> {
        let ledgers = self.read()?;
        Ok(ledgers.get(&user_id).cloned().unwrap_or_default())
    }

    async fn balance(&self, user_id: UserId) -> Result<Decimal, StoreError> {
        let ledgers = self.read()?;
        Ok(ledgers
            .get(&user_id)
            .map_or(Decimal::ZERO, |ops| compute_balance(ops)))
    }
}
