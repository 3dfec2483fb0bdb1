//! Statement service use cases.
//!
//! Orchestrates directory lookups and store operations for deposits,
//! withdrawals, balance queries, single-operation lookups, and transfers.
//! Every use case validates all preconditions before the first write, so a
//! failed request leaves no partial state behind.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use finledger_shared::{OperationId, UserId};

use crate::directory::{User, UserDirectory};

use super::balance::compute_balance;
use super::error::{StatementAction, StatementError};
use super::locks::UserLocks;
use super::store::StatementStore;
use super::types::{BalanceReport, NewOperation, Operation, OperationKind, TransferReceipt};
use super::validation::validate_amount;

/// Statement use cases over a user directory and a statement store.
///
/// Constructed explicitly from its two capabilities; there is no container
/// or registry involved.
pub struct StatementService<D, S> {
    directory: Arc<D>,
    store: Arc<S>,
    locks: UserLocks,
}

impl<D, S> StatementService<D, S>
where
    D: UserDirectory,
    S: StatementStore,
{
    /// Creates a new service over the given capabilities.
    #[must_use]
    pub fn new(directory: Arc<D>, store: Arc<S>) -> Self {
        Self {
            directory,
            store,
            locks: UserLocks::new(),
        }
    }

    /// Records a deposit and returns the created operation.
    ///
    /// Deposits are pure appends: they cannot overdraw anything, so no
    /// per-user lock is taken.
    pub async fn deposit(
        &self,
        user_id: UserId,
        amount: Decimal,
        description: String,
    ) -> Result<Operation, StatementError> {
        validate_amount(amount)?;
        self.resolve_user(user_id, StatementAction::Deposit).await?;

        let operation = self
            .store
            .append(NewOperation {
                user_id,
                kind: OperationKind::Deposit,
                amount,
                description,
            })
            .await?;
        debug!(%user_id, %amount, "deposit recorded");
        Ok(operation)
    }

    /// Records a withdrawal and returns the created operation.
    ///
    /// The balance check and the append run under the user's lock; two
    /// racing withdrawals therefore observe each other's writes and cannot
    /// jointly overdraw the account.
    pub async fn withdraw(
        &self,
        user_id: UserId,
        amount: Decimal,
        description: String,
    ) -> Result<Operation, StatementError> {
        validate_amount(amount)?;
        self.resolve_user(user_id, StatementAction::Withdraw).await?;

        let lock = self.locks.acquire(user_id);
        let result = {
            let _guard = lock.lock().await;
            self.withdraw_locked(user_id, amount, description).await
        };
        drop(lock);
        self.locks.release(user_id);
        result
    }

    async fn withdraw_locked(
        &self,
        user_id: UserId,
        amount: Decimal,
        description: String,
    ) -> Result<Operation, StatementError> {
        let available = self.store.balance(user_id).await?;
        if amount > available {
            warn!(%user_id, %amount, %available, "withdrawal refused");
            return Err(StatementError::InsufficientFunds {
                action: StatementAction::Withdraw,
                requested: amount,
                available,
            });
        }

        let operation = self
            .store
            .append(NewOperation {
                user_id,
                kind: OperationKind::Withdraw,
                amount,
                description,
            })
            .await?;
        debug!(%user_id, %amount, "withdrawal recorded");
        Ok(operation)
    }

    /// Returns the user's derived balance together with the full statement.
    ///
    /// Read-only; the balance is folded over the same snapshot that is
    /// returned, so the two always agree.
    pub async fn balance(&self, user_id: UserId) -> Result<BalanceReport, StatementError> {
        self.resolve_user(user_id, StatementAction::GetBalance)
            .await?;

        let statement = self.store.list_by_user(user_id).await?;
        let balance = compute_balance(&statement);
        Ok(BalanceReport { balance, statement })
    }

    /// Returns a single statement operation scoped to the user.
    pub async fn statement_operation(
        &self,
        user_id: UserId,
        operation_id: OperationId,
    ) -> Result<Operation, StatementError> {
        self.resolve_user(user_id, StatementAction::GetOperation)
            .await?;

        self.store
            .find_by_id(user_id, operation_id)
            .await?
            .ok_or(StatementError::StatementNotFound {
                user_id,
                operation_id,
            })
    }

    /// Transfers funds from `sender_id` to `receiver_id`.
    ///
    /// Resolves both parties, checks the sender's balance under the sender's
    /// lock, and commits the debit/credit pair atomically. An amount equal
    /// to the balance is permitted (the balance may reach exactly zero).
    pub async fn transfer(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        amount: Decimal,
        description: String,
    ) -> Result<TransferReceipt, StatementError> {
        validate_amount(amount)?;
        self.resolve_user(sender_id, StatementAction::Transfer)
            .await?;
        self.resolve_user(receiver_id, StatementAction::Transfer)
            .await?;

        // Only the sender's balance is at risk, so only the sender's lock
        // is held. One lock per mutation: no ordering deadlock.
        let lock = self.locks.acquire(sender_id);
        let result = {
            let _guard = lock.lock().await;
            self.transfer_locked(sender_id, receiver_id, amount, description)
                .await
        };
        drop(lock);
        self.locks.release(sender_id);
        result
    }

    async fn transfer_locked(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        amount: Decimal,
        description: String,
    ) -> Result<TransferReceipt, StatementError> {
        let available = self.store.balance(sender_id).await?;
        if amount > available {
            warn!(%sender_id, %amount, %available, "transfer refused");
            return Err(StatementError::InsufficientFunds {
                action: StatementAction::Transfer,
                requested: amount,
                available,
            });
        }

        let debit = NewOperation {
            user_id: sender_id,
            kind: OperationKind::TransferOut,
            amount,
            description: description.clone(),
        };
        let credit = NewOperation {
            user_id: receiver_id,
            kind: OperationKind::TransferIn {
                counterparty: sender_id,
            },
            amount,
            description,
        };

        let (debit, credit) = self.store.append_transfer(debit, credit).await?;
        info!(%sender_id, %receiver_id, %amount, "transfer committed");
        Ok(TransferReceipt { debit, credit })
    }

    async fn resolve_user(
        &self,
        user_id: UserId,
        action: StatementAction,
    ) -> Result<User, StatementError> {
        self.directory
            .find_by_id(user_id)
            .await?
            .ok_or(StatementError::UserNotFound { action, user_id })
    }
}
