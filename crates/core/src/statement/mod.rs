//! Append-only ledger logic.
//!
//! This module implements the statement core:
//! - Statement operations (deposits, withdrawals, transfer legs)
//! - Balance calculation by folding a user's operations
//! - Business rule validation
//! - The statement store capability
//! - Per-user serialization of check-then-act mutations
//! - The statement service use cases

pub mod balance;
pub mod error;
pub mod locks;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

pub use balance::compute_balance;
pub use error::{StatementAction, StatementError, StoreError};
pub use locks::UserLocks;
pub use service::StatementService;
pub use store::StatementStore;
pub use types::{BalanceReport, NewOperation, Operation, OperationKind, TransferReceipt};
