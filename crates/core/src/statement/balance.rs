//! Balance calculation.
//!
//! A balance is never stored; it is derived by folding the user's statement.
//! Deposits and incoming transfer legs add, withdrawals and outgoing
//! transfer legs subtract.

use rust_decimal::Decimal;

use super::types::Operation;

/// Computes the balance over a statement in one pass.
#[must_use]
pub fn compute_balance(operations: &[Operation]) -> Decimal {
    operations.iter().map(Operation::signed_amount).sum()
}
