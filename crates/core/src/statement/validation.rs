//! Business rule validation for statement operations.

use rust_decimal::Decimal;

use super::error::StatementError;

/// Validates that an amount is strictly positive.
///
/// Runs before any directory or store lookup, so a malformed request never
/// costs an I/O round trip.
///
/// # Errors
///
/// Returns `StatementError::InvalidAmount` for zero or negative amounts.
pub fn validate_amount(amount: Decimal) -> Result<(), StatementError> {
    if amount <= Decimal::ZERO {
        return Err(StatementError::InvalidAmount(amount));
    }
    Ok(())
}
