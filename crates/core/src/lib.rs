//! Core business logic for finledger.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `directory` - Read-only user lookup capability
//! - `statement` - Append-only ledger: operations, balances, transfers

pub mod directory;
pub mod statement;
