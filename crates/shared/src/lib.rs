//! Shared types for finledger.
//!
//! This crate provides the common types used across all other crates:
//! - Typed IDs for type-safe entity references

pub mod types;

pub use types::{OperationId, UserId};
