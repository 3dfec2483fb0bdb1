//! Reference backends for the finledger capabilities.
//!
//! This crate provides:
//! - An in-memory statement store with atomic transfer appends
//! - An in-memory user directory
//!
//! Both are suitable for tests and for embedding the core without a
//! database; a transactional backend would implement the same traits.

pub mod directory;
pub mod memory;

pub use directory::MemoryUserDirectory;
pub use memory::MemoryStatementStore;
