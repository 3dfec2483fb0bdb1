//! Read-only user lookup capability.
//!
//! The directory is owned by a separate subsystem (registration, auth).
//! The statement core only ever resolves users by id and treats the
//! returned records as immutable reference data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use finledger_shared::UserId;

/// A user record as seen by the statement core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique across the directory).
    pub email: String,
    /// Password credential, opaque to the statement core.
    pub password_hash: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Failure while talking to the directory backend.
///
/// A missing user is not an error at this level; `find_by_id` returns
/// `Ok(None)` for that.
#[derive(Debug, Error)]
#[error("user directory failure: {0}")]
pub struct DirectoryError(pub String);

/// Resolves user identifiers to user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks up a user by id, returning `None` if absent.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DirectoryError>;
}
