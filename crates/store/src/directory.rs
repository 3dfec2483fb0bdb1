//! In-memory user directory.
//!
//! Registration and authentication live outside the statement core; this
//! directory exists so tests and embedders can seed users and hand the core
//! a lookup capability.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use finledger_core::directory::{DirectoryError, User, UserDirectory};
use finledger_shared::UserId;

/// User directory backed by a map.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a new user and returns the created record.
    ///
    /// Emails are unique: seeding a second user with an email already in
    /// the directory is refused. The password is stored as given; hashing
    /// is the registration subsystem's concern, not the directory's.
    pub fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, DirectoryError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| DirectoryError("directory lock poisoned".to_string()))?;
        if users.values().any(|existing| existing.email == email) {
            return Err(DirectoryError(format!("email already registered: {email}")));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DirectoryError> {
        let users = self
            .users
            .read()
            .map_err(|_| DirectoryError("directory lock poisoned".to_string()))?;
        Ok(users.get(&id).cloned())
    }
}
