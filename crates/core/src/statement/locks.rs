//! Per-user serialization of check-then-act mutations.
//!
//! Reading a balance, deciding, then appending is a classic check-then-act
//! race: two concurrent debits can both observe the stale pre-debit balance
//! and jointly overdraw the account. Every mutation that reads-then-writes a
//! user's balance must run holding that user's lock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use finledger_shared::UserId;

/// Registry of per-user mutexes.
///
/// Locks are created lazily on first use and shared by handle, so all
/// callers debiting the same user contend on the same mutex. Each mutation
/// acquires exactly one lock (the paying user's), which rules out lock
/// ordering deadlocks.
///
/// Callers pair `acquire` with `release` once their handle is dropped, so
/// the registry tracks in-flight mutations rather than every user ever
/// debited.
#[derive(Debug, Default)]
pub struct UserLocks {
    inner: DashMap<UserId, Arc<Mutex<()>>>,
}

impl UserLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock handle for a user, creating it if needed.
    #[must_use]
    pub fn acquire(&self, user_id: UserId) -> Arc<Mutex<()>> {
        let entry = self
            .inner
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    }

    /// Drops the user's entry if no caller still holds a handle to it.
    ///
    /// `remove_if` checks the strong count under the shard lock, so a
    /// concurrent `acquire` cannot clone the handle between the check and
    /// the removal.
    pub fn release(&self, user_id: UserId) {
        self.inner
            .remove_if(&user_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.len()
    }
}
