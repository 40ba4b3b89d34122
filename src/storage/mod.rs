//! Browser-style key-value storage.
//!
//! Two scopes exist, matching what a browser offers: a session scope that
//! survives a redirect within the tab, and a longer-lived local scope. Raw
//! stores report failures; callers on the navigation path go through
//! [`BestEffortStore`], which turns every failure into a logged no-op.

mod file;
mod memory;

use std::fmt;
use std::sync::Arc;

use crate::error::StorageError;

pub use file::FileStore;
pub use memory::{MemoryStore, UnavailableStore};

/// Session key holding the return destination captured on denial.
pub const RETURN_TO_KEY: &str = "unauthorizedReturnTo";
/// Local key holding the raw `redirect_uri` captured on the sign-in page.
pub const OAUTH_REDIRECT_KEY: &str = "oauth_redirect";

/// Injectable key-value capability.
///
/// `set` must only return once the value is visible to a later `get`, since
/// the next navigation reads what the guard wrote right before redirecting.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    Session,
    Local,
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Wrapper that never lets a storage failure escape.
#[derive(Clone, Copy)]
pub struct BestEffortStore<'a> {
    inner: &'a dyn KeyValueStore,
    scope: StorageScope,
}

impl<'a> BestEffortStore<'a> {
    pub fn new(inner: &'a dyn KeyValueStore, scope: StorageScope) -> Self {
        Self { inner, scope }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match self.inner.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(scope = %self.scope, key, %err, "storage read failed; ignoring");
                None
            }
        }
    }

    /// Returns whether the write went through.
    pub fn set(&self, key: &str, value: &str) -> bool {
        match self.inner.set(key, value) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(scope = %self.scope, key, %err, "storage write failed; ignoring");
                false
            }
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(err) = self.inner.remove(key) {
            tracing::debug!(scope = %self.scope, key, %err, "storage remove failed; ignoring");
        }
    }

    /// Read a value and clear it.
    pub fn take(&self, key: &str) -> Option<String> {
        let value = self.get(key);
        self.remove(key);
        value
    }
}

/// The pair of stores a page can reach.
#[derive(Clone)]
pub struct BrowserStorage {
    session: Arc<dyn KeyValueStore>,
    local: Arc<dyn KeyValueStore>,
}

impl BrowserStorage {
    pub fn new(session: Arc<dyn KeyValueStore>, local: Arc<dyn KeyValueStore>) -> Self {
        Self { session, local }
    }

    /// Fresh in-memory stores for both scopes.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()), Arc::new(MemoryStore::default()))
    }

    /// Both scopes report storage as disabled.
    pub fn unavailable() -> Self {
        Self::new(Arc::new(UnavailableStore), Arc::new(UnavailableStore))
    }

    pub fn session(&self) -> BestEffortStore<'_> {
        BestEffortStore::new(self.session.as_ref(), StorageScope::Session)
    }

    pub fn local(&self) -> BestEffortStore<'_> {
        BestEffortStore::new(self.local.as_ref(), StorageScope::Local)
    }
}

impl fmt::Debug for BrowserStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserStorage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_effort_take_reads_then_clears() {
        let store = MemoryStore::default();
        store.set(RETURN_TO_KEY, "https://a.test").expect("set");
        let wrapped = BestEffortStore::new(&store, StorageScope::Session);
        assert_eq!(wrapped.take(RETURN_TO_KEY).as_deref(), Some("https://a.test"));
        assert_eq!(wrapped.take(RETURN_TO_KEY), None);
    }

    // Verifies every operation on disabled storage degrades to a no-op.
    #[test]
    fn best_effort_swallows_unavailable_storage() {
        let wrapped = BestEffortStore::new(&UnavailableStore, StorageScope::Local);
        assert!(!wrapped.set(OAUTH_REDIRECT_KEY, "/cb"));
        assert_eq!(wrapped.get(OAUTH_REDIRECT_KEY), None);
        wrapped.remove(OAUTH_REDIRECT_KEY);
        assert_eq!(wrapped.take(OAUTH_REDIRECT_KEY), None);
    }

    #[test]
    fn browser_storage_scopes_are_independent() {
        let storage = BrowserStorage::in_memory();
        assert!(storage.session().set("k", "session"));
        assert!(storage.local().set("k", "local"));
        assert_eq!(storage.session().get("k").as_deref(), Some("session"));
        assert_eq!(storage.local().get("k").as_deref(), Some("local"));
    }

    #[test]
    fn last_write_wins() {
        let storage = BrowserStorage::in_memory();
        storage.session().set(RETURN_TO_KEY, "https://a.test");
        storage.session().set(RETURN_TO_KEY, "https://b.test");
        assert_eq!(storage.session().get(RETURN_TO_KEY).as_deref(), Some("https://b.test"));
    }
}
