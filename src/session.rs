//! Session collaborator seam.
//!
//! The gate never decides whether a sign-in succeeds. It asks a
//! [`SessionCollaborator`] and reacts to the answer. Real deployments back
//! this with the identity server's session API; [`InMemorySession`] is the
//! self-contained implementation used by the CLI and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::SessionError;

/// Signed-in account as reported by the session backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl User {
    /// Build a user, falling back to the email when no display name is known.
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: Option<&str>) -> Self {
        let email = email.into();
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| email.clone());
        Self {
            id: id.into(),
            email,
            name,
        }
    }
}

/// Credentials submitted from the sign-in form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authentication state provider the gate depends on but does not own.
#[async_trait]
pub trait SessionCollaborator: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// True until the first session check has completed.
    fn is_loading(&self) -> bool;

    async fn login(&self, credentials: &Credentials) -> Result<User, SessionError>;

    /// Refresh the authentication state. Failures leave the visitor signed out.
    async fn check_auth(&self);
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    checked: bool,
}

/// Session backed by a fixed account table.
#[derive(Debug, Default)]
pub struct InMemorySession {
    accounts: BTreeMap<String, (String, User)>,
    state: Mutex<SessionState>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that `login` will accept.
    pub fn with_account(mut self, user: User, password: impl Into<String>) -> Self {
        self.accounts
            .insert(user.email.to_ascii_lowercase(), (password.into(), user));
        self
    }

    /// Start already signed in as `user`, as if a session cookie were present.
    pub fn signed_in(self, user: User) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.user = Some(user);
        }
        self
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user.clone()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // A poisoned lock only means a panicking test thread; the data is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionCollaborator for InMemorySession {
    fn is_authenticated(&self) -> bool {
        self.state().user.is_some()
    }

    fn is_loading(&self) -> bool {
        !self.state().checked
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, SessionError> {
        let key = credentials.email.trim().to_ascii_lowercase();
        let user = match self.accounts.get(&key) {
            Some((password, user)) if *password == credentials.password => user.clone(),
            _ => {
                return Err(SessionError::Rejected(Some(
                    "Invalid email or password.".to_string(),
                )))
            }
        };
        let mut state = self.state();
        state.user = Some(user.clone());
        state.checked = true;
        Ok(user)
    }

    async fn check_auth(&self) {
        self.state().checked = true;
    }
}
