//! Sign-in page flow.
//!
//! On mount the page remembers the `redirect_uri` it was opened with, so the
//! value survives the round trip through the credential form. After a
//! successful sign-in the remembered value is consumed and resolved into the
//! final destination.

use serde::Serialize;

use crate::config::IssuerBaseUrl;
use crate::error::SessionError;
use crate::guard::REDIRECT_URI_PARAM;
use crate::location::PageContext;
use crate::navigation::Navigation;
use crate::redirect::resolve;
use crate::session::{Credentials, SessionCollaborator};
use crate::storage::{BrowserStorage, OAUTH_REDIRECT_KEY};

/// Content of the sign-in page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginView {
    /// Session check still in flight; show a spinner instead of the form.
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct LoginFlow<'a> {
    issuer: &'a IssuerBaseUrl,
    storage: &'a BrowserStorage,
}

impl<'a> LoginFlow<'a> {
    pub fn new(issuer: &'a IssuerBaseUrl, storage: &'a BrowserStorage) -> Self {
        Self { issuer, storage }
    }

    /// Capture the hand-off parameter and short-circuit already signed-in
    /// visitors.
    ///
    /// Returns an external navigation when the session is already
    /// authenticated and a non-empty `redirect_uri` is present.
    pub fn on_mount(
        &self,
        page: &PageContext,
        session: &dyn SessionCollaborator,
    ) -> Option<Navigation> {
        let redirect_uri = page
            .location
            .query_param(REDIRECT_URI_PARAM)
            .filter(|value| !value.is_empty())?;

        self.storage.local().set(OAUTH_REDIRECT_KEY, redirect_uri);

        if session.is_authenticated() {
            let target = resolve(self.issuer, Some(redirect_uri));
            tracing::info!(destination = target.as_str(), "already signed in; continuing hand-off");
            return Some(Navigation::external(target));
        }
        None
    }

    pub fn view(&self, session: &dyn SessionCollaborator, error: Option<String>) -> LoginView {
        LoginView {
            loading: session.is_loading(),
            error,
        }
    }

    /// Submit credentials and decide where to go next.
    ///
    /// On rejection the error's [`SessionError::user_message`] is meant for
    /// the form. On success the stored redirect wins; without one the
    /// session is refreshed and the page stays.
    pub async fn submit(
        &self,
        credentials: &Credentials,
        session: &dyn SessionCollaborator,
    ) -> Result<Navigation, SessionError> {
        let user = session.login(credentials).await?;
        tracing::debug!(user = user.id.as_str(), "sign-in accepted");

        if let Some(target) = self.finish_sign_in() {
            return Ok(Navigation::external(target));
        }
        session.check_auth().await;
        Ok(Navigation::Stay)
    }

    /// Consume the stored redirect and resolve it against the issuer.
    ///
    /// Returns `None` when nothing was stored or storage is unavailable.
    pub fn finish_sign_in(&self) -> Option<String> {
        let raw = self
            .storage
            .local()
            .take(OAUTH_REDIRECT_KEY)
            .filter(|value| !value.is_empty())?;
        Some(resolve(self.issuer, Some(&raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::session::{InMemorySession, User};

    fn issuer() -> IssuerBaseUrl {
        IssuerBaseUrl::new("https://auth.example.com").expect("issuer")
    }

    fn login_page(query: &str) -> PageContext {
        PageContext::new(
            Location::parse(&format!("https://login.example.com/login{query}")).expect("location"),
            None,
        )
    }

    fn alice() -> User {
        User::new("u-1", "alice@example.com", None)
    }

    fn creds(password: &str) -> Credentials {
        Credentials {
            email: "alice@example.com".into(),
            password: password.into(),
        }
    }

    #[test]
    fn mount_stores_redirect_for_anonymous_visitor() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let flow = LoginFlow::new(&issuer, &storage);
        let session = InMemorySession::new();

        let nav = flow.on_mount(&login_page("?redirect_uri=/authorize?client_id=abc"), &session);
        assert_eq!(nav, None);
        assert_eq!(
            storage.local().get(OAUTH_REDIRECT_KEY).as_deref(),
            Some("/authorize?client_id=abc")
        );
    }

    // Verifies an empty redirect_uri is admitted by the guard but never stored.
    #[test]
    fn mount_ignores_empty_redirect() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let flow = LoginFlow::new(&issuer, &storage);
        assert_eq!(flow.on_mount(&login_page("?redirect_uri="), &InMemorySession::new()), None);
        assert_eq!(storage.local().get(OAUTH_REDIRECT_KEY), None);
    }

    #[test]
    fn mount_redirects_signed_in_visitor_immediately() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let flow = LoginFlow::new(&issuer, &storage);
        let session = InMemorySession::new().signed_in(alice());

        let nav = flow.on_mount(&login_page("?redirect_uri=oauth/authorize"), &session);
        assert_eq!(
            nav,
            Some(Navigation::external("https://auth.example.com/oauth/authorize"))
        );
    }

    #[tokio::test]
    async fn submit_consumes_stored_redirect() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let flow = LoginFlow::new(&issuer, &storage);
        let session = InMemorySession::new().with_account(alice(), "pw");
        flow.on_mount(&login_page("?redirect_uri=%2Fauthorize%3Fclient_id%3Dabc"), &session);

        let nav = flow.submit(&creds("pw"), &session).await.expect("submit");
        assert_eq!(
            nav,
            Navigation::external("https://auth.example.com/authorize?client_id=abc")
        );
        assert_eq!(storage.local().get(OAUTH_REDIRECT_KEY), None);
    }

    #[tokio::test]
    async fn submit_without_redirect_refreshes_session() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let flow = LoginFlow::new(&issuer, &storage);
        let session = InMemorySession::new().with_account(alice(), "pw");

        let nav = flow.submit(&creds("pw"), &session).await.expect("submit");
        assert_eq!(nav, Navigation::Stay);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn rejected_submit_keeps_stored_redirect() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let flow = LoginFlow::new(&issuer, &storage);
        let session = InMemorySession::new().with_account(alice(), "pw");
        storage.local().set(OAUTH_REDIRECT_KEY, "https://client.test/cb");

        let err = flow.submit(&creds("wrong"), &session).await.expect_err("rejected");
        assert_eq!(err.user_message(), "Invalid email or password.");
        assert_eq!(
            storage.local().get(OAUTH_REDIRECT_KEY).as_deref(),
            Some("https://client.test/cb")
        );
    }

    #[test]
    fn finish_sign_in_without_storage_is_none() {
        let issuer = issuer();
        let storage = BrowserStorage::unavailable();
        let flow = LoginFlow::new(&issuer, &storage);
        assert_eq!(flow.finish_sign_in(), None);
    }

    #[test]
    fn view_reflects_loading_state() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let flow = LoginFlow::new(&issuer, &storage);
        let view = flow.view(&InMemorySession::new(), Some("bad".into()));
        assert!(view.loading);
        assert_eq!(view.error.as_deref(), Some("bad"));
    }
}
