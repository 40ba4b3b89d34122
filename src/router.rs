//! Route table.
//!
//! | Path            | Behaviour                                   |
//! |-----------------|---------------------------------------------|
//! | `/login`        | sign-in page, only reachable via OAuth hand-off |
//! | `/unauthorized` | access-denied page, always open             |
//! | anything else   | replaced by a redirect to `/unauthorized`   |
//!
//! Paths match case-insensitively and ignore trailing slashes.

use crate::config::IssuerBaseUrl;
use crate::denial;
use crate::guard::{RouteGuard, DENIAL_PATH};
use crate::location::PageContext;
use crate::login::LoginFlow;
use crate::navigation::{Navigation, Redirect, View};
use crate::session::SessionCollaborator;
use crate::storage::BrowserStorage;

pub const LOGIN_PATH: &str = "/login";

/// Upper bound on client-side redirects followed by [`Router::settle`].
const MAX_REDIRECT_HOPS: usize = 4;

pub struct Router<'a> {
    issuer: &'a IssuerBaseUrl,
    storage: &'a BrowserStorage,
    login_guard: RouteGuard,
}

impl<'a> Router<'a> {
    pub fn new(issuer: &'a IssuerBaseUrl, storage: &'a BrowserStorage) -> Self {
        Self {
            issuer,
            storage,
            login_guard: RouteGuard::oauth_only(),
        }
    }

    /// Decide what one navigation event to `page` produces.
    pub fn navigate(&self, page: &PageContext, session: &dyn SessionCollaborator) -> Navigation {
        let session_store = self.storage.session();
        let path = normalized_path(page.location.path());
        match route_of(path) {
            Route::Login => {
                let flow = LoginFlow::new(self.issuer, self.storage);
                let admitted = self.login_guard.guard(page, &session_store, || {
                    flow.on_mount(page, session)
                        .unwrap_or_else(|| Navigation::render(View::Login(flow.view(session, None))))
                });
                admitted.unwrap_or_else(Navigation::Redirect)
            }
            Route::Denial => Navigation::render(View::Unauthorized(denial::render(page, &session_store))),
            Route::Unknown => {
                tracing::debug!(path, "unknown route; redirecting to denial page");
                Navigation::Redirect(Redirect {
                    to: DENIAL_PATH.to_string(),
                    state: None,
                    replace: true,
                })
            }
        }
    }

    /// Navigate and follow client-side redirects until a terminal outcome.
    ///
    /// Returns the page the visitor ends up on together with its outcome.
    /// External navigations and renders are terminal.
    pub fn settle(
        &self,
        page: PageContext,
        session: &dyn SessionCollaborator,
    ) -> (PageContext, Navigation) {
        let mut current = page;
        let mut outcome = self.navigate(&current, session);
        for _ in 0..MAX_REDIRECT_HOPS {
            let Navigation::Redirect(redirect) = &outcome else {
                break;
            };
            let Some(next) = current.redirected(&redirect.to, redirect.state.clone()) else {
                break;
            };
            current = next;
            outcome = self.navigate(&current, session);
        }
        (current, outcome)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Login,
    Denial,
    Unknown,
}

fn route_of(path: &str) -> Route {
    if path.eq_ignore_ascii_case(LOGIN_PATH) {
        Route::Login
    } else if path.eq_ignore_ascii_case(DENIAL_PATH) {
        Route::Denial
    } else {
        Route::Unknown
    }
}

fn normalized_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Location, NavigationState};
    use crate::login::LoginView;
    use crate::session::InMemorySession;
    use crate::storage::RETURN_TO_KEY;

    fn page(href: &str) -> PageContext {
        PageContext::new(Location::parse(href).expect("location"), None)
    }

    fn issuer() -> IssuerBaseUrl {
        IssuerBaseUrl::new("https://auth.example.com").expect("issuer")
    }

    #[test]
    fn login_with_redirect_uri_renders_form() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let router = Router::new(&issuer, &storage);
        let nav = router.navigate(
            &page("https://login.test/login?redirect_uri=/authorize?client_id=abc"),
            &InMemorySession::new(),
        );
        assert_eq!(
            nav,
            Navigation::render(View::Login(LoginView {
                loading: true,
                error: None
            }))
        );
    }

    #[test]
    fn trailing_slash_matches_login_route() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let router = Router::new(&issuer, &storage);
        let nav = router.navigate(&page("https://login.test/login/"), &InMemorySession::new());
        assert!(matches!(nav, Navigation::Redirect(ref r) if r.to == "/unauthorized" && r.state.is_some()));
    }

    #[test]
    fn route_matching_ignores_case() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let router = Router::new(&issuer, &storage);
        let session = InMemorySession::new();

        let nav = router.navigate(&page("https://login.test/Login?redirect_uri=/cb"), &session);
        assert!(matches!(nav, Navigation::Render { view: View::Login(_) }), "got {nav:?}");

        let nav = router.navigate(&page("https://login.test/UNAUTHORIZED/"), &session);
        assert!(matches!(nav, Navigation::Render { view: View::Unauthorized(_) }), "got {nav:?}");
        assert_eq!(route_of("/loginx"), Route::Unknown);
    }

    #[test]
    fn unknown_route_redirects_without_state() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let router = Router::new(&issuer, &storage);
        let nav = router.navigate(&page("https://login.test/dashboard"), &InMemorySession::new());
        assert_eq!(
            nav,
            Navigation::Redirect(Redirect {
                to: "/unauthorized".into(),
                state: None,
                replace: true,
            })
        );
        assert_eq!(storage.session().get(RETURN_TO_KEY), None);
    }

    // Verifies a bare /login visit settles on the denial page pointing back at this origin.
    #[test]
    fn settle_follows_diversion_to_denial_page() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let router = Router::new(&issuer, &storage);
        let (landed, nav) = router.settle(page("https://login.test/login"), &InMemorySession::new());

        assert_eq!(landed.location.path(), "/unauthorized");
        assert_eq!(
            landed.location.state(),
            Some(&NavigationState::from_destination("https://login.test"))
        );
        match nav {
            Navigation::Render {
                view: View::Unauthorized(view),
            } => assert_eq!(view.return_to, "https://login.test"),
            other => panic!("expected denial page, got {other:?}"),
        }
        assert_eq!(storage.session().get(RETURN_TO_KEY), None);
    }

    #[test]
    fn settle_stops_on_external_navigation() {
        let issuer = issuer();
        let storage = BrowserStorage::in_memory();
        let router = Router::new(&issuer, &storage);
        let session = InMemorySession::new().signed_in(crate::session::User::new(
            "u-1",
            "alice@example.com",
            None,
        ));
        let (_, nav) = router.settle(page("https://login.test/login?redirect_uri=/authorize"), &session);
        assert_eq!(nav, Navigation::external("https://auth.example.com/authorize"));
    }
}
