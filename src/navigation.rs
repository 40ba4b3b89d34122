//! Navigation outcomes produced by the gate.

use serde::Serialize;

use crate::denial::UnauthorizedView;
use crate::location::NavigationState;
use crate::login::LoginView;

/// Client-side redirect to another route of this app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<NavigationState>,
    /// Replace the current history entry instead of pushing.
    pub replace: bool,
}

/// View the router renders for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Login(LoginView),
    Unauthorized(UnauthorizedView),
}

/// What the browser should do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Navigation {
    Render { view: View },
    Redirect(Redirect),
    /// Full-page navigation to an absolute URL outside this app.
    External { url: String },
    /// Nothing to do; the current view stays.
    Stay,
}

impl Navigation {
    pub fn external(url: impl Into<String>) -> Self {
        Self::External { url: url.into() }
    }

    pub fn render(view: View) -> Self {
        Self::Render { view }
    }
}
