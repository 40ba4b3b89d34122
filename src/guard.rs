//! Route admission guard.
//!
//! A guarded route is only shown when the visit came through an OAuth
//! authorization hand-off, signalled by a `redirect_uri` query parameter.
//! Anyone else is sent to the denial page, after the gate has remembered
//! where they came from so the denial page can offer a way back.
//!
//! Evaluation is a two-step state machine: `Evaluating` ends in either
//! [`GuardDecision::RenderChildren`] or [`GuardDecision::Diverting`]. There is
//! no failure state; storage and URL problems degrade instead.

use crate::location::{NavigationState, PageContext};
use crate::navigation::Redirect;
use crate::origin::recover_on_denial;
use crate::storage::{BestEffortStore, RETURN_TO_KEY};

/// Query parameter that marks an OAuth hand-off.
pub const REDIRECT_URI_PARAM: &str = "redirect_uri";
/// Route visitors are diverted to when admission is refused.
pub const DENIAL_PATH: &str = "/unauthorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    RenderChildren,
    Diverting(Redirect),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteGuard {
    require_oauth_redirect: bool,
}

impl RouteGuard {
    pub fn new(require_oauth_redirect: bool) -> Self {
        Self {
            require_oauth_redirect,
        }
    }

    /// Guard that only admits OAuth hand-off visits.
    pub fn oauth_only() -> Self {
        Self::new(true)
    }

    /// Decide whether `page` may render.
    ///
    /// Only the parameter's presence matters: `?redirect_uri=` is admitted.
    /// On diversion the recovered origin is written to session storage
    /// before the decision is returned, so the write happens-before the
    /// denial page's read.
    pub fn evaluate(&self, page: &PageContext, session: &BestEffortStore<'_>) -> GuardDecision {
        let location = &page.location;
        if !self.require_oauth_redirect || location.has_query_param(REDIRECT_URI_PARAM) {
            return GuardDecision::RenderChildren;
        }

        let return_to = recover_on_denial(page, location.query_param(REDIRECT_URI_PARAM));
        let usable = !return_to.is_empty() && return_to != "null";
        if usable && !session.set(RETURN_TO_KEY, &return_to) {
            tracing::debug!("return destination kept in navigation state only");
        }
        tracing::debug!(
            path = location.path(),
            return_to = return_to.as_str(),
            "no {REDIRECT_URI_PARAM} on guarded route; diverting"
        );

        GuardDecision::Diverting(Redirect {
            to: DENIAL_PATH.to_string(),
            state: usable.then(|| NavigationState::from_destination(return_to)),
            replace: true,
        })
    }

    /// Run `children` when admitted; otherwise hand back the redirect.
    pub fn guard<T>(
        &self,
        page: &PageContext,
        session: &BestEffortStore<'_>,
        children: impl FnOnce() -> T,
    ) -> Result<T, Redirect> {
        match self.evaluate(page, session) {
            GuardDecision::RenderChildren => Ok(children()),
            GuardDecision::Diverting(redirect) => Err(redirect),
        }
    }
}
