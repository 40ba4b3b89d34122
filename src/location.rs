//! Snapshot of the address the visitor is currently on.
//!
//! A [`Location`] is built once per navigation event and never mutated. It
//! mirrors what a browser router exposes: the path, the decoded query
//! parameters, and any state attached by a programmatic redirect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// State attached to a client-side redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Return destination captured when access was denied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl NavigationState {
    pub fn from_destination(destination: impl Into<String>) -> Self {
        Self {
            from: Some(destination.into()),
        }
    }
}

/// Immutable view of the current navigable address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
    /// Decoded query parameters; the first occurrence of a repeated key wins.
    query: BTreeMap<String, String>,
    state: Option<NavigationState>,
}

impl Location {
    /// Parse an absolute href into a location snapshot.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        Url::parse(href).map(Self::from_url)
    }

    pub fn from_url(url: Url) -> Self {
        let mut query = BTreeMap::new();
        for (key, value) in url.query_pairs() {
            query
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self {
            url,
            query,
            state: None,
        }
    }

    /// Same location with router state attached.
    pub fn with_state(mut self, state: Option<NavigationState>) -> Self {
        self.state = state;
        self
    }

    /// Resolve a same-origin path (`/unauthorized`) against this location.
    ///
    /// Returns `None` when `path` cannot be joined, which only happens for
    /// locations with opaque bases.
    pub fn navigate_to(&self, path: &str, state: Option<NavigationState>) -> Option<Self> {
        let next = self.url.join(path).ok()?;
        Some(Self::from_url(next).with_state(state))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Full address, equivalent to `window.location.href`.
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// ASCII-serialized origin; `"null"` for opaque origins.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn has_query_param(&self, name: &str) -> bool {
        self.query.contains_key(name)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn state(&self) -> Option<&NavigationState> {
        self.state.as_ref()
    }
}

/// Everything the browser exposes about the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub location: Location,
    /// `document.referrer`; `None` when the browser reports an empty string.
    pub referrer: Option<String>,
}

impl PageContext {
    pub fn new(location: Location, referrer: Option<String>) -> Self {
        Self {
            location,
            referrer: referrer.filter(|value| !value.trim().is_empty()),
        }
    }

    /// Follow a client-side redirect; the referrer is kept because a router
    /// push does not change `document.referrer`.
    pub fn redirected(&self, path: &str, state: Option<NavigationState>) -> Option<Self> {
        let location = self.location.navigate_to(path, state)?;
        Some(Self {
            location,
            referrer: self.referrer.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_query() {
        let loc = Location::parse("https://login.example.com/login?redirect_uri=%2Fcb&x=1")
            .expect("location");
        assert_eq!(loc.path(), "/login");
        assert_eq!(loc.query_param("redirect_uri"), Some("/cb"));
        assert_eq!(loc.query_param("x"), Some("1"));
        assert_eq!(loc.origin(), "https://login.example.com");
    }

    // Verifies an empty value still counts as a present parameter.
    #[test]
    fn empty_query_value_is_present() {
        let loc = Location::parse("https://login.example.com/login?redirect_uri=").expect("location");
        assert!(loc.has_query_param("redirect_uri"));
        assert_eq!(loc.query_param("redirect_uri"), Some(""));
    }

    // Verifies `?` inside a value stays part of the value, like URLSearchParams.
    #[test]
    fn nested_question_mark_stays_in_value() {
        let loc = Location::parse("https://login.example.com/login?redirect_uri=/authorize?client_id=abc")
            .expect("location");
        assert_eq!(
            loc.query_param("redirect_uri"),
            Some("/authorize?client_id=abc")
        );
    }

    #[test]
    fn repeated_key_keeps_first_value() {
        let loc = Location::parse("https://login.example.com/login?redirect_uri=a&redirect_uri=b")
            .expect("location");
        assert_eq!(loc.query_param("redirect_uri"), Some("a"));
    }

    #[test]
    fn navigate_to_keeps_origin_and_attaches_state() {
        let loc = Location::parse("https://login.example.com:8443/login?x=1").expect("location");
        let next = loc
            .navigate_to("/unauthorized", Some(NavigationState::from_destination("https://a.test")))
            .expect("joined");
        assert_eq!(next.href(), "https://login.example.com:8443/unauthorized");
        assert_eq!(
            next.state().and_then(|s| s.from.as_deref()),
            Some("https://a.test")
        );
        assert!(!next.has_query_param("x"));
    }

    #[test]
    fn blank_referrer_is_treated_as_absent() {
        let loc = Location::parse("https://login.example.com/").expect("location");
        assert_eq!(PageContext::new(loc, Some("  ".into())).referrer, None);
    }

    #[test]
    fn navigation_state_omits_missing_from_when_serialized() {
        let json = serde_json::to_string(&NavigationState::default()).expect("json");
        assert_eq!(json, "{}");
    }
}
