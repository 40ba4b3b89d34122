//! Cerberus gate: navigation decisions for an OAuth sign-in front end.
//!
//! The gate decides whether the sign-in page may be shown, remembers where a
//! refused visitor came from, and works out where a signed-in user goes next.
//! It never validates OAuth itself and never decides whether credentials are
//! good; both arrive from outside.
//!
//! # Quick start
//!
//! ```
//! use cerberus_gate::config::IssuerBaseUrl;
//! use cerberus_gate::location::{Location, PageContext};
//! use cerberus_gate::navigation::Navigation;
//! use cerberus_gate::router::Router;
//! use cerberus_gate::session::InMemorySession;
//! use cerberus_gate::storage::BrowserStorage;
//!
//! let issuer = IssuerBaseUrl::new("https://auth.example.com").unwrap();
//! let storage = BrowserStorage::in_memory();
//! let router = Router::new(&issuer, &storage);
//! let page = PageContext::new(Location::parse("https://login.example.com/login").unwrap(), None);
//! let nav = router.navigate(&page, &InMemorySession::new());
//! assert!(matches!(nav, Navigation::Redirect(_)));
//! ```

pub mod build_info;
pub mod config;
pub mod denial;
pub mod error;
pub mod guard;
pub mod location;
pub mod login;
pub mod navigation;
pub mod origin;
pub mod redirect;
pub mod router;
pub mod session;
pub mod storage;
#[cfg(test)]
pub mod testsupport;
