//! Post-sign-in redirect target resolution.

use url::Url;

use crate::config::IssuerBaseUrl;

/// Resolve a raw redirect value into an absolute navigation target.
///
/// Absolute URLs come back in canonical form. Anything that fails to parse is
/// treated as a path on the issuer. Empty input yields the issuer itself.
pub fn resolve(issuer: &IssuerBaseUrl, candidate: Option<&str>) -> String {
    let Some(candidate) = candidate.filter(|value| !value.is_empty()) else {
        return issuer.as_str().to_string();
    };

    match Url::parse(candidate) {
        Ok(url) => url.to_string(),
        Err(err) => {
            tracing::trace!(%err, candidate, "redirect is not absolute; resolving against issuer");
            format!("{}{}", issuer.as_str(), ensure_leading_slash(candidate))
        }
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
