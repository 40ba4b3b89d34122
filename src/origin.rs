//! Return-origin recovery.
//!
//! Two call sites need "where should the visitor go back to": the guard when
//! it denies access, and the denial page when it renders its return button.
//! They consult different sources in different orders, but both walk an
//! ordered list and keep the first candidate that yields a usable origin.
//! That walk is [`first_usable`]; the two orderings are [`recover`] and
//! [`recover_for_display`].

use url::Url;

use crate::location::PageContext;
use crate::storage::{BestEffortStore, RETURN_TO_KEY};

/// Lazily evaluated candidate source.
///
/// Producers are only run until one succeeds, so sources with side effects
/// (a read-once storage key) are not touched when an earlier source wins.
pub type Producer<'a> = Box<dyn FnOnce() -> Option<String> + 'a>;

/// Run producers in order and return the first value `usable` accepts.
///
/// Producers yielding `None`, and values the predicate rejects, are skipped.
pub fn first_usable<'a, I, P>(producers: I, usable: P) -> Option<String>
where
    I: IntoIterator<Item = Producer<'a>>,
    P: Fn(&str) -> Option<String>,
{
    producers
        .into_iter()
        .filter_map(|produce| produce())
        .find_map(|candidate| usable(&candidate))
}

/// Origin (scheme, host, port) of `candidate`, resolving relative forms
/// against `base`.
///
/// Rejects blank input, control characters, relative values with embedded
/// whitespace, and URLs whose origin is opaque (`data:`, `about:`, ...).
/// Absolute URLs may carry unencoded spaces; the parser encodes them.
pub fn origin_of(candidate: &str, base: Option<&Url>) -> Option<String> {
    let trimmed = candidate.trim();
    let malformed = trimmed.chars().any(char::is_control)
        || (!has_scheme(trimmed) && trimmed.chars().any(char::is_whitespace));
    if trimmed.is_empty() || malformed {
        tracing::trace!(candidate, "skipping malformed return candidate");
        return None;
    }

    let parsed = match Url::options().base_url(base).parse(trimmed) {
        Ok(url) => url,
        Err(err) => {
            tracing::trace!(%err, candidate, "skipping unparseable return candidate");
            return None;
        }
    };

    let origin = parsed.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(origin.ascii_serialization())
}

/// Whether `value` starts with `scheme:` per RFC 3986.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Recover the origin a denied visitor came from.
///
/// `candidates` are tried in order, each resolved against `base`. When none
/// yields an origin, `current_origin` is returned.
pub fn recover(candidates: &[Option<&str>], base: Option<&Url>, current_origin: &str) -> String {
    let producers = candidates.iter().map(|candidate| {
        let candidate = candidate.map(str::to_string);
        Box::new(move || candidate) as Producer<'static>
    });
    first_usable(producers, |candidate| origin_of(candidate, base))
        .unwrap_or_else(|| current_origin.to_string())
}

/// Guard-side ordering: referrer, then the `redirect_uri` value, then the
/// current address.
pub fn recover_on_denial(page: &PageContext, redirect_uri: Option<&str>) -> String {
    let location = &page.location;
    recover(
        &[page.referrer.as_deref(), redirect_uri, Some(location.href())],
        Some(location.url()),
        &location.origin(),
    )
}

/// Denial-page ordering: navigation state, persisted value, referrer, current
/// origin.
///
/// The persisted value is read once and cleared when its producer runs.
pub fn recover_for_display(page: &PageContext, session: &BestEffortStore<'_>) -> String {
    let location = &page.location;
    let base = location.url();
    let producers: Vec<Producer<'_>> = vec![
        Box::new(|| location.state().and_then(|state| state.from.clone())),
        Box::new(|| session.take(RETURN_TO_KEY)),
        Box::new(|| page.referrer.clone()),
        Box::new(|| Some(location.origin())),
    ];
    first_usable(producers, |candidate| origin_of(candidate, Some(base)))
        .unwrap_or_else(|| location.origin())
}
