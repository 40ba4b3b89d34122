//! Access-denied page model.

use serde::Serialize;

use crate::location::PageContext;
use crate::origin::recover_for_display;
use crate::storage::{BestEffortStore, RETURN_TO_KEY};

/// Content of the access-denied page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnauthorizedView {
    pub title: String,
    pub message: String,
    /// Where the "return" button sends the visitor.
    pub return_to: String,
}

/// Build the denial view for `page`.
///
/// The persisted return destination is consumed here: whichever source
/// wins, the storage key is cleared so a later denial starts fresh.
pub fn render(page: &PageContext, session: &BestEffortStore<'_>) -> UnauthorizedView {
    let return_to = recover_for_display(page, session);
    session.remove(RETURN_TO_KEY);
    tracing::debug!(return_to = return_to.as_str(), "rendering denial page");
    UnauthorizedView {
        title: "Access Denied".to_string(),
        message: "This page can only be accessed through an OAuth authorization flow.".to_string(),
        return_to,
    }
}
