//! Shared query parameter types for API handlers.

use serde::Deserialize;
use yatube_core::pagination::PageRequest;

/// Feed page selector (`?page=`).
///
/// Kept as raw text so that a malformed value falls back to the first page
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref())
    }
}

/// Query parameters of the login entry point (`?next=`).
#[derive(Debug, Default, Deserialize)]
pub struct NextParams {
    pub next: Option<String>,
}
