//! Post validation, edit authorization, and display helpers.
//!
//! This module lives in `core` (zero internal deps) so the store, the HTTP
//! layer and any future tooling apply the same rules.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Message attached to a rejected empty submission.
pub const EMPTY_FORM_MESSAGE: &str = "empty form";

/// Default number of characters of post text shown as the detail page title.
pub const DEFAULT_TITLE_MAX_CHARS: usize = 30;

/// Number of characters used for the short textual label of a post.
pub const LABEL_CHARS: usize = 15;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate submitted post text.
///
/// Only a zero-length string is rejected. Whitespace is not trimmed, so a
/// body made of spaces passes.
pub fn validate_post_text(text: &str) -> Result<(), CoreError> {
    if text.is_empty() {
        return Err(CoreError::Validation(EMPTY_FORM_MESSAGE.into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Whether `requester_id` may edit a post written by `author_id`.
pub fn can_edit(requester_id: DbId, author_id: DbId) -> bool {
    requester_id == author_id
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Leading `max_chars` characters of `text`, cut on a char boundary.
pub fn post_title(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Short label for a post, used in log lines.
pub fn post_label(text: &str) -> String {
    post_title(text, LABEL_CHARS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
