//! Path builders for redirects and links.
//!
//! Every returned string is safe to place in a `Location` header.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use yatube_core::types::DbId;

/// Characters left as-is in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'@')
    .remove(b'+');

/// Characters left as-is in the `next` query value: `/` stays readable.
const NEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

pub fn index_path() -> String {
    "/".to_string()
}

pub fn profile_path(username: &str) -> String {
    format!("/profile/{}/", utf8_percent_encode(username, SEGMENT))
}

pub fn post_path(post_id: DbId) -> String {
    format!("/posts/{post_id}/")
}

pub fn post_edit_path(post_id: DbId) -> String {
    format!("/posts/{post_id}/edit/")
}

/// Login entry point carrying `next` as the return path.
pub fn login_redirect(login_url: &str, next: &str) -> String {
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!(
        "{login_url}{separator}next={}",
        utf8_percent_encode(next, NEXT)
    )
}
