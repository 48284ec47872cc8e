//! Page-number pagination shared by every feed.
//!
//! A feed is cut into fixed-size pages numbered from 1. Requests that name a
//! page outside the valid range are clamped to the last page rather than
//! answered with an error or an empty page. Text that is not an integer
//! falls back to the first page.

use std::num::IntErrorKind;

use serde::Serialize;

/// Default number of posts per page.
pub const PAGE_SIZE: i64 = 10;

// ---------------------------------------------------------------------------
// Request parsing
// ---------------------------------------------------------------------------

/// A page number as requested by a client, before clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageRequest {
    /// No usable number was supplied; serve the first page.
    #[default]
    First,
    /// An explicit number, possibly out of range.
    Number(i64),
}

impl PageRequest {
    /// Interpret the raw `page` query value.
    ///
    /// - `None`, empty and non-integer text map to [`PageRequest::First`].
    /// - Integers that overflow `i64` are kept as out-of-range numbers so
    ///   they clamp to the last page like any other oversized request.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return PageRequest::First;
        };
        match raw.trim().parse::<i64>() {
            Ok(n) => PageRequest::Number(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => PageRequest::Number(i64::MAX),
                IntErrorKind::NegOverflow => PageRequest::Number(i64::MIN),
                _ => PageRequest::First,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Paginator
// ---------------------------------------------------------------------------

/// Slice of a listing to fetch from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number actually served.
    pub number: i64,
    pub offset: i64,
    pub limit: i64,
}

/// Page arithmetic for a listing of `total` items.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    total: i64,
    per_page: i64,
}

impl Paginator {
    /// `per_page` below 1 is treated as 1.
    pub fn new(total: i64, per_page: i64) -> Self {
        Self {
            total: total.max(0),
            per_page: per_page.max(1),
        }
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Number of pages. An empty listing still has one (empty) page.
    pub fn num_pages(&self) -> i64 {
        if self.total == 0 {
            1
        } else {
            (self.total - 1) / self.per_page + 1
        }
    }

    /// Resolve a request to the page that will be served.
    pub fn window(&self, request: PageRequest) -> PageWindow {
        let last = self.num_pages();
        let number = match request {
            PageRequest::First => 1,
            PageRequest::Number(n) if n < 1 || n > last => last,
            PageRequest::Number(n) => n,
        };
        PageWindow {
            number,
            offset: (number - 1) * self.per_page,
            limit: self.per_page,
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One page of an ordered listing together with its navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<i64>,
    pub previous_page_number: Option<i64>,
}

impl<T> Page<T> {
    /// Assemble a page from the items fetched for `window`.
    pub fn new(items: Vec<T>, window: PageWindow, paginator: &Paginator) -> Self {
        let total_pages = paginator.num_pages();
        let has_next = window.number < total_pages;
        let has_previous = window.number > 1;
        Self {
            items,
            number: window.number,
            total_pages,
            total_items: paginator.total(),
            has_next,
            has_previous,
            next_page_number: has_next.then(|| window.number + 1),
            previous_page_number: has_previous.then(|| window.number - 1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
