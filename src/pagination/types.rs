//! Pagination types
//!
//! Page cursor, fetch mode and the accumulated result of a paginated fetch.

use crate::http::RequestSpec;
use crate::types::JsonValue;

/// Query parameter carrying the 1-based page number
pub const PAGE_PARAM: &str = "_page";

/// Query parameter carrying the page size
pub const PER_PAGE_PARAM: &str = "_perPage";

/// Query parameter carrying the sort field
pub const SORT_PARAM: &str = "_sort";

/// Query parameter carrying the sort order
pub const ORDER_PARAM: &str = "_order";

/// Page size used when following every page
pub const FULL_FETCH_PAGE_SIZE: u32 = 100;

/// Upper bound on page requests in one full fetch
pub const MAX_PAGES: u32 = 500;

/// Page size used for bounded fetches when the caller gives no limit
pub const DEFAULT_LIMIT: u32 = 50;

/// How many results a list operation should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Follow every page until the API reports the last one
    All,
    /// Fetch one page of at most this many items
    Limit(u32),
}

impl FetchMode {
    /// Build a mode from the host's `returnAll` / `limit` pair
    pub fn from_params(return_all: bool, limit: Option<u32>) -> Self {
        if return_all {
            Self::All
        } else {
            Self::Limit(limit.unwrap_or(DEFAULT_LIMIT))
        }
    }

    /// Whether every page should be followed
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Position within a paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Current page, starting at 1
    pub page: u32,
    /// Page size, fixed for the whole fetch
    pub per_page: u32,
    /// Total pages as last reported by the API
    pub total_pages: Option<u32>,
}

impl PageCursor {
    /// Cursor positioned on the first page
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            total_pages: None,
        }
    }

    /// The request for the current page
    pub fn request(&self, base: &RequestSpec) -> RequestSpec {
        base.clone()
            .query(PAGE_PARAM, self.page)
            .query(PER_PAGE_PARAM, self.per_page)
    }

    /// Record the pagination metadata of a response
    pub fn observe(&mut self, body: &JsonValue) {
        self.total_pages = total_pages(body);
    }

    /// Whether another page follows the current one
    ///
    /// A response without `pagination.totalPages` is the only page.
    pub fn has_more(&self) -> bool {
        matches!(self.total_pages, Some(total) if self.page < total)
    }

    /// Move to the next page
    pub fn advance(&mut self) {
        self.page += 1;
    }
}

/// Items accumulated by a paginated fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedItems {
    /// Items in page-arrival order
    pub items: Vec<JsonValue>,
    /// Number of page requests issued
    pub pages_fetched: u32,
    /// True when the page cap stopped the fetch before the last page
    pub truncated: bool,
}

impl PagedItems {
    /// Consume into the item list
    pub fn into_items(self) -> Vec<JsonValue> {
        self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items were returned
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Read `pagination.totalPages` from a response body
pub fn total_pages(body: &JsonValue) -> Option<u32> {
    let value = body.get("pagination")?.get("totalPages")?;
    let total = match value {
        JsonValue::Number(n) => whole_number(n)?,
        JsonValue::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    Some(u32::try_from(total).unwrap_or(u32::MAX))
}

/// A non-negative integer, including integral floats such as `2.0`
pub(crate) fn whole_number(n: &serde_json::Number) -> Option<u64> {
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Take the `items` array out of a page body
///
/// A missing or non-array `items` counts as an empty page.
pub fn take_items(body: JsonValue) -> Vec<JsonValue> {
    match body {
        JsonValue::Object(mut map) => match map.remove("items") {
            Some(JsonValue::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
