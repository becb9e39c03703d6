//! Pagination module
//!
//! The Datto API paginates with `_page` (1-based) and `_perPage` query
//! parameters and reports `pagination.totalPages` in the response body.
//!
//! # Overview
//!
//! - `FetchMode::All` follows pages 1..totalPages with 100 items per page
//! - `FetchMode::Limit(n)` fetches one page of `n` items
//! - A response without pagination metadata is always the last page

mod paginator;
mod types;

pub use paginator::Paginator;
pub(crate) use types::whole_number;
pub use types::{
    take_items, total_pages, FetchMode, PageCursor, PagedItems, DEFAULT_LIMIT,
    FULL_FETCH_PAGE_SIZE, MAX_PAGES, ORDER_PARAM, PAGE_PARAM, PER_PAGE_PARAM, SORT_PARAM,
};
