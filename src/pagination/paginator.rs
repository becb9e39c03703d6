//! Page-following fetch
//!
//! Requests are issued strictly one after another; a failure on any page
//! aborts the fetch and drops what was accumulated.

use super::types::{
    take_items, FetchMode, PageCursor, PagedItems, FULL_FETCH_PAGE_SIZE, MAX_PAGES,
    PER_PAGE_PARAM,
};
use crate::error::Result;
use crate::http::{HttpClient, RequestSpec};
use tracing::{debug, warn};

/// Fetches list endpoints that use `_page`/`_perPage` pagination
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a> {
    client: &'a HttpClient,
    max_pages: u32,
}

impl<'a> Paginator<'a> {
    /// Create a paginator over the given client
    pub fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            max_pages: MAX_PAGES,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch according to the requested mode
    pub async fn fetch(&self, spec: &RequestSpec, mode: FetchMode) -> Result<PagedItems> {
        match mode {
            FetchMode::All => self.fetch_all(spec).await,
            FetchMode::Limit(limit) => self.fetch_limited(spec, limit).await,
        }
    }

    /// Follow every page, concatenating `items` in page order
    ///
    /// Stops after `MAX_PAGES` requests even if the API reports more pages;
    /// the result is then marked `truncated` and no error is raised.
    pub async fn fetch_all(&self, spec: &RequestSpec) -> Result<PagedItems> {
        let mut cursor = PageCursor::new(FULL_FETCH_PAGE_SIZE);
        let mut result = PagedItems::default();

        loop {
            let body = self.client.request(&cursor.request(spec)).await?;
            result.pages_fetched += 1;

            cursor.observe(&body);
            let page_items = take_items(body);
            debug!(
                path = %spec.path,
                page = cursor.page,
                total_pages = ?cursor.total_pages,
                count = page_items.len(),
                "Fetched page"
            );
            result.items.extend(page_items);

            if !cursor.has_more() {
                break;
            }

            if result.pages_fetched >= self.max_pages {
                warn!(
                    path = %spec.path,
                    pages = result.pages_fetched,
                    total_pages = ?cursor.total_pages,
                    items = result.items.len(),
                    "Page limit reached, returning partial results"
                );
                result.truncated = true;
                break;
            }

            cursor.advance();
        }

        Ok(result)
    }

    /// Fetch a single page of at most `limit` items
    pub async fn fetch_limited(&self, spec: &RequestSpec, limit: u32) -> Result<PagedItems> {
        let request = spec.clone().query(PER_PAGE_PARAM, limit);
        let body = self.client.request(&request).await?;
        let items = take_items(body);

        debug!(path = %spec.path, limit, count = items.len(), "Fetched bounded page");

        Ok(PagedItems {
            items,
            pages_fetched: 1,
            truncated: false,
        })
    }
}
