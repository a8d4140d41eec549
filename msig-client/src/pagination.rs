use crate::models::Paginated;
use serde::Serialize;

/// Page metadata derived from the raw `offset`/`limit`/`total`/`more` fields of
/// a list request and its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    /// One-based page number.
    pub current_page: u64,
    pub page_size: u64,
    pub total_results: u64,
    pub total_pages: u64,
    /// As reported by the service, not recomputed from the counts.
    pub has_more: bool,
    pub has_previous: bool,
    /// `None` on the last page, or when the next offset would not fit in a `u64`.
    pub next_offset: Option<u64>,
    pub previous_offset: Option<u64>,
}

impl PaginationInfo {
    /// Derives page metadata.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    pub fn new(offset: u64, limit: u64, total: u64, more: bool) -> Self {
        let has_previous = offset > 0;
        Self {
            current_page: (offset / limit).saturating_add(1),
            page_size: limit,
            total_results: total,
            total_pages: total.div_ceil(limit),
            has_more: more,
            has_previous,
            next_offset: offset.checked_add(limit).filter(|_| more),
            previous_offset: has_previous.then(|| offset.saturating_sub(limit)),
        }
    }

    /// Derives page metadata for a list response fetched with `offset` and `limit`.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    pub fn for_page<P: Paginated>(response: &P, offset: u64, limit: u64) -> Self {
        Self::new(offset, limit, response.total(), response.more())
    }
}
