//! Pagination extractor.

use quill_core::PageRequest;
use serde::Deserialize;

/// Query parameters for limit/offset pagination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::new(
            query.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
            query.offset.unwrap_or(0),
        )
    }
}
