//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A limit/offset window over a list query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items to return.
    pub limit: i64,
    /// Number of items to skip.
    pub offset: i64,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_LIMIT: i64 = 20;
    /// The maximum allowed page size.
    pub const MAX_LIMIT: i64 = 100;

    /// Creates a page request, clamping the limit into `1..=MAX_LIMIT` and
    /// the offset to be non-negative.
    #[must_use]
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, Self::MAX_LIMIT),
            offset: offset.max(0),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        let page = PageRequest::new(0, -5);
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 0);

        let page = PageRequest::new(10_000, 40);
        assert_eq!(page.limit, PageRequest::MAX_LIMIT);
        assert_eq!(page.offset, 40);
    }
}
