use serde::Serialize;

use crate::query::errors::{QueryError, QueryResult};

/// Upper bound on the page size when no configuration overrides it.
pub const DEFAULT_MAX_LIMIT: u32 = 100;

/// Validated `(offset, limit)` window into a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
    offset: u64,
    limit: u32,
}

impl PageRequest {
    /// Builds a window, rejecting a negative offset, a non-positive limit or a
    /// limit above `max_limit`.
    pub fn new(offset: i64, limit: i64, max_limit: u32) -> QueryResult<Self> {
        if offset < 0 {
            return Err(QueryError::InvalidPageRequest(format!(
                "offset must not be negative, got {offset}"
            )));
        }
        if limit <= 0 {
            return Err(QueryError::InvalidPageRequest(format!(
                "limit must be positive, got {limit}"
            )));
        }
        if limit > i64::from(max_limit) {
            return Err(QueryError::InvalidPageRequest(format!(
                "limit {limit} exceeds the maximum of {max_limit}"
            )));
        }

        Ok(Self {
            offset: offset as u64,
            limit: limit as u32,
        })
    }

    /// Builds a window from a zero-based page index and a page size.
    pub fn from_page(page: i64, size: i64, max_limit: u32) -> QueryResult<Self> {
        if page < 0 {
            return Err(QueryError::InvalidPageRequest(format!(
                "page must not be negative, got {page}"
            )));
        }
        let offset = page.checked_mul(size.max(0)).ok_or_else(|| {
            QueryError::InvalidPageRequest(format!("page {page} is out of range"))
        })?;
        Self::new(offset, size, max_limit)
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Zero-based index of the page this window starts in.
    pub fn page_index(&self) -> u64 {
        self.offset / u64::from(self.limit)
    }
}

/// One page of a listing together with the total number of matching rows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: PageRequest,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, page: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page,
        }
    }

    /// An empty page that still reports the accurate total.
    pub fn empty(total_count: u64, page: PageRequest) -> Self {
        Self::new(Vec::new(), total_count, page)
    }

    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.page.limit()))
    }

    pub fn is_first(&self) -> bool {
        self.page.offset() == 0
    }

    pub fn is_last(&self) -> bool {
        self.page.offset() + u64::from(self.page.limit()) >= self.total_count
    }

    /// Converts the items, keeping the count and window untouched.
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_bounds_requests() {
        assert!(matches!(
            PageRequest::new(0, 0, 100),
            Err(QueryError::InvalidPageRequest(_))
        ));
        assert!(matches!(
            PageRequest::new(-1, 10, 100),
            Err(QueryError::InvalidPageRequest(_))
        ));
        assert!(matches!(
            PageRequest::new(0, 101, 100),
            Err(QueryError::InvalidPageRequest(_))
        ));
        assert!(PageRequest::new(0, 100, 100).is_ok());
    }

    #[test]
    fn page_index_maps_to_offset() {
        let page = PageRequest::from_page(3, 20, 100).unwrap();
        assert_eq!(page.offset(), 60);
        assert_eq!(page.limit(), 20);
        assert_eq!(page.page_index(), 3);
        assert!(PageRequest::from_page(-1, 20, 100).is_err());
        assert!(PageRequest::from_page(i64::MAX, 20, 100).is_err());
    }

    #[test]
    fn result_reports_page_position() {
        let page = PageRequest::new(2, 2, 100).unwrap();
        let result = PageResult::new(vec![5], 3, page);
        assert_eq!(result.total_pages(), 2);
        assert!(!result.is_first());
        assert!(result.is_last());

        let mapped = result.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["5".to_string()]);
        assert_eq!(mapped.total_count, 3);
    }
}
