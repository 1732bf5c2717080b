//! Runs the count and page queries of a filtered listing.
//!
//! The count and the page are two sequential reads against the storage
//! backend with no shared transaction. Under concurrent writes they may see
//! different snapshots, so `total_count` and `items` can disagree by the rows
//! written in between. That staleness is accepted: both values are consistent
//! with the store at the moment each query ran, and callers and tests must not
//! treat it as a defect.

use crate::query::errors::{QueryError, QueryResult};
use crate::query::filter::FilterSpec;
use crate::query::page::{PageRequest, PageResult};
use crate::query::predicate::{Predicate, build_predicates};
use crate::query::sort::SortSpec;
use crate::repository::errors::RepositoryResult;

/// Storage capability behind a listing of `T`: predicate-filtered counting
/// and predicate-filtered, sorted, offset/limit retrieval.
pub trait PageSource<T> {
    /// Number of rows matching every predicate.
    fn count_matching(&self, predicates: &[Predicate]) -> RepositoryResult<u64>;

    /// Rows matching every predicate, ordered by `sort` and its tiebreak,
    /// skipping `page.offset()` and returning at most `page.limit()`.
    fn fetch_page(
        &self,
        predicates: &[Predicate],
        sort: &SortSpec,
        page: &PageRequest,
    ) -> RepositoryResult<Vec<T>>;
}

pub struct PageQueryExecutor<'a, S: ?Sized> {
    source: &'a S,
    max_limit: u32,
}

impl<'a, S: ?Sized> PageQueryExecutor<'a, S> {
    pub fn new(source: &'a S, max_limit: u32) -> Self {
        Self { source, max_limit }
    }

    /// Counts and fetches one page using the very same predicate slice for
    /// both queries. The page query is skipped when the count fails or when
    /// the window starts past the last match.
    pub fn execute<T>(
        &self,
        predicates: &[Predicate],
        sort: &SortSpec,
        page: &PageRequest,
    ) -> QueryResult<PageResult<T>>
    where
        S: PageSource<T>,
    {
        if page.limit() > self.max_limit {
            return Err(QueryError::InvalidPageRequest(format!(
                "limit {} exceeds the maximum of {}",
                page.limit(),
                self.max_limit
            )));
        }

        let total_count = self.source.count_matching(predicates).map_err(|err| {
            log::error!("Count query failed: {err}");
            QueryError::from(err)
        })?;

        if page.offset() >= total_count {
            log::debug!(
                "Page at offset {} is past the {total_count} matching rows",
                page.offset()
            );
            return Ok(PageResult::empty(total_count, *page));
        }

        let mut items = self
            .source
            .fetch_page(predicates, sort, page)
            .map_err(|err| {
                log::error!("Page query failed: {err}");
                QueryError::from(err)
            })?;

        let limit = page.limit() as usize;
        if items.len() > limit {
            log::warn!(
                "Storage returned {} rows for a page of {limit}; truncating",
                items.len()
            );
            items.truncate(limit);
        }

        Ok(PageResult::new(items, total_count, *page))
    }
}

/// Lists one page of a filtered listing: derives the predicates once and runs
/// the count and page queries with them.
pub fn list_filtered<T, S>(
    source: &S,
    filters: &FilterSpec,
    sort: &SortSpec,
    page: &PageRequest,
    max_limit: u32,
) -> QueryResult<PageResult<T>>
where
    S: PageSource<T> + ?Sized,
{
    let listing = filters.listing();
    if listing.sort_field(sort.field()).is_none() || listing.sort_field(sort.tiebreak()).is_none() {
        return Err(QueryError::InvalidSort(format!(
            "{} cannot be sorted by `{}`",
            listing.name,
            sort.field()
        )));
    }

    let predicates = build_predicates(filters)?;
    log::debug!(
        "Listing {} with {} predicate(s), order {sort}, offset {} limit {}",
        listing.name,
        predicates.len(),
        page.offset(),
        page.limit()
    );

    PageQueryExecutor::new(source, max_limit).execute(&predicates, sort, page)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::query::listing::{MAINTENANCE_RECORDS, VEHICLES};
    use crate::query::page::DEFAULT_MAX_LIMIT;
    use crate::query::predicate::{Literal, Operator};
    use crate::query::sort::SortDirection;
    use crate::repository::errors::RepositoryError;

    /// Serves a fixed list of integers, records every predicate slice it is
    /// asked about and can be told to fail.
    #[derive(Default)]
    struct FakeSource {
        rows: Vec<i32>,
        fail_count: bool,
        fail_fetch: bool,
        count_calls: RefCell<Vec<Vec<Predicate>>>,
        fetch_calls: RefCell<Vec<Vec<Predicate>>>,
    }

    impl PageSource<i32> for FakeSource {
        fn count_matching(&self, predicates: &[Predicate]) -> RepositoryResult<u64> {
            self.count_calls.borrow_mut().push(predicates.to_vec());
            if self.fail_count {
                return Err(RepositoryError::ConnectionError("timed out".into()));
            }
            Ok(self.rows.len() as u64)
        }

        fn fetch_page(
            &self,
            predicates: &[Predicate],
            _sort: &SortSpec,
            page: &PageRequest,
        ) -> RepositoryResult<Vec<i32>> {
            self.fetch_calls.borrow_mut().push(predicates.to_vec());
            if self.fail_fetch {
                return Err(RepositoryError::DatabaseError("disk I/O error".into()));
            }
            Ok(self
                .rows
                .iter()
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .copied()
                .collect())
        }
    }

    fn scope(id: i32) -> Vec<Predicate> {
        vec![Predicate::new("vehicle_id", Operator::Equals, Literal::Integer(id))]
    }

    #[test]
    fn count_and_page_receive_identical_predicates() {
        let source = FakeSource {
            rows: vec![1, 2, 3],
            ..FakeSource::default()
        };
        let spec = FilterSpec::new(&MAINTENANCE_RECORDS, 7)
            .with("type", Some("OIL_CHANGE"))
            .unwrap();
        let page = PageRequest::new(0, 2, DEFAULT_MAX_LIMIT).unwrap();

        let result: PageResult<i32> = list_filtered(
            &source,
            &spec,
            &MAINTENANCE_RECORDS.default_sort,
            &page,
            DEFAULT_MAX_LIMIT,
        )
        .unwrap();

        assert_eq!(result.items, vec![1, 2]);
        assert_eq!(result.total_count, 3);
        assert_eq!(result.page, page);
        let counted = source.count_calls.borrow();
        let fetched = source.fetch_calls.borrow();
        assert_eq!(counted.len(), 1);
        assert_eq!(*counted, *fetched);
        assert_eq!(counted[0].len(), 2);
    }

    #[test]
    fn page_past_the_end_is_empty_with_accurate_total() {
        let source = FakeSource {
            rows: vec![1, 2, 3],
            ..FakeSource::default()
        };
        let executor = PageQueryExecutor::new(&source, DEFAULT_MAX_LIMIT);
        let sort = MAINTENANCE_RECORDS.default_sort;

        let first: PageResult<i32> = executor
            .execute(&scope(7), &sort, &PageRequest::new(0, 2, 100).unwrap())
            .unwrap();
        let past: PageResult<i32> = executor
            .execute(&scope(7), &sort, &PageRequest::new(3, 2, 100).unwrap())
            .unwrap();

        assert!(past.items.is_empty());
        assert_eq!(past.total_count, first.total_count);
        assert_eq!(source.fetch_calls.borrow().len(), 1);
    }

    #[test]
    fn items_never_exceed_the_limit() {
        let source = FakeSource {
            rows: (1..=50).collect(),
            ..FakeSource::default()
        };
        let executor = PageQueryExecutor::new(&source, DEFAULT_MAX_LIMIT);
        for limit in [1, 7, 10, 49, 50, 100] {
            for offset in [0, 5, 45] {
                let page = PageRequest::new(offset, limit, DEFAULT_MAX_LIMIT).unwrap();
                let result: PageResult<i32> = executor
                    .execute(&scope(1), &MAINTENANCE_RECORDS.default_sort, &page)
                    .unwrap();
                assert!(result.items.len() <= limit as usize);
                assert_eq!(result.total_count, 50);
            }
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let source = FakeSource {
            rows: vec![4, 5, 6, 7],
            ..FakeSource::default()
        };
        let spec = FilterSpec::new(&MAINTENANCE_RECORDS, 7);
        let page = PageRequest::new(1, 2, 100).unwrap();
        let sort = MAINTENANCE_RECORDS.default_sort;

        let first: PageResult<i32> = list_filtered(&source, &spec, &sort, &page, 100).unwrap();
        let second: PageResult<i32> = list_filtered(&source, &spec, &sort, &page, 100).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn limit_above_executor_maximum_is_rejected() {
        let source = FakeSource::default();
        let page = PageRequest::new(0, 50, 100).unwrap();
        let result: QueryResult<PageResult<i32>> = PageQueryExecutor::new(&source, 20).execute(
            &scope(1),
            &MAINTENANCE_RECORDS.default_sort,
            &page,
        );
        assert!(matches!(result, Err(QueryError::InvalidPageRequest(_))));
        assert!(source.count_calls.borrow().is_empty());
    }

    #[test]
    fn failed_count_never_starts_the_page_query() {
        let source = FakeSource {
            rows: vec![1],
            fail_count: true,
            ..FakeSource::default()
        };
        let result: QueryResult<PageResult<i32>> = PageQueryExecutor::new(&source, 100).execute(
            &scope(1),
            &MAINTENANCE_RECORDS.default_sort,
            &PageRequest::new(0, 10, 100).unwrap(),
        );
        assert!(matches!(result, Err(QueryError::StorageUnavailable(_))));
        assert!(source.fetch_calls.borrow().is_empty());
    }

    #[test]
    fn failed_page_query_returns_no_partial_result() {
        let source = FakeSource {
            rows: vec![1, 2],
            fail_fetch: true,
            ..FakeSource::default()
        };
        let result: QueryResult<PageResult<i32>> = PageQueryExecutor::new(&source, 100).execute(
            &scope(1),
            &MAINTENANCE_RECORDS.default_sort,
            &PageRequest::new(0, 10, 100).unwrap(),
        );
        assert!(matches!(result, Err(QueryError::StorageUnavailable(_))));
    }

    #[test]
    fn sort_must_belong_to_the_listing() {
        let source = FakeSource::default();
        let foreign = SortSpec::new("kilometers_travelled", SortDirection::Asc, "id");
        let result: QueryResult<PageResult<i32>> = list_filtered(
            &source,
            &FilterSpec::new(&MAINTENANCE_RECORDS, 1),
            &foreign,
            &PageRequest::new(0, 10, 100).unwrap(),
            100,
        );
        assert!(matches!(result, Err(QueryError::InvalidSort(_))));

        let own = VEHICLES.default_sort;
        let result: QueryResult<PageResult<i32>> = list_filtered(
            &source,
            &FilterSpec::new(&VEHICLES, 1),
            &own,
            &PageRequest::new(0, 10, 100).unwrap(),
            100,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn invalid_filter_value_stops_before_storage() {
        let source = FakeSource::default();
        let spec = FilterSpec::new(&MAINTENANCE_RECORDS, 1)
            .with("to", Some("31/12/2024"))
            .unwrap();
        let result: QueryResult<PageResult<i32>> = list_filtered(
            &source,
            &spec,
            &MAINTENANCE_RECORDS.default_sort,
            &PageRequest::new(0, 10, 100).unwrap(),
            100,
        );
        assert!(matches!(result, Err(QueryError::InvalidFilterValue { .. })));
        assert!(source.count_calls.borrow().is_empty());
    }
}
