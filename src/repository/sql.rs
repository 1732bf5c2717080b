//! Helpers shared by the per-table predicate translations.

use crate::query::page::PageRequest;
use crate::query::predicate::Predicate;
use crate::query::sort::SortSpec;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Escape character used with `LIKE ... ESCAPE`.
pub(crate) const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `needle` anywhere in `lower(column)`.
/// The needle is case-folded and its own wildcard characters are escaped.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn unsupported(table: &str, predicate: &Predicate) -> RepositoryError {
    RepositoryError::UnsupportedPredicate(format!("{table}: {predicate}"))
}

pub(crate) fn unsupported_sort(table: &str, sort: &SortSpec) -> RepositoryError {
    RepositoryError::UnsupportedPredicate(format!("{table}: cannot order by {sort}"))
}

/// `(offset, limit)` as the signed integers SQL expects.
pub(crate) fn window(page: &PageRequest) -> RepositoryResult<(i64, i64)> {
    let offset = i64::try_from(page.offset()).map_err(|_| {
        RepositoryError::ValidationError(format!("offset {} is out of range", page.offset()))
    })?;
    Ok((offset, i64::from(page.limit())))
}

pub(crate) fn count_to_u64(count: i64) -> RepositoryResult<u64> {
    u64::try_from(count)
        .map_err(|_| RepositoryError::DatabaseError(format!("negative row count {count}")))
}
