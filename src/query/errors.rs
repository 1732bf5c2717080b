use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Failures of a filtered listing call. No partial result accompanies an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid value for filter `{filter}`: {reason}")]
    InvalidFilterValue { filter: String, reason: String },

    #[error("invalid sort: {0}")]
    InvalidSort(String),

    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    pub(crate) fn invalid_filter(filter: &str, reason: impl Into<String>) -> Self {
        QueryError::InvalidFilterValue {
            filter: filter.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the caller supplied bad input, as opposed to a backend failure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, QueryError::StorageUnavailable(_))
    }
}

impl From<RepositoryError> for QueryError {
    fn from(err: RepositoryError) -> Self {
        QueryError::StorageUnavailable(err.to_string())
    }
}
