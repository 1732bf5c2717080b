use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::query::QueryError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Whether the failure was caused by the caller's request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Internal(_))
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<QueryError> for ServiceError {
    fn from(err: QueryError) -> Self {
        if err.is_client_error() {
            ServiceError::InvalidInput(err.to_string())
        } else {
            ServiceError::Internal(err.to_string())
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_are_classified() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConstraintViolation("dup".into())),
            ServiceError::Conflict(_)
        ));
        let internal = ServiceError::from(RepositoryError::ConnectionError("timeout".into()));
        assert!(!internal.is_client_error());
    }

    #[test]
    fn query_errors_keep_their_client_classification() {
        let bad_page = ServiceError::from(QueryError::InvalidPageRequest("limit".into()));
        assert!(matches!(bad_page, ServiceError::InvalidInput(_)));

        let storage = ServiceError::from(QueryError::StorageUnavailable("down".into()));
        assert!(matches!(storage, ServiceError::Internal(_)));
    }
}
