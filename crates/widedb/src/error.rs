use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use widedb_core::{
    Error as CoreError,
    db::{cursor::CursorError, query::QueryError, store::StoreError},
    error::{ErrorOrigin as CoreErrorOrigin, InternalError},
};

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// True when the storage collaborator failed; callers may retry later.
    #[must_use]
    pub const fn is_storage_unavailable(&self) -> bool {
        matches!(self.kind, ErrorKind::Store(StoreErrorKind::Unavailable))
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Cursor(err) => err.into(),
            CoreError::Query(err) => err.into(),
            CoreError::Store(err) => err.into(),
            CoreError::Internal(err) => err.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Self::new(ErrorKind::Internal, err.origin.into(), err.message)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::UnsupportedFilterCombination { .. } => Self::new(
                ErrorKind::Query(QueryErrorKind::UnsupportedFilter),
                ErrorOrigin::Query,
                err.to_string(),
            ),
        }
    }
}

impl From<CursorError> for Error {
    fn from(err: CursorError) -> Self {
        let kind = match err {
            CursorError::InvalidPageSize { .. } => QueryErrorKind::InvalidPageSize,
            CursorError::InvalidToken { .. }
            | CursorError::UnsupportedVersion { .. }
            | CursorError::SignatureMismatch { .. } => QueryErrorKind::InvalidCursor,
        };

        Self::new(ErrorKind::Query(kind), ErrorOrigin::Cursor, err.to_string())
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        let kind = match err {
            StoreError::Unavailable { .. } => StoreErrorKind::Unavailable,
            StoreError::InvalidStatement { .. } => StoreErrorKind::InvalidStatement,
        };

        Self::new(ErrorKind::Store(kind), ErrorOrigin::Store, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Query(QueryErrorKind),
    Store(StoreErrorKind),

    /// The caller cannot remediate this.
    Internal,
}

///
/// QueryErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// Page size is zero or above the configured maximum.
    InvalidPageSize,

    /// Cursor token is garbled, from another version, or for another query.
    InvalidCursor,

    /// No view is keyed by the requested filter columns.
    UnsupportedFilter,
}

///
/// StoreErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StoreErrorKind {
    Unavailable,
    InvalidStatement,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Cursor,
    Executor,
    Query,
    Serialize,
    Store,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Executor => Self::Executor,
            CoreErrorOrigin::Serialize => Self::Serialize,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_store_maps_to_store_kind() {
        let err = Error::from(CoreError::from(StoreError::unavailable("timeout")));

        assert!(err.is_storage_unavailable());
        assert_eq!(err.origin, ErrorOrigin::Store);
        assert!(err.message.contains("timeout"));
    }

    #[test]
    fn page_size_errors_are_query_errors() {
        let err = Error::from(CursorError::InvalidPageSize {
            page_size: 0,
            max: 10,
        });

        assert_eq!(
            err.kind,
            ErrorKind::Query(QueryErrorKind::InvalidPageSize)
        );
        assert_eq!(err.origin, ErrorOrigin::Cursor);
    }

    #[test]
    fn signature_mismatch_is_an_invalid_cursor() {
        let err = Error::from(CursorError::SignatureMismatch {
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        });

        assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::InvalidCursor));
    }

    #[test]
    fn internal_errors_keep_their_origin() {
        let err = Error::from(InternalError::new(
            widedb_core::error::ErrorClass::Corruption,
            CoreErrorOrigin::Store,
            "bad row",
        ));

        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.origin, ErrorOrigin::Store);
    }
}
