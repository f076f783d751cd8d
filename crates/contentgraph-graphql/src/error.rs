//! Error types for GraphQL operations.
//!
//! Request-time errors are field-scoped. Resolvers convert them with
//! [`ErrorExtensions::extend`] into `async_graphql::Error` values carrying a
//! `code` extension; the field resolves to `null` and the rest of the
//! response proceeds. Synthesis
//! errors are fatal and abort schema construction.

use std::fmt;

use async_graphql::ErrorExtensions;
use contentgraph_core::CoreError;
use contentgraph_storage::StorageError;

use crate::schema::SynthesisError;

/// Errors that can occur during GraphQL operations.
#[derive(Debug)]
pub enum ContentGraphError {
    /// No content exists for the id, or it was excluded by the visibility filter.
    NotFound {
        /// Requested content id.
        id: i64,
    },

    /// A locale argument is not a well-formed locale tag.
    UnrecognizedLocale(String),

    /// A pagination cursor could not be decoded.
    InvalidCursor(String),

    /// An argument has an unusable value.
    InvalidArgument(String),

    /// Schema synthesis or construction failed.
    SchemaBuildFailed(String),

    /// Repository error.
    Storage(String),

    /// Internal error.
    Internal(String),
}

impl fmt::Display for ContentGraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => {
                write!(f, "Could not find content with id {id}")
            }
            Self::UnrecognizedLocale(locale) => {
                write!(f, "Unrecognized locale: '{locale}'")
            }
            Self::InvalidCursor(cursor) => {
                write!(f, "Invalid cursor: '{cursor}'")
            }
            Self::InvalidArgument(msg) => {
                write!(f, "Invalid argument: {msg}")
            }
            Self::SchemaBuildFailed(msg) => {
                write!(f, "Failed to build GraphQL schema: {msg}")
            }
            Self::Storage(msg) => {
                write!(f, "Storage error: {msg}")
            }
            Self::Internal(msg) => {
                write!(f, "Internal error: {msg}")
            }
        }
    }
}

impl std::error::Error for ContentGraphError {}

impl ContentGraphError {
    /// Returns the HTTP status code a transport should map this error to.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::UnrecognizedLocale(_) | Self::InvalidCursor(_) | Self::InvalidArgument(_) => 400,
            Self::SchemaBuildFailed(_) | Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::UnrecognizedLocale(_) => "UNRECOGNIZED_LOCALE",
            Self::InvalidCursor(_) => "INVALID_CURSOR",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::SchemaBuildFailed(_) => "SCHEMA_BUILD_FAILED",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ErrorExtensions for ContentGraphError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.error_code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

impl From<StorageError> for ContentGraphError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<SynthesisError> for ContentGraphError {
    fn from(err: SynthesisError) -> Self {
        Self::SchemaBuildFailed(err.to_string())
    }
}

impl From<CoreError> for ContentGraphError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnrecognizedLocale(locale) => Self::UnrecognizedLocale(locale),
            CoreError::InvalidReference(reference) => Self::InvalidArgument(reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_includes_id() {
        let err = ContentGraphError::NotFound { id: 999 };
        assert_eq!(err.to_string(), "Could not find content with id 999");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ContentGraphError::UnrecognizedLocale("x".into()).status_code(), 400);
        assert_eq!(ContentGraphError::InvalidCursor("x".into()).status_code(), 400);
        assert_eq!(ContentGraphError::Storage("x".into()).status_code(), 500);
    }

    #[test]
    fn test_graphql_error_carries_code() {
        let err = ContentGraphError::UnrecognizedLocale("xx_YY".into()).extend();
        assert_eq!(err.message, "Unrecognized locale: 'xx_YY'");

        let extensions = err.extensions.expect("extensions should be set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("UNRECOGNIZED_LOCALE"))
        );
    }

    #[test]
    fn test_from_core_error() {
        let err: ContentGraphError = CoreError::unrecognized_locale("??").into();
        assert!(matches!(err, ContentGraphError::UnrecognizedLocale(ref l) if l == "??"));
    }

    #[test]
    fn test_from_storage_error() {
        let err: ContentGraphError = StorageError::connection_error("down").into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert_eq!(err.to_string(), "Storage error: Connection error: down");
    }
}
