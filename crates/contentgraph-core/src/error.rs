use thiserror::Error;

/// Core error types for content model operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unrecognized locale: '{0}'")]
    UnrecognizedLocale(String),

    #[error("Invalid content reference: {0}")]
    InvalidReference(String),
}

impl CoreError {
    /// Create a new UnrecognizedLocale error
    pub fn unrecognized_locale(locale: impl Into<String>) -> Self {
        Self::UnrecognizedLocale(locale.into())
    }

    /// Create a new InvalidReference error
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        Self::InvalidReference(reference.into())
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
