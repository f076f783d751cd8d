//! GraphQL execution context.
//!
//! This module provides the context struct that holds the collaborators
//! needed by the content resolvers. The context is constructed per-request
//! and attached to the `async_graphql::Request` as data.
//!
//! # Example
//!
//! ```ignore
//! use contentgraph_graphql::ContentGraphContextBuilder;
//!
//! let context = ContentGraphContextBuilder::new()
//!     .with_repository(repository.clone())
//!     .with_start_page(Arc::new(FixedStartPage(ContentReference::new(42))))
//!     .with_visibility_filter(Some(filter.clone()))
//!     .with_request_id("req-123")
//!     .build()?;
//! ```

use contentgraph_core::{ContentNode, ContentReference};
use contentgraph_storage::{DynRepository, DynStartPageProvider, DynVisibilityFilter};

/// GraphQL execution context.
///
/// Cloning is cheap; all collaborators are behind `Arc`.
#[derive(Clone)]
pub struct ContentGraphContext {
    /// Content repository.
    pub repository: DynRepository,

    /// Exclusion rules applied to every fetched node (None = nothing excluded).
    pub visibility: Option<DynVisibilityFilter>,

    /// Default node for `item` queries without an id.
    pub start_page: DynStartPageProvider,

    /// Request ID for tracing and correlation.
    pub request_id: String,
}

impl ContentGraphContext {
    /// Returns the start page reference.
    #[must_use]
    pub fn start_page(&self) -> ContentReference {
        self.start_page.start_page()
    }

    /// Returns whether the visibility filter excludes `node`.
    #[must_use]
    pub fn is_excluded(&self, node: &ContentNode) -> bool {
        self.visibility
            .as_ref()
            .is_some_and(|filter| filter.should_exclude(node))
    }

    /// Creates a new builder for ContentGraphContext.
    #[must_use]
    pub fn builder() -> ContentGraphContextBuilder {
        ContentGraphContextBuilder::default()
    }
}

/// Builder for constructing ContentGraphContext.
#[derive(Default)]
pub struct ContentGraphContextBuilder {
    repository: Option<DynRepository>,
    visibility: Option<DynVisibilityFilter>,
    start_page: Option<DynStartPageProvider>,
    request_id: Option<String>,
}

impl ContentGraphContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the content repository.
    #[must_use]
    pub fn with_repository(mut self, repository: DynRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Sets the visibility filter.
    #[must_use]
    pub fn with_visibility_filter(mut self, filter: Option<DynVisibilityFilter>) -> Self {
        self.visibility = filter;
        self
    }

    /// Sets the start page provider.
    #[must_use]
    pub fn with_start_page(mut self, provider: DynStartPageProvider) -> Self {
        self.start_page = Some(provider);
        self
    }

    /// Sets the request ID.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Builds the ContentGraphContext.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<ContentGraphContext, ContextBuilderError> {
        let repository = self
            .repository
            .ok_or(ContextBuilderError::MissingField("repository"))?;

        let start_page = self
            .start_page
            .ok_or(ContextBuilderError::MissingField("start_page"))?;

        let request_id = self
            .request_id
            .ok_or(ContextBuilderError::MissingField("request_id"))?;

        Ok(ContentGraphContext {
            repository,
            visibility: self.visibility,
            start_page,
            request_id,
        })
    }
}

/// Errors that can occur when building a ContentGraphContext.
#[derive(Debug, thiserror::Error)]
pub enum ContextBuilderError {
    /// A required field was not provided.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
