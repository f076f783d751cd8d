//! # contentgraph-storage
//!
//! Collaborator contracts for the ContentGraph schema and resolvers.
//!
//! This crate defines the traits that content backends must implement. It
//! does not contain any implementations - those are provided by separate
//! crates such as `contentgraph-db-memory`.
//!
//! ## Overview
//!
//! - [`ContentRepository`] - fetches content nodes by reference and locale,
//!   lists children and builds URLs
//! - [`ContentTypeCatalog`] - enumerates registered content-type descriptors
//! - [`VisibilityFilter`] - optional exclusion rules applied after a fetch
//! - [`StartPageProvider`] - default identity for requests without an id
//!
//! ## Example
//!
//! ```ignore
//! use contentgraph_storage::{ContentRepository, LoaderOptions};
//!
//! async fn load_start(repo: &dyn ContentRepository, locale: Locale) -> Option<ContentNode> {
//!     let options = LoaderOptions::new(locale).with_fallback(true);
//!     repo.get(ContentReference::new(1), &options).await.ok().flatten()
//! }
//! ```

mod error;
mod options;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use options::LoaderOptions;
pub use traits::{
    ContentRepository, ContentTypeCatalog, FixedStartPage, StartPageProvider, VisibilityFilter,
};

/// Shareable repository trait object.
pub type DynRepository = std::sync::Arc<dyn ContentRepository>;

/// Shareable visibility filter trait object.
pub type DynVisibilityFilter = std::sync::Arc<dyn VisibilityFilter>;

/// Shareable start page provider trait object.
pub type DynStartPageProvider = std::sync::Arc<dyn StartPageProvider>;
