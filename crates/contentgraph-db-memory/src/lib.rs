//! In-memory content backend for ContentGraph.
//!
//! This crate provides in-memory implementations of the `ContentRepository`
//! and `ContentTypeCatalog` traits from `contentgraph-storage`, using
//! `dashmap` for concurrent access.
//!
//! # Example
//!
//! ```ignore
//! use contentgraph_db_memory::{ContentVariant, InMemoryRepository, StoredContent};
//!
//! let en = Locale::parse("en")?;
//! let repo = InMemoryRepository::new();
//! repo.insert(
//!     StoredContent::new(ContentReference::new(1), en.clone())
//!         .with_variant(en, ContentVariant::new("Root")),
//! );
//! ```

pub mod catalog;
pub mod repository;

pub use catalog::InMemoryCatalog;
pub use repository::{ContentVariant, InMemoryRepository, StoredContent};

// Re-export the collaborator traits for convenience
pub use contentgraph_storage::{ContentRepository, ContentTypeCatalog, StorageError};
