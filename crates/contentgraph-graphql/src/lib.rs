//! # contentgraph-graphql
//!
//! GraphQL API over a catalog of runtime-registered content types.
//!
//! The type graph is synthesized once from the content-type catalog: every
//! descriptor becomes an object type implementing `ContentInterface` (and
//! `LocalizableInterface` for page types), nested block fields become typed
//! object fields, and `NoneResolvedType` represents nodes no registered type
//! claims. One generic query then reaches any content:
//!
//! ```graphql
//! {
//!   content {
//!     item(id: 42, locale: "sv") {
//!       name
//!       ... on ArticlePage { heading teaser { title } }
//!       children(first: 10) { totalCount edges { cursor node { name } } }
//!     }
//!   }
//! }
//! ```
//!
//! ## Configuration
//!
//! Add to the application's TOML configuration:
//!
//! ```toml
//! [contentgraph]
//! default_locale = "en"
//! default_page_size = 10
//! max_page_size = 100
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`catalog`] - Catalog adapter
//! - [`schema`] - Type graph synthesis and schema building
//! - [`resolvers`] - Node, children and field resolvers
//! - [`pagination`] - Cursor pagination
//! - [`locale`] - Locale argument resolution
//! - [`context`] - GraphQL execution context
//! - [`error`] - Error types for GraphQL operations

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod locale;
pub mod pagination;
pub mod resolvers;
pub mod schema;

// Re-export main types
pub use config::ContentGraphConfig;
pub use context::{ContentGraphContext, ContentGraphContextBuilder, ContextBuilderError};
pub use error::ContentGraphError;
pub use locale::resolve_locale;
pub use pagination::{Connection, CursorArgs, Edge, PageInfo, PageSizing, paginate};
pub use resolvers::{ContentItem, resolve_children, resolve_item};
pub use schema::{
    ContentSchema, ContentSchemaBuilder, SchemaBuilderConfig, SynthesisError, TypeRegistry, synthesize,
    synthesize_catalog,
};

/// Result type for GraphQL operations.
pub type Result<T> = std::result::Result<T, ContentGraphError>;
