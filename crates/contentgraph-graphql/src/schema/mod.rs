//! Type graph synthesis and GraphQL schema building.
//!
//! ## Components
//!
//! - [`synthesize`] - turns descriptors into a [`TypeRegistry`]
//! - [`TypeRegistry`] - the synthesized types and their classifiers
//! - [`ContentSchemaBuilder`] - builds the executable schema from a registry
//!
//! ## Architecture
//!
//! The schema building process:
//! 1. Descriptors are read from the catalog and ordered blocks-first
//! 2. Every descriptor becomes a type, registered as soon as it exists
//! 3. The unresolved-type sentinel is registered
//! 4. Custom fields are bound; block fields only to registered types
//! 5. The registry is rendered into async-graphql dynamic types

mod builder;
mod connection;
mod interfaces;
mod objects;
mod registry;
mod synthesizer;

pub use builder::{ContentSchema, ContentSchemaBuilder, SchemaBuilderConfig};
pub use interfaces::{BASE_FIELDS, LOCALIZABLE_FIELDS};
pub use registry::{
    BindingKind, Classifier, FieldBinding, InterfaceSet, SynthesisError, SynthesizedType, TypeOrigin,
    TypeRegistry, TypeRegistryBuilder, is_reserved_name,
};
pub use synthesizer::{synthesize, synthesize_catalog};

/// Root query type.
pub const QUERY_TYPE: &str = "Query";

/// Namespace object holding the content queries (`Query.content`).
pub const CONTENT_ROOT_TYPE: &str = "Content";

/// Interface implemented by every content type.
pub const CONTENT_INTERFACE: &str = "ContentInterface";

/// Interface implemented by types with page-level locale variance.
pub const LOCALIZABLE_INTERFACE: &str = "LocalizableInterface";

/// Union of every synthesized type.
pub const CONTENT_UNION: &str = "ContentUnion";

pub const CONNECTION_TYPE: &str = "ContentInterfaceConnection";
pub const EDGE_TYPE: &str = "ContentInterfaceEdge";
pub const PAGE_INFO_TYPE: &str = "PageInfo";

/// Type representing nodes no registered type claims.
pub const SENTINEL_TYPE: &str = "NoneResolvedType";

pub const DATETIME_SCALAR: &str = "DateTime";
pub const XHTML_SCALAR: &str = "XhtmlString";
pub const URL_SCALAR: &str = "Url";
