//! Content GraphQL schema builder.
//!
//! This module provides `ContentSchemaBuilder`, which renders a synthesized
//! [`TypeRegistry`] into an executable schema using async-graphql's dynamic
//! schema API.

use std::sync::Arc;

use async_graphql::dynamic::{Scalar, Schema, SchemaBuilder};
use contentgraph_core::Locale;
use contentgraph_storage::ContentTypeCatalog;
use tracing::{debug, info};

use super::connection::{connection_type, edge_type, page_info_type};
use super::interfaces::{content_interface, localizable_interface};
use super::objects::{content_object, content_root, content_union, query_root};
use super::registry::TypeRegistry;
use super::synthesizer::synthesize_catalog;
use super::{DATETIME_SCALAR, QUERY_TYPE, URL_SCALAR, XHTML_SCALAR};
use crate::error::ContentGraphError;
use crate::pagination::PageSizing;
use crate::resolvers::{ResolverState, SharedState};

/// Configuration for the schema builder.
#[derive(Debug, Clone)]
pub struct SchemaBuilderConfig {
    /// Locale used when `item` gets no `locale` argument.
    pub default_locale: Locale,

    /// Page sizes of `children`.
    pub paging: PageSizing,

    /// Maximum query depth allowed.
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    pub max_complexity: usize,

    /// Whether to enable introspection queries.
    pub introspection_enabled: bool,
}

impl Default for SchemaBuilderConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            paging: PageSizing::default(),
            max_depth: 15,
            max_complexity: 500,
            introspection_enabled: true,
        }
    }
}

/// An executable schema and the registry it was built from.
#[derive(Clone)]
pub struct ContentSchema {
    pub schema: Schema,
    pub registry: Arc<TypeRegistry>,
}

impl ContentSchema {
    /// Executes a request against the schema.
    pub async fn execute(&self, request: impl Into<async_graphql::Request>) -> async_graphql::Response {
        self.schema.execute(request).await
    }

    /// Returns the schema in SDL form.
    #[must_use]
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }
}

/// Builds the GraphQL schema for a synthesized type registry.
///
/// The schema contains:
/// - `Query.content.item` returning `ContentInterface`
/// - one object type per synthesized type, the sentinel included
/// - `ContentUnion` over all of them
/// - the connection types used by `children`
///
/// # Example
///
/// ```ignore
/// let builder = ContentSchemaBuilder::from_catalog(&catalog, SchemaBuilderConfig::default())?;
/// let schema = builder.build()?;
/// ```
pub struct ContentSchemaBuilder {
    registry: Arc<TypeRegistry>,
    config: SchemaBuilderConfig,
}

impl ContentSchemaBuilder {
    /// Creates a new schema builder.
    #[must_use]
    pub fn new(registry: TypeRegistry, config: SchemaBuilderConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    /// Synthesizes the registry for `catalog` and creates a builder for it.
    ///
    /// # Errors
    ///
    /// Returns an error if synthesis fails.
    pub fn from_catalog(
        catalog: &dyn ContentTypeCatalog,
        config: SchemaBuilderConfig,
    ) -> Result<Self, ContentGraphError> {
        let registry = synthesize_catalog(catalog)?;
        Ok(Self::new(registry, config))
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Builds the GraphQL schema.
    ///
    /// # Errors
    ///
    /// Returns an error if schema construction fails.
    pub fn build(&self) -> Result<ContentSchema, ContentGraphError> {
        debug!(types = self.registry.len(), "Starting GraphQL schema build");

        let state: SharedState = Arc::new(ResolverState {
            registry: self.registry.clone(),
            default_locale: self.config.default_locale.clone(),
            paging: self.config.paging,
        });

        let mut schema_builder = Schema::build(QUERY_TYPE, None, None);

        // Register custom scalars
        schema_builder = self.register_scalars(schema_builder);

        // Register interfaces, content types and their union
        schema_builder = self.register_content_types(schema_builder, &state);

        // Register connection types
        schema_builder = schema_builder
            .register(page_info_type())
            .register(edge_type())
            .register(connection_type());

        // Build Query and Content roots
        schema_builder = schema_builder
            .register(query_root())
            .register(content_root(&state));

        // Configure limits
        let mut schema_builder = schema_builder.limit_depth(self.config.max_depth);
        schema_builder = schema_builder.limit_complexity(self.config.max_complexity);

        // Enable/disable introspection
        if !self.config.introspection_enabled {
            schema_builder = schema_builder.disable_introspection();
        }

        let schema = schema_builder
            .finish()
            .map_err(|e| ContentGraphError::SchemaBuildFailed(e.to_string()))?;

        info!(types = self.registry.len(), "GraphQL schema build complete");
        Ok(ContentSchema {
            schema,
            registry: self.registry.clone(),
        })
    }

    /// Registers the custom content scalar types.
    fn register_scalars(&self, builder: SchemaBuilder) -> SchemaBuilder {
        let scalars = [
            (DATETIME_SCALAR, "An RFC 3339 date and time"),
            (XHTML_SCALAR, "A fragment of XHTML markup"),
            (URL_SCALAR, "An absolute or site-relative URL"),
        ];

        let mut builder = builder;
        for (name, description) in scalars {
            builder = builder.register(Scalar::new(name).description(description));
        }

        builder
    }

    fn register_content_types(&self, mut builder: SchemaBuilder, state: &SharedState) -> SchemaBuilder {
        builder = builder.register(content_interface());
        if self.registry.has_localizable_types() {
            builder = builder.register(localizable_interface());
        }

        for ty in self.registry.iter() {
            debug!(type_name = %ty.name, fields = ty.fields.len(), "Registering content object");
            builder = builder.register(content_object(ty, state));
        }

        builder.register(content_union(&self.registry))
    }
}
