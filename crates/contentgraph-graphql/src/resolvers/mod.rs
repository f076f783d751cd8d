//! GraphQL resolvers for content.
//!
//! This module provides the resolver implementations for the content schema:
//! - `item`: Single node queries (`content { item(id: 42) { ... } }`)
//! - `children`: Paginated child listings on every content type
//! - `fields`: Base interface fields and custom property fields

mod children;
mod fields;
mod item;

pub use children::{ChildrenResolver, resolve_children};
pub use item::{ItemResolver, resolve_item};

pub use fields::FieldResolver;

use std::sync::Arc;

use async_graphql::dynamic::{FieldValue, ResolverContext};
use async_graphql::Error as GraphQLError;
use contentgraph_core::{ContentNode, Locale};
use contentgraph_storage::LoaderOptions;

use crate::context::ContentGraphContext;
use crate::pagination::PageSizing;
use crate::schema::TypeRegistry;

/// Schema-wide state captured by resolver closures.
#[derive(Debug)]
pub struct ResolverState {
    pub registry: Arc<TypeRegistry>,
    pub default_locale: Locale,
    pub paging: PageSizing,
}

pub type SharedState = Arc<ResolverState>;

/// A content node together with the request options it was loaded with and
/// the GraphQL type representing it.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub node: Arc<ContentNode>,
    pub options: LoaderOptions,
    pub type_name: String,
}

impl ContentItem {
    /// Wraps `node`, classifying it against `registry`.
    pub fn classified(node: ContentNode, options: LoaderOptions, registry: &TypeRegistry) -> Self {
        let type_name = registry.classify(&node).name.clone();
        Self {
            node: Arc::new(node),
            options,
            type_name,
        }
    }

    /// Wraps a nested block node whose type is fixed by the field it sits in.
    pub fn nested(node: &ContentNode, options: &LoaderOptions, type_name: &str) -> Self {
        Self {
            node: Arc::new(node.clone()),
            options: options.clone(),
            type_name: type_name.to_string(),
        }
    }

    /// Value for a field typed as an interface or union.
    pub(crate) fn into_field_value<'a>(self) -> FieldValue<'a> {
        let type_name = self.type_name.clone();
        FieldValue::owned_any(self).with_type(type_name)
    }
}

/// Parent value of the `Query.content` namespace field.
pub(crate) struct ContentRoot;

/// Helper to extract the content graph context from resolver context.
pub(crate) fn get_context<'a>(ctx: &'a ResolverContext<'_>) -> Result<&'a ContentGraphContext, GraphQLError> {
    ctx.data::<ContentGraphContext>()
        .map_err(|_| GraphQLError::new("Content graph context not available"))
}

/// Helper to extract the content item a field is resolved on.
pub(crate) fn parent_item<'a>(ctx: &'a ResolverContext<'_>) -> Result<&'a ContentItem, GraphQLError> {
    ctx.parent_value.try_downcast_ref::<ContentItem>()
}
