//! Single node resolver.
//!
//! Implements `content { item(id: Int, locale: String, allowFallback: Boolean) }`,
//! which fetches one content node and resolves it to its synthesized type.

use async_graphql::ErrorExtensions;
use async_graphql::dynamic::{FieldFuture, ResolverContext};
use contentgraph_core::ContentReference;
use contentgraph_storage::LoaderOptions;
use tracing::{debug, warn};

use super::{ContentItem, SharedState, get_context};
use crate::context::ContentGraphContext;
use crate::error::ContentGraphError;
use crate::locale::options_from_args;
use crate::schema::TypeRegistry;

/// Resolver for single node reads.
pub struct ItemResolver;

/// Fetches and classifies one content node.
///
/// An absent `id` resolves the start page. A node excluded by the
/// visibility filter is reported exactly like a missing one.
///
/// # Errors
///
/// Returns [`ContentGraphError::NotFound`] if the node does not exist, has
/// no acceptable locale variant or is excluded, and
/// [`ContentGraphError::Storage`] if the repository fails.
pub async fn resolve_item(
    context: &ContentGraphContext,
    registry: &TypeRegistry,
    id: Option<i64>,
    options: LoaderOptions,
) -> Result<ContentItem, ContentGraphError> {
    let reference = id
        .map(ContentReference::new)
        .unwrap_or_else(|| context.start_page());

    debug!(
        reference = %reference,
        locale = %options.locale,
        allow_fallback = options.allow_fallback,
        request_id = %context.request_id,
        "Resolving content item"
    );

    let node = context
        .repository
        .get(reference, &options)
        .await
        .map_err(|e| {
            warn!(
                error = %e,
                category = %e.category(),
                backend = context.repository.backend_name(),
                "Storage error reading content"
            );
            ContentGraphError::from(e)
        })?;

    let Some(node) = node else {
        debug!(reference = %reference, "Content not found");
        return Err(ContentGraphError::NotFound { id: reference.id() });
    };

    if context.is_excluded(&node) {
        debug!(reference = %reference, "Content excluded by visibility filter");
        return Err(ContentGraphError::NotFound { id: reference.id() });
    }

    let item = ContentItem::classified(node, options, registry);
    debug!(reference = %reference, type_name = %item.type_name, "Content item resolved");
    Ok(item)
}

impl ItemResolver {
    /// Creates the resolver function for `Content.item`.
    pub fn resolve(state: SharedState) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let state = state.clone();
            FieldFuture::new(async move {
                let id = match ctx.args.get("id") {
                    Some(value) if !value.is_null() => Some(value.i64()?),
                    _ => None,
                };

                let default = LoaderOptions::new(state.default_locale.clone());
                let options = options_from_args(&ctx, &default).map_err(|e| e.extend())?;

                let gql_ctx = get_context(&ctx)?;
                let item = resolve_item(gql_ctx, &state.registry, id, options)
                    .await
                    .map_err(|e| e.extend())?;

                Ok(Some(item.into_field_value()))
            })
        }
    }
}
