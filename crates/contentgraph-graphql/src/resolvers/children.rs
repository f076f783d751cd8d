//! Child listing resolver.
//!
//! Implements `children(after, first, allowFallback, locale)` on every
//! content type, returning a `ContentInterfaceConnection`.

use async_graphql::ErrorExtensions;
use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use contentgraph_core::ContentReference;
use contentgraph_storage::LoaderOptions;
use tracing::{debug, warn};

use super::{ContentItem, SharedState, get_context, parent_item};
use crate::context::ContentGraphContext;
use crate::error::ContentGraphError;
use crate::locale::options_from_args;
use crate::pagination::{Connection, CursorArgs, PageSizing, paginate};
use crate::schema::TypeRegistry;

/// Resolver for paginated children.
pub struct ChildrenResolver;

/// Loads the children of `parent` and selects one page of them.
///
/// Children keep repository order. Locale fallback is applied by the
/// repository to each child independently; children excluded by the
/// visibility filter are dropped before paging.
///
/// # Errors
///
/// Returns an error for unusable paging arguments or repository failures.
pub async fn resolve_children(
    context: &ContentGraphContext,
    registry: &TypeRegistry,
    parent: ContentReference,
    options: LoaderOptions,
    args: &CursorArgs,
    sizing: PageSizing,
) -> Result<Connection<ContentItem>, ContentGraphError> {
    let children = context
        .repository
        .children(parent, &options)
        .await
        .map_err(|e| {
            warn!(
                error = %e,
                category = %e.category(),
                parent = %parent,
                backend = context.repository.backend_name(),
                "Storage error listing children"
            );
            ContentGraphError::from(e)
        })?;

    let items: Vec<ContentItem> = children
        .into_iter()
        .filter(|child| !context.is_excluded(child))
        .map(|child| ContentItem::classified(child, options.clone(), registry))
        .collect();

    let connection = paginate(items, args, sizing, |item| item.node.reference.id())?;

    debug!(
        parent = %parent,
        total = connection.total_count,
        returned = connection.edges.len(),
        "Children resolved"
    );
    Ok(connection)
}

impl ChildrenResolver {
    /// Creates the resolver function for the `children` field.
    ///
    /// Without `locale`/`allowFallback` arguments the children are loaded
    /// with the options the parent item was loaded with.
    pub fn resolve(state: SharedState) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let state = state.clone();
            FieldFuture::new(async move {
                let item = parent_item(&ctx)?;
                if item.node.reference.is_empty() {
                    return Ok(Some(FieldValue::owned_any(Connection::<ContentItem>::empty())));
                }

                let args = CursorArgs {
                    after: ctx
                        .args
                        .get("after")
                        .filter(|v| !v.is_null())
                        .map(|v| v.string().map(str::to_string))
                        .transpose()?,
                    first: ctx
                        .args
                        .get("first")
                        .filter(|v| !v.is_null())
                        .map(|v| v.i64())
                        .transpose()?,
                };
                let options = options_from_args(&ctx, &item.options).map_err(|e| e.extend())?;

                let gql_ctx = get_context(&ctx)?;
                let connection = resolve_children(
                    gql_ctx,
                    &state.registry,
                    item.node.reference,
                    options,
                    &args,
                    state.paging,
                )
                .await
                .map_err(|e| e.extend())?;

                Ok(Some(FieldValue::owned_any(connection)))
            })
        }
    }
}
