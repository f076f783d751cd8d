//! Field resolvers for content types.
//!
//! Base fields read the node itself; custom fields read one property of the
//! node and convert it according to the field's binding.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use async_graphql::{ErrorExtensions, Number, Value};
use contentgraph_core::{ContentNode, PropertyValue, ScalarKind};
use contentgraph_storage::LoaderOptions;
use time::format_description::well_known::Rfc3339;
use tracing::{trace, warn};

use super::{ContentItem, SharedState, get_context, parent_item};
use crate::error::ContentGraphError;
use crate::locale::options_from_args;
use crate::schema::{BindingKind, FieldBinding, TypeRegistry};

/// Resolver factory for fields on content types.
pub struct FieldResolver;

impl FieldResolver {
    /// Creates a resolver that reads a value straight off the parent item.
    pub fn node_value(read: fn(&ContentItem) -> Value) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            FieldFuture::new(async move {
                let item = parent_item(&ctx)?;
                let value = read(item);
                if matches!(value, Value::Null) {
                    return Ok(None);
                }
                Ok(Some(value))
            })
        }
    }

    /// Creates the resolver for `path(absoluteUrl, locale)`.
    ///
    /// Without a `locale` argument the URL is built in the locale the item
    /// was materialized in.
    pub fn path() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            FieldFuture::new(async move {
                let item = parent_item(&ctx)?;
                if item.node.reference.is_empty() {
                    return Ok(None);
                }

                let absolute = ctx
                    .args
                    .get("absoluteUrl")
                    .and_then(|v| v.boolean().ok())
                    .unwrap_or(false);

                let default = LoaderOptions::new(item.node.locale.clone())
                    .with_fallback(item.options.allow_fallback);
                let options = options_from_args(&ctx, &default).map_err(|e| e.extend())?;

                let gql_ctx = get_context(&ctx)?;
                let url = gql_ctx
                    .repository
                    .url(item.node.reference, &options.locale, absolute)
                    .await
                    .map_err(|e| {
                        warn!(
                            error = %e,
                            category = %e.category(),
                            reference = %item.node.reference,
                            request_id = %gql_ctx.request_id,
                            "Storage error building URL"
                        );
                        ContentGraphError::from(e).extend()
                    })?;

                Ok(url.map(Value::String))
            })
        }
    }

    /// Creates the resolver for a custom field.
    pub fn property(
        binding: FieldBinding,
        state: SharedState,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let binding = binding.clone();
            let state = state.clone();
            FieldFuture::new(async move {
                let item = parent_item(&ctx)?;
                let Some(value) = item.node.property(&binding.property) else {
                    trace!(
                        type_name = %item.type_name,
                        property = %binding.property,
                        "Property not set"
                    );
                    return Ok(None);
                };

                Ok(property_field_value(item, &binding, value, &state.registry))
            })
        }
    }
}

fn property_field_value<'a>(
    item: &ContentItem,
    binding: &FieldBinding,
    value: &PropertyValue,
    registry: &TypeRegistry,
) -> Option<FieldValue<'a>> {
    if value.is_null() {
        return None;
    }

    let nested = |block: &ContentNode, type_name: &str| {
        if !block_matches_declared_type(registry, block, type_name) {
            warn!(
                type_name = %item.type_name,
                field = %binding.field_name,
                declared = %type_name,
                model = ?block.model_type,
                "Block value model differs from the declared field type"
            );
        }
        FieldValue::owned_any(ContentItem::nested(block, &item.options, type_name))
    };

    match &binding.kind {
        BindingKind::Scalar(scalar) => match scalar_value(*scalar, value) {
            Value::Null => None,
            value => Some(FieldValue::value(value)),
        },
        BindingKind::ScalarList(scalar) => {
            let values = match value {
                PropertyValue::List(values) => values.iter().map(|v| scalar_value(*scalar, v)).collect(),
                single => vec![scalar_value(*scalar, single)],
            };
            Some(FieldValue::value(Value::List(values)))
        }
        BindingKind::Block { type_name } => value.as_block().map(|block| nested(block, type_name.as_str())),
        BindingKind::BlockList { type_name } => {
            let blocks: Vec<&PropertyValue> = match value {
                PropertyValue::List(values) => values.iter().collect(),
                single => vec![single],
            };
            Some(FieldValue::list(
                blocks
                    .into_iter()
                    .filter_map(PropertyValue::as_block)
                    .map(|block| nested(block, type_name.as_str())),
            ))
        }
    }
}

/// True if the model of a nested block value is the one claimed by
/// `declared`. Blocks without a model tag are taken as declared.
pub(crate) fn block_matches_declared_type(registry: &TypeRegistry, block: &ContentNode, declared: &str) -> bool {
    match &block.model_type {
        Some(model) => registry
            .type_for_model(model)
            .is_some_and(|ty| ty.name == declared),
        None => true,
    }
}

/// Converts a property value into the GraphQL value of a `kind` field.
///
/// Values that cannot represent `kind` become `null`.
pub(crate) fn scalar_value(kind: ScalarKind, value: &PropertyValue) -> Value {
    let converted = match (kind, value) {
        (_, PropertyValue::Null) => Value::Null,
        (ScalarKind::String | ScalarKind::Xhtml | ScalarKind::Url, PropertyValue::String(s)) => {
            Value::String(s.clone())
        }
        (ScalarKind::String, PropertyValue::Integer(i)) => Value::String(i.to_string()),
        (ScalarKind::String, PropertyValue::Float(f)) => Value::String(f.to_string()),
        (ScalarKind::String, PropertyValue::Boolean(b)) => Value::String(b.to_string()),
        (ScalarKind::String, PropertyValue::Reference(r)) => Value::String(r.to_string()),
        (ScalarKind::String | ScalarKind::DateTime, PropertyValue::DateTime(dt)) => {
            dt.format(&Rfc3339).map(Value::String).unwrap_or(Value::Null)
        }
        (ScalarKind::DateTime, PropertyValue::String(s)) => Value::String(s.clone()),
        (ScalarKind::Integer | ScalarKind::ContentReference, PropertyValue::Integer(i)) => {
            Value::Number((*i).into())
        }
        (ScalarKind::Integer | ScalarKind::ContentReference, PropertyValue::Reference(r)) => {
            Value::Number(r.id().into())
        }
        (ScalarKind::Float, PropertyValue::Float(f)) => {
            Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null)
        }
        (ScalarKind::Float, PropertyValue::Integer(i)) => Value::Number((*i).into()),
        (ScalarKind::Boolean, PropertyValue::Boolean(b)) => Value::Boolean(*b),
        _ => Value::Null,
    };

    if matches!(converted, Value::Null) && !value.is_null() {
        trace!(?kind, "Property value does not fit the declared field kind");
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{InterfaceSet, synthesize};
    use contentgraph_core::{ContentReference, ContentTypeDescriptor, Locale, ModelKind};
    use time::macros::datetime;

    fn block_registry() -> TypeRegistry {
        let descriptors = vec![
            ContentTypeDescriptor::new(1, "Teaser").with_model("Acme.Teaser", ModelKind::Block),
            ContentTypeDescriptor::new(2, "Banner").with_model("Acme.Banner", ModelKind::Block),
        ];
        synthesize(&descriptors, ContentTypeDescriptor::is_block, InterfaceSet::for_descriptor).unwrap()
    }

    #[test]
    fn test_block_model_checked_against_declared_type() {
        let registry = block_registry();
        let en = Locale::parse("en").unwrap();

        let teaser = ContentNode::local_block("Acme.Teaser", en.clone());
        assert!(block_matches_declared_type(&registry, &teaser, "Teaser"));
        assert!(!block_matches_declared_type(&registry, &teaser, "Banner"));

        let unknown = ContentNode::local_block("Acme.Unknown", en.clone());
        assert!(!block_matches_declared_type(&registry, &unknown, "Teaser"));

        let untagged = ContentNode::new(ContentReference::EMPTY, "Inline", en);
        assert!(block_matches_declared_type(&registry, &untagged, "Teaser"));
    }

    #[test]
    fn test_string_conversions() {
        assert_eq!(
            scalar_value(ScalarKind::String, &PropertyValue::from("Hello")),
            Value::String("Hello".into())
        );
        assert_eq!(
            scalar_value(ScalarKind::String, &PropertyValue::Integer(7)),
            Value::String("7".into())
        );
        assert_eq!(
            scalar_value(ScalarKind::Xhtml, &PropertyValue::from("<p>Hi</p>")),
            Value::String("<p>Hi</p>".into())
        );
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(
            scalar_value(ScalarKind::Integer, &PropertyValue::Integer(42)),
            Value::Number(42.into())
        );
        assert_eq!(
            scalar_value(ScalarKind::ContentReference, &PropertyValue::Reference(ContentReference::new(9))),
            Value::Number(9.into())
        );
        assert_eq!(scalar_value(ScalarKind::Float, &PropertyValue::Float(f64::NAN)), Value::Null);
        assert_eq!(
            scalar_value(ScalarKind::Float, &PropertyValue::Integer(2)),
            Value::Number(2.into())
        );
    }

    #[test]
    fn test_datetime_is_rfc3339() {
        let value = PropertyValue::DateTime(datetime!(2024-05-01 12:30:00 UTC));
        assert_eq!(
            scalar_value(ScalarKind::DateTime, &value),
            Value::String("2024-05-01T12:30:00Z".into())
        );
    }

    #[test]
    fn test_mismatched_kinds_become_null() {
        assert_eq!(scalar_value(ScalarKind::Integer, &PropertyValue::from("abc")), Value::Null);
        assert_eq!(scalar_value(ScalarKind::Boolean, &PropertyValue::Integer(1)), Value::Null);
        assert_eq!(
            scalar_value(ScalarKind::String, &PropertyValue::List(vec![PropertyValue::from("a")])),
            Value::Null
        );
    }
}
