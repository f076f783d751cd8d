//! `ContentInterface` and `LocalizableInterface`.
//!
//! Every synthesized object repeats the interface fields with resolvers; the
//! argument lists are built by the same functions for both so that they
//! cannot drift apart.

use async_graphql::Value;
use async_graphql::dynamic::{Field, InputValue, Interface, InterfaceField, TypeRef};

use super::{CONNECTION_TYPE, CONTENT_INTERFACE, LOCALIZABLE_INTERFACE};
use crate::locale::{ALLOW_FALLBACK_ARG, LOCALE_ARG};
use crate::resolvers::{ChildrenResolver, ContentItem, FieldResolver, SharedState};

/// Fields of `ContentInterface`.
pub const BASE_FIELDS: &[&str] = &[
    "id",
    "parentId",
    "name",
    "contentTypeId",
    "type",
    "modelType",
    "path",
    "children",
];

/// Fields of `LocalizableInterface`.
pub const LOCALIZABLE_FIELDS: &[&str] = &["language", "masterLanguage", "existingLanguages"];

fn path_arguments() -> Vec<InputValue> {
    vec![
        InputValue::new("absoluteUrl", TypeRef::named(TypeRef::BOOLEAN))
            .description("Include scheme and host")
            .default_value(Value::Boolean(false)),
        InputValue::new(LOCALE_ARG, TypeRef::named(TypeRef::STRING))
            .description("Locale of the URL; defaults to the item's locale"),
    ]
}

fn children_arguments() -> Vec<InputValue> {
    vec![
        InputValue::new("after", TypeRef::named(TypeRef::STRING))
            .description("Return children after this cursor"),
        InputValue::new("first", TypeRef::named(TypeRef::INT))
            .description("Maximum number of children to return"),
        InputValue::new(ALLOW_FALLBACK_ARG, TypeRef::named(TypeRef::BOOLEAN))
            .description("Allow children in a fallback locale; defaults to the item's setting"),
        InputValue::new(LOCALE_ARG, TypeRef::named(TypeRef::STRING))
            .description("Locale of the children; defaults to the item's locale"),
    ]
}

/// (name, type, description) of the plain base fields.
fn plain_base_fields() -> [(&'static str, TypeRef, &'static str); 6] {
    [
        ("id", TypeRef::named_nn(TypeRef::INT), "Content id"),
        ("parentId", TypeRef::named(TypeRef::INT), "Content id of the parent"),
        ("name", TypeRef::named_nn(TypeRef::STRING), "Display name"),
        ("contentTypeId", TypeRef::named_nn(TypeRef::INT), "Catalog id of the content type"),
        ("type", TypeRef::named(TypeRef::STRING), "Short name of the backing model"),
        ("modelType", TypeRef::named(TypeRef::STRING), "Model identity of the item"),
    ]
}

fn localizable_field_types() -> [(&'static str, TypeRef, &'static str); 3] {
    [
        ("language", TypeRef::named_nn(TypeRef::STRING), "Locale the item was loaded in"),
        ("masterLanguage", TypeRef::named(TypeRef::STRING), "Locale the item was created in"),
        (
            "existingLanguages",
            TypeRef::named_nn_list_nn(TypeRef::STRING),
            "Locales the item exists in",
        ),
    ]
}

pub(crate) fn content_interface() -> Interface {
    let mut interface = Interface::new(CONTENT_INTERFACE).description("Fields shared by all content");

    for (name, ty, description) in plain_base_fields() {
        interface = interface.field(InterfaceField::new(name, ty).description(description));
    }

    let mut path = InterfaceField::new("path", TypeRef::named(TypeRef::STRING)).description("Public URL");
    for arg in path_arguments() {
        path = path.argument(arg);
    }

    let mut children = InterfaceField::new("children", TypeRef::named_nn(CONNECTION_TYPE))
        .description("Child content in repository order");
    for arg in children_arguments() {
        children = children.argument(arg);
    }

    interface.field(path).field(children)
}

pub(crate) fn localizable_interface() -> Interface {
    let mut interface =
        Interface::new(LOCALIZABLE_INTERFACE).description("Content with per-locale variants");

    for (name, ty, description) in localizable_field_types() {
        interface = interface.field(InterfaceField::new(name, ty).description(description));
    }

    interface
}

fn base_value(name: &str) -> fn(&ContentItem) -> Value {
    match name {
        "id" => |item| Value::from(item.node.reference.id()),
        "parentId" => |item| item.node.parent.map(|p| Value::from(p.id())).unwrap_or(Value::Null),
        "name" => |item| Value::String(item.node.name.clone()),
        "contentTypeId" => |item| Value::from(item.node.content_type_id),
        "type" => |item| {
            item.node
                .model_type
                .as_ref()
                .map(|m| Value::String(m.short_name().to_string()))
                .unwrap_or(Value::Null)
        },
        "modelType" => |item| {
            item.node
                .model_type
                .as_ref()
                .map(|m| Value::String(m.to_string()))
                .unwrap_or(Value::Null)
        },
        "language" => |item| Value::String(item.node.locale.to_string()),
        "masterLanguage" => |item| {
            item.node
                .master_locale
                .as_ref()
                .map(|l| Value::String(l.to_string()))
                .unwrap_or(Value::Null)
        },
        "existingLanguages" => |item| {
            Value::List(
                item.node
                    .existing_locales
                    .iter()
                    .map(|l| Value::String(l.to_string()))
                    .collect(),
            )
        },
        _ => |_| Value::Null,
    }
}

/// Resolver-backed `ContentInterface` fields for a synthesized object.
pub(crate) fn base_fields(state: &SharedState) -> Vec<Field> {
    let mut fields: Vec<Field> = plain_base_fields()
        .into_iter()
        .map(|(name, ty, description)| {
            Field::new(name, ty, FieldResolver::node_value(base_value(name))).description(description)
        })
        .collect();

    let mut path = Field::new("path", TypeRef::named(TypeRef::STRING), FieldResolver::path())
        .description("Public URL");
    for arg in path_arguments() {
        path = path.argument(arg);
    }

    let mut children = Field::new(
        "children",
        TypeRef::named_nn(CONNECTION_TYPE),
        ChildrenResolver::resolve(state.clone()),
    )
    .description("Child content in repository order");
    for arg in children_arguments() {
        children = children.argument(arg);
    }

    fields.push(path);
    fields.push(children);
    fields
}

/// Resolver-backed `LocalizableInterface` fields.
pub(crate) fn localizable_fields() -> Vec<Field> {
    localizable_field_types()
        .into_iter()
        .map(|(name, ty, description)| {
            Field::new(name, ty, FieldResolver::node_value(base_value(name))).description(description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_tables_match_definitions() {
        let plain: Vec<_> = plain_base_fields().into_iter().map(|(name, _, _)| name).collect();
        assert_eq!(&BASE_FIELDS[..6], plain.as_slice());
        assert_eq!(&BASE_FIELDS[6..], &["path", "children"]);

        let localizable: Vec<_> = localizable_field_types().into_iter().map(|(name, _, _)| name).collect();
        assert_eq!(LOCALIZABLE_FIELDS, localizable.as_slice());
    }
}
