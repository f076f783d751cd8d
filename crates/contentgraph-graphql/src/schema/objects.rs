//! Rendering of synthesized types into GraphQL objects.

use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, Object, TypeRef, Union};
use contentgraph_core::ScalarKind;
use tracing::trace;

use super::interfaces::{base_fields, localizable_fields};
use super::registry::{BindingKind, FieldBinding, SynthesizedType, TypeRegistry};
use super::{
    CONTENT_INTERFACE, CONTENT_ROOT_TYPE, CONTENT_UNION, DATETIME_SCALAR, QUERY_TYPE, URL_SCALAR,
    XHTML_SCALAR,
};
use crate::locale::{ALLOW_FALLBACK_ARG, LOCALE_ARG};
use crate::resolvers::{ContentRoot, FieldResolver, ItemResolver, SharedState};

/// GraphQL type name for a scalar kind.
pub(crate) fn scalar_type_name(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::String => TypeRef::STRING,
        ScalarKind::Integer | ScalarKind::ContentReference => TypeRef::INT,
        ScalarKind::Float => TypeRef::FLOAT,
        ScalarKind::Boolean => TypeRef::BOOLEAN,
        ScalarKind::DateTime => DATETIME_SCALAR,
        ScalarKind::Xhtml => XHTML_SCALAR,
        ScalarKind::Url => URL_SCALAR,
    }
}

fn binding_type(kind: &BindingKind) -> TypeRef {
    match kind {
        BindingKind::Scalar(scalar) => TypeRef::named(scalar_type_name(*scalar)),
        BindingKind::ScalarList(scalar) => TypeRef::named_list(scalar_type_name(*scalar)),
        BindingKind::Block { type_name } => TypeRef::named(type_name),
        BindingKind::BlockList { type_name } => TypeRef::named_nn_list(type_name),
    }
}

fn custom_field(binding: &FieldBinding, state: &SharedState) -> Field {
    let field = Field::new(
        binding.field_name.as_str(),
        binding_type(&binding.kind),
        FieldResolver::property(binding.clone(), state.clone()),
    );

    match &binding.description {
        Some(description) => field.description(description),
        None => field,
    }
}

/// Creates the object type for a synthesized type.
pub(crate) fn content_object(ty: &SynthesizedType, state: &SharedState) -> Object {
    let mut object = Object::new(ty.name.as_str());
    if let Some(description) = ty.description() {
        object = object.description(description);
    }
    for interface in ty.interfaces.names() {
        object = object.implement(interface);
    }

    for field in base_fields(state) {
        object = object.field(field);
    }
    if ty.interfaces.is_localizable() {
        for field in localizable_fields() {
            object = object.field(field);
        }
    }

    for binding in &ty.fields {
        trace!(type_name = %ty.name, field = %binding.field_name, "Adding custom field");
        object = object.field(custom_field(binding, state));
    }

    object
}

/// Creates the union of every synthesized type.
pub(crate) fn content_union(registry: &TypeRegistry) -> Union {
    registry.names().fold(
        Union::new(CONTENT_UNION).description("Any content type"),
        |union, name| union.possible_type(name),
    )
}

/// Creates the `Content` namespace object with the `item` query.
pub(crate) fn content_root(state: &SharedState) -> Object {
    let item = Field::new(
        "item",
        TypeRef::named(CONTENT_INTERFACE),
        ItemResolver::resolve(state.clone()),
    )
    .description("Fetch one content item; the start page when no id is given")
    .argument(InputValue::new("id", TypeRef::named(TypeRef::INT)).description("Content id"))
    .argument(
        InputValue::new(LOCALE_ARG, TypeRef::named(TypeRef::STRING))
            .description("Requested locale")
            .default_value(Value::String(state.default_locale.to_string())),
    )
    .argument(
        InputValue::new(ALLOW_FALLBACK_ARG, TypeRef::named(TypeRef::BOOLEAN))
            .description("Return a fallback-locale variant when the requested locale is missing")
            .default_value(Value::Boolean(true)),
    );

    Object::new(CONTENT_ROOT_TYPE)
        .description("Content queries")
        .field(item)
}

/// Creates the root query type.
pub(crate) fn query_root() -> Object {
    Object::new(QUERY_TYPE).field(
        Field::new("content", TypeRef::named_nn(CONTENT_ROOT_TYPE), |_| {
            FieldFuture::new(async move { Ok(Some(FieldValue::owned_any(ContentRoot))) })
        })
        .description("Content queries"),
    )
}
