//! `ContentInterfaceConnection`, `ContentInterfaceEdge` and `PageInfo`.

use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, Object, TypeRef};

use super::{CONNECTION_TYPE, CONTENT_INTERFACE, CONTENT_UNION, EDGE_TYPE, PAGE_INFO_TYPE};
use crate::pagination::{Connection, Edge, PageInfo};
use crate::resolvers::ContentItem;

type ItemConnection = Connection<ContentItem>;
type ItemEdge = Edge<ContentItem>;

fn optional_string(value: &Option<String>) -> Option<Value> {
    value.clone().map(Value::String)
}

pub(crate) fn page_info_type() -> Object {
    Object::new(PAGE_INFO_TYPE)
        .description("Position of a page within the full list")
        .field(Field::new("hasNextPage", TypeRef::named_nn(TypeRef::BOOLEAN), |ctx| {
            FieldFuture::new(async move {
                let info = ctx.parent_value.try_downcast_ref::<PageInfo>()?;
                Ok(Some(Value::Boolean(info.has_next_page)))
            })
        }))
        .field(Field::new("hasPreviousPage", TypeRef::named_nn(TypeRef::BOOLEAN), |ctx| {
            FieldFuture::new(async move {
                let info = ctx.parent_value.try_downcast_ref::<PageInfo>()?;
                Ok(Some(Value::Boolean(info.has_previous_page)))
            })
        }))
        .field(Field::new("startCursor", TypeRef::named(TypeRef::STRING), |ctx| {
            FieldFuture::new(async move {
                let info = ctx.parent_value.try_downcast_ref::<PageInfo>()?;
                Ok(optional_string(&info.start_cursor))
            })
        }))
        .field(Field::new("endCursor", TypeRef::named(TypeRef::STRING), |ctx| {
            FieldFuture::new(async move {
                let info = ctx.parent_value.try_downcast_ref::<PageInfo>()?;
                Ok(optional_string(&info.end_cursor))
            })
        }))
}

pub(crate) fn edge_type() -> Object {
    Object::new(EDGE_TYPE)
        .description("A content item and its cursor")
        .field(
            Field::new("cursor", TypeRef::named_nn(TypeRef::STRING), |ctx| {
                FieldFuture::new(async move {
                    let edge = ctx.parent_value.try_downcast_ref::<ItemEdge>()?;
                    Ok(Some(Value::String(edge.cursor.clone())))
                })
            })
            .description("Opaque position of this edge"),
        )
        .field(Field::new("node", TypeRef::named_nn(CONTENT_INTERFACE), |ctx| {
            FieldFuture::new(async move {
                let edge = ctx.parent_value.try_downcast_ref::<ItemEdge>()?;
                Ok(Some(edge.node.clone().into_field_value()))
            })
        }))
}

pub(crate) fn connection_type() -> Object {
    Object::new(CONNECTION_TYPE)
        .description("Cursor-based pagination over content")
        .field(
            Field::new("totalCount", TypeRef::named_nn(TypeRef::INT), |ctx| {
                FieldFuture::new(async move {
                    let connection = ctx.parent_value.try_downcast_ref::<ItemConnection>()?;
                    Ok(Some(Value::from(connection.total_count)))
                })
            })
            .description("Number of items across all pages"),
        )
        .field(Field::new("pageInfo", TypeRef::named_nn(PAGE_INFO_TYPE), |ctx| {
            FieldFuture::new(async move {
                let connection = ctx.parent_value.try_downcast_ref::<ItemConnection>()?;
                Ok(Some(FieldValue::owned_any(connection.page_info.clone())))
            })
        }))
        .field(Field::new("edges", TypeRef::named_nn_list_nn(EDGE_TYPE), |ctx| {
            FieldFuture::new(async move {
                let connection = ctx.parent_value.try_downcast_ref::<ItemConnection>()?;
                Ok(Some(FieldValue::list(
                    connection
                        .edges
                        .iter()
                        .map(|edge| FieldValue::owned_any(edge.clone())),
                )))
            })
        }))
        .field(
            Field::new("items", TypeRef::named_nn_list_nn(CONTENT_UNION), |ctx| {
                FieldFuture::new(async move {
                    let connection = ctx.parent_value.try_downcast_ref::<ItemConnection>()?;
                    Ok(Some(FieldValue::list(
                        connection.nodes().map(|item| item.clone().into_field_value()),
                    )))
                })
            })
            .description("The items of this page"),
        )
}
