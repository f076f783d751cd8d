//! Type graph synthesis.
//!
//! Synthesis runs in two passes over the descriptors, blocks first:
//!
//! 1. every descriptor becomes a [`SynthesizedType`] and is registered
//!    immediately, followed by the sentinel;
//! 2. custom fields are bound. A block field binds only when the model it
//!    references has a registered type; otherwise it is left out.
//!
//! Types reference each other by name, so self- and mutually-referential
//! block fields need no special handling.

use std::collections::HashSet;

use contentgraph_core::{ContentTypeDescriptor, FieldDescriptor, FieldKind, ModelId};
use contentgraph_storage::ContentTypeCatalog;
use tracing::{debug, trace, warn};

use super::interfaces::{BASE_FIELDS, LOCALIZABLE_FIELDS};
use super::registry::{
    BindingKind, FieldBinding, InterfaceSet, SynthesisError, SynthesizedType, TypeOrigin, TypeRegistry,
    TypeRegistryBuilder,
};
use crate::catalog::{available_content_types, graphql_field_name, partition_content_types};

/// Why a declared field has no binding.
enum Omission {
    UnresolvedBlock(ModelId),
    NestedList,
}

/// Synthesizes the type registry for `descriptors`.
///
/// `is_block` decides which descriptors are synthesized in the block pass;
/// `interfaces` decides the interface membership of each type. The result
/// depends only on the order and content of `descriptors`.
///
/// # Errors
///
/// Returns an error on duplicate type names or models and on names reserved
/// by the schema.
pub fn synthesize<B, I>(
    descriptors: &[ContentTypeDescriptor],
    is_block: B,
    interfaces: I,
) -> Result<TypeRegistry, SynthesisError>
where
    B: Fn(&ContentTypeDescriptor) -> bool,
    I: Fn(&ContentTypeDescriptor) -> InterfaceSet,
{
    let (blocks, others) = partition_content_types(descriptors, is_block);
    debug!(
        blocks = blocks.len(),
        others = others.len(),
        "Starting type graph synthesis"
    );

    let mut builder = TypeRegistryBuilder::new();

    let ordered = blocks
        .into_iter()
        .map(|descriptor| (descriptor, TypeOrigin::Block))
        .chain(others.into_iter().map(|descriptor| (descriptor, TypeOrigin::Content)));

    for (descriptor, origin) in ordered {
        let ty = SynthesizedType::from_descriptor(descriptor, origin, interfaces(descriptor));
        trace!(type_name = %ty.name, ?origin, "Registering content type");
        builder.register(ty)?;
    }
    builder.register(SynthesizedType::sentinel())?;

    let bindings: Vec<(String, Vec<FieldBinding>)> = builder
        .types()
        .filter_map(|ty| {
            let descriptor = ty.descriptor.as_ref()?;
            Some((
                ty.name.clone(),
                bind_fields(&ty.name, descriptor, ty.interfaces, &builder),
            ))
        })
        .collect();

    for (name, fields) in bindings {
        builder.set_fields(&name, fields);
    }

    let registry = builder.finish()?;
    debug!(count = registry.len(), "Type graph synthesis complete");
    Ok(registry)
}

/// Synthesizes the registry for every usable descriptor in `catalog`.
///
/// # Errors
///
/// See [`synthesize`].
pub fn synthesize_catalog(catalog: &dyn ContentTypeCatalog) -> Result<TypeRegistry, SynthesisError> {
    let descriptors = available_content_types(catalog);
    synthesize(
        &descriptors,
        |descriptor| catalog.is_block_type(descriptor),
        InterfaceSet::for_descriptor,
    )
}

fn bind_fields(
    type_name: &str,
    descriptor: &ContentTypeDescriptor,
    interfaces: InterfaceSet,
    builder: &TypeRegistryBuilder,
) -> Vec<FieldBinding> {
    let mut taken: HashSet<&str> = BASE_FIELDS.iter().copied().collect();
    if interfaces.is_localizable() {
        taken.extend(LOCALIZABLE_FIELDS.iter().copied());
    }
    let mut custom: HashSet<String> = HashSet::new();
    let mut bindings = Vec::new();

    for field in &descriptor.fields {
        if field.hidden {
            trace!(type_name = %type_name, field = %field.name, "Skipping hidden field");
            continue;
        }

        let Some(field_name) = graphql_field_name(&field.name) else {
            warn!(type_name = %type_name, field = %field.name, "Omitting field with unusable name");
            continue;
        };

        if taken.contains(field_name.as_str()) || custom.contains(&field_name) {
            warn!(
                type_name = %type_name,
                field = %field_name,
                "Omitting field that collides with an existing field"
            );
            continue;
        }

        match bind_kind(&field.kind, builder) {
            Ok(kind) => {
                trace!(type_name = %type_name, field = %field_name, ?kind, "Bound field");
                custom.insert(field_name.clone());
                bindings.push(binding(field, field_name, kind));
            }
            Err(Omission::UnresolvedBlock(model)) => {
                warn!(
                    type_name = %type_name,
                    field = %field_name,
                    model = %model,
                    "Omitting block field: no registered type for model"
                );
            }
            Err(Omission::NestedList) => {
                warn!(type_name = %type_name, field = %field_name, "Omitting nested list field");
            }
        }
    }

    bindings
}

fn bind_kind(kind: &FieldKind, builder: &TypeRegistryBuilder) -> Result<BindingKind, Omission> {
    let block_type = |model: &ModelId| {
        builder
            .type_name_for_model(model)
            .map(str::to_string)
            .ok_or_else(|| Omission::UnresolvedBlock(model.clone()))
    };

    match kind {
        FieldKind::Scalar(scalar) => Ok(BindingKind::Scalar(*scalar)),
        FieldKind::Block { model } => Ok(BindingKind::Block {
            type_name: block_type(model)?,
        }),
        FieldKind::List(item) => match item.as_ref() {
            FieldKind::Scalar(scalar) => Ok(BindingKind::ScalarList(*scalar)),
            FieldKind::Block { model } => Ok(BindingKind::BlockList {
                type_name: block_type(model)?,
            }),
            FieldKind::List(_) => Err(Omission::NestedList),
        },
    }
}

fn binding(field: &FieldDescriptor, field_name: String, kind: BindingKind) -> FieldBinding {
    FieldBinding {
        field_name,
        property: field.name.clone(),
        description: field.description.clone(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Classifier, SENTINEL_TYPE};
    use contentgraph_core::{ModelKind, ScalarKind};

    fn catalog() -> Vec<ContentTypeDescriptor> {
        vec![
            ContentTypeDescriptor::new(1, "StartPage")
                .with_model("Acme.StartPage", ModelKind::Page)
                .with_field(FieldDescriptor::scalar("heading", ScalarKind::String))
                .with_field(FieldDescriptor::new("hero", FieldKind::block("Acme.Hero")))
                .with_field(FieldDescriptor::new("promo", FieldKind::block("Acme.Missing")))
                .with_field(FieldDescriptor::scalar("secret", ScalarKind::String).hidden()),
            ContentTypeDescriptor::new(2, "Hero")
                .with_model("Acme.Hero", ModelKind::Block)
                .with_field(FieldDescriptor::scalar("title", ScalarKind::String))
                .with_field(FieldDescriptor::new("nested", FieldKind::block("Acme.Hero"))),
            ContentTypeDescriptor::new(3, "LegacyPage"),
        ]
    }

    fn run(descriptors: &[ContentTypeDescriptor]) -> TypeRegistry {
        synthesize(descriptors, ContentTypeDescriptor::is_block, InterfaceSet::for_descriptor).unwrap()
    }

    #[test]
    fn test_one_type_per_descriptor_plus_sentinel() {
        let registry = run(&catalog());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["Hero", "StartPage", "LegacyPage", SENTINEL_TYPE]
        );
    }

    #[test]
    fn test_block_fields_bind_to_registered_types() {
        let registry = run(&catalog());
        let start = registry.get("StartPage").unwrap();

        let names: Vec<_> = start.fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["heading", "hero"]);
        assert_eq!(
            start.field("hero").map(|f| &f.kind),
            Some(&BindingKind::Block {
                type_name: "Hero".into()
            })
        );
    }

    #[test]
    fn test_self_referential_block() {
        let registry = run(&catalog());
        let hero = registry.get("Hero").unwrap();
        assert_eq!(
            hero.field("nested").map(|f| &f.kind),
            Some(&BindingKind::Block {
                type_name: "Hero".into()
            })
        );
    }

    #[test]
    fn test_interfaces_and_classifiers() {
        let registry = run(&catalog());
        assert!(registry.get("StartPage").unwrap().interfaces.is_localizable());
        assert!(!registry.get("Hero").unwrap().interfaces.is_localizable());
        assert_eq!(registry.get("LegacyPage").unwrap().classifier, Classifier::Unclaimed);
        assert_eq!(registry.sentinel().origin, TypeOrigin::Sentinel);
    }

    #[test]
    fn test_collisions_and_nested_lists_are_omitted() {
        let descriptors = vec![
            ContentTypeDescriptor::new(1, "Article")
                .with_model("Acme.Article", ModelKind::Page)
                .with_field(FieldDescriptor::scalar("name", ScalarKind::String))
                .with_field(FieldDescriptor::scalar("language", ScalarKind::String))
                .with_field(FieldDescriptor::scalar("body", ScalarKind::Xhtml))
                .with_field(FieldDescriptor::scalar("body", ScalarKind::String))
                .with_field(FieldDescriptor::new(
                    "matrix",
                    FieldKind::list(FieldKind::list(FieldKind::Scalar(ScalarKind::Integer))),
                ))
                .with_field(FieldDescriptor::new(
                    "tags",
                    FieldKind::list(FieldKind::Scalar(ScalarKind::String)),
                )),
        ];

        let registry = run(&descriptors);
        let article = registry.get("Article").unwrap();
        let fields: Vec<_> = article
            .fields
            .iter()
            .map(|f| (f.field_name.as_str(), f.kind.clone()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("body", BindingKind::Scalar(ScalarKind::Xhtml)),
                ("tags", BindingKind::ScalarList(ScalarKind::String)),
            ]
        );
    }

    #[test]
    fn test_missing_block_type_is_not_fatal() {
        let descriptors = vec![
            ContentTypeDescriptor::new(1, "Article")
                .with_model("Acme.Article", ModelKind::Page)
                .with_field(FieldDescriptor::new(
                    "teasers",
                    FieldKind::list(FieldKind::block("Acme.Teaser")),
                )),
        ];

        let registry = run(&descriptors);
        assert!(registry.get("Article").unwrap().fields.is_empty());
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        assert_eq!(run(&catalog()), run(&catalog()));

        let mut reordered = catalog();
        reordered.reverse();
        let (forward, backward) = (run(&catalog()), run(&reordered));
        assert_ne!(forward, backward);
        assert_ne!(
            forward.names().collect::<Vec<_>>(),
            backward.names().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_reserved_and_duplicate_names_are_fatal() {
        let reserved = vec![ContentTypeDescriptor::new(1, "Query")];
        assert_eq!(
            synthesize(&reserved, ContentTypeDescriptor::is_block, InterfaceSet::for_descriptor)
                .unwrap_err(),
            SynthesisError::ReservedName("Query".into())
        );

        let sentinel_clash = vec![ContentTypeDescriptor::new(1, SENTINEL_TYPE)];
        assert!(
            synthesize(&sentinel_clash, ContentTypeDescriptor::is_block, InterfaceSet::for_descriptor)
                .is_err()
        );

        let duplicate = vec![
            ContentTypeDescriptor::new(1, "Article"),
            ContentTypeDescriptor::new(2, "Article"),
        ];
        assert_eq!(
            synthesize(&duplicate, ContentTypeDescriptor::is_block, InterfaceSet::for_descriptor)
                .unwrap_err(),
            SynthesisError::DuplicateTypeName("Article".into())
        );
    }

    #[test]
    fn test_custom_block_predicate_and_interfaces() {
        // every type localizable, nothing treated as a block
        let registry = synthesize(&catalog(), |_| false, |_| InterfaceSet::localizable()).unwrap();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["StartPage", "Hero", "LegacyPage", SENTINEL_TYPE]
        );
        assert_eq!(registry.get("Hero").unwrap().origin, TypeOrigin::Content);
        assert!(registry.get("Hero").unwrap().interfaces.is_localizable());
    }
}
