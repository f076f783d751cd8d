//! Registry of synthesized content types.
//!
//! The registry maps GraphQL type names to [`SynthesizedType`]s in
//! registration order. It is assembled once through [`TypeRegistryBuilder`]
//! and is read-only afterwards; request-time code shares it behind an `Arc`.

use std::sync::Arc;

use contentgraph_core::{ContentNode, ContentTypeDescriptor, ModelId, ScalarKind};
use indexmap::IndexMap;

use super::{
    CONNECTION_TYPE, CONTENT_INTERFACE, CONTENT_ROOT_TYPE, CONTENT_UNION, DATETIME_SCALAR, EDGE_TYPE,
    LOCALIZABLE_INTERFACE, PAGE_INFO_TYPE, QUERY_TYPE, SENTINEL_TYPE, URL_SCALAR, XHTML_SCALAR,
};

/// Names no content type may take.
const RESERVED_NAMES: &[&str] = &[
    QUERY_TYPE,
    CONTENT_ROOT_TYPE,
    CONTENT_INTERFACE,
    LOCALIZABLE_INTERFACE,
    CONTENT_UNION,
    CONNECTION_TYPE,
    EDGE_TYPE,
    PAGE_INFO_TYPE,
    SENTINEL_TYPE,
    DATETIME_SCALAR,
    XHTML_SCALAR,
    URL_SCALAR,
    "String",
    "Int",
    "Float",
    "Boolean",
    "ID",
];

/// Returns true if `name` is taken by the fixed part of the schema.
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Fatal errors raised while synthesizing the type graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("Duplicate content type name: '{0}'")]
    DuplicateTypeName(String),

    #[error("Model '{model}' is claimed by both '{existing}' and '{duplicate}'")]
    DuplicateModel {
        model: ModelId,
        existing: String,
        duplicate: String,
    },

    #[error("Content type name '{0}' is reserved by the schema")]
    ReservedName(String),

    #[error("No unresolved-type sentinel registered; classification would be partial")]
    MissingSentinel,

    #[error("More than one unresolved-type sentinel registered")]
    AmbiguousSentinel,
}

/// Interfaces a synthesized type implements.
///
/// Every type implements `ContentInterface`; the set records the optional
/// memberships on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterfaceSet {
    localizable: bool,
}

impl InterfaceSet {
    /// `ContentInterface` only.
    pub fn content() -> Self {
        Self { localizable: false }
    }

    /// `ContentInterface` and `LocalizableInterface`.
    pub fn localizable() -> Self {
        Self { localizable: true }
    }

    /// Default membership rule: localizable iff the model has page-level
    /// locale variance.
    pub fn for_descriptor(descriptor: &ContentTypeDescriptor) -> Self {
        if descriptor.is_localizable() {
            Self::localizable()
        } else {
            Self::content()
        }
    }

    pub fn is_localizable(&self) -> bool {
        self.localizable
    }

    /// Interface names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(CONTENT_INTERFACE).chain(self.localizable.then_some(LOCALIZABLE_INTERFACE))
    }
}

/// Predicate deciding which content nodes a type represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classifier {
    /// Nodes whose model type tag equals the model id.
    Model(ModelId),
    /// Nodes nothing else claims. Only the sentinel is ever selected through
    /// this classifier.
    Unclaimed,
}

impl Classifier {
    pub fn matches(&self, node: &ContentNode) -> bool {
        match self {
            Self::Model(model) => node.model_type.as_ref() == Some(model),
            Self::Unclaimed => false,
        }
    }
}

/// Which synthesis step produced a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOrigin {
    Block,
    Content,
    Sentinel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    Scalar(ScalarKind),
    ScalarList(ScalarKind),
    Block { type_name: String },
    BlockList { type_name: String },
}

/// A custom field of a synthesized type and the property it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub field_name: String,
    pub property: String,
    pub description: Option<String>,
    pub kind: BindingKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedType {
    pub name: String,
    /// Backing descriptor; `None` for the sentinel.
    pub descriptor: Option<Arc<ContentTypeDescriptor>>,
    pub interfaces: InterfaceSet,
    pub classifier: Classifier,
    pub origin: TypeOrigin,
    /// Custom fields in declaration order.
    pub fields: Vec<FieldBinding>,
}

impl SynthesizedType {
    /// Creates a type for `descriptor` without field bindings.
    pub fn from_descriptor(
        descriptor: &ContentTypeDescriptor,
        origin: TypeOrigin,
        interfaces: InterfaceSet,
    ) -> Self {
        let classifier = match descriptor.model_id() {
            Some(model) => Classifier::Model(model.clone()),
            None => Classifier::Unclaimed,
        };

        Self {
            name: descriptor.name.clone(),
            descriptor: Some(Arc::new(descriptor.clone())),
            interfaces,
            classifier,
            origin,
            fields: Vec::new(),
        }
    }

    /// The unresolved-type sentinel.
    pub fn sentinel() -> Self {
        Self {
            name: SENTINEL_TYPE.to_string(),
            descriptor: None,
            interfaces: InterfaceSet::content(),
            classifier: Classifier::Unclaimed,
            origin: TypeOrigin::Sentinel,
            fields: Vec::new(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.descriptor.as_ref().and_then(|d| d.description.as_deref())
    }

    pub fn is_sentinel(&self) -> bool {
        self.origin == TypeOrigin::Sentinel
    }

    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.fields.iter().find(|binding| binding.field_name == name)
    }
}

/// The synthesized type graph.
///
/// Equality is order-sensitive: two registries are equal only if they hold
/// equal types in the same registration order.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: IndexMap<String, SynthesizedType>,
    by_model: IndexMap<ModelId, String>,
    sentinel: SynthesizedType,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Looks up a type by GraphQL name, the sentinel included.
    pub fn get(&self, name: &str) -> Option<&SynthesizedType> {
        if name == self.sentinel.name {
            return Some(&self.sentinel);
        }
        self.types.get(name)
    }

    /// All types in registration order; the sentinel comes last.
    pub fn iter(&self) -> impl Iterator<Item = &SynthesizedType> {
        self.types.values().chain(std::iter::once(&self.sentinel))
    }

    /// Type names in registration order; the sentinel comes last.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|ty| ty.name.as_str())
    }

    /// Number of types, the sentinel included.
    pub fn len(&self) -> usize {
        self.types.len() + 1
    }

    /// Always false; a finished registry holds at least the sentinel.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn sentinel(&self) -> &SynthesizedType {
        &self.sentinel
    }

    pub fn type_for_model(&self, model: &ModelId) -> Option<&SynthesizedType> {
        self.by_model.get(model).and_then(|name| self.types.get(name))
    }

    /// Returns the type representing `node`.
    ///
    /// Model classifiers are tried in registration order; when none matches
    /// the sentinel represents the node.
    pub fn classify(&self, node: &ContentNode) -> &SynthesizedType {
        node.model_type
            .as_ref()
            .and_then(|model| self.type_for_model(model))
            .filter(|ty| ty.classifier.matches(node))
            .unwrap_or(&self.sentinel)
    }

    pub fn has_localizable_types(&self) -> bool {
        self.iter().any(|ty| ty.interfaces.is_localizable())
    }
}

impl PartialEq for TypeRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

/// Assembles a [`TypeRegistry`], rejecting conflicting registrations.
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    types: IndexMap<String, SynthesizedType>,
    by_model: IndexMap<ModelId, String>,
    sentinel: Option<SynthesizedType>,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a content type.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is reserved or already registered, or if
    /// another type already claims the same model.
    pub fn register(&mut self, ty: SynthesizedType) -> Result<(), SynthesisError> {
        if ty.is_sentinel() {
            return self.register_sentinel(ty);
        }
        if is_reserved_name(&ty.name) {
            return Err(SynthesisError::ReservedName(ty.name));
        }
        if self.types.contains_key(&ty.name) {
            return Err(SynthesisError::DuplicateTypeName(ty.name));
        }
        if let Classifier::Model(model) = &ty.classifier {
            if let Some(existing) = self.by_model.get(model) {
                return Err(SynthesisError::DuplicateModel {
                    model: model.clone(),
                    existing: existing.clone(),
                    duplicate: ty.name,
                });
            }
            self.by_model.insert(model.clone(), ty.name.clone());
        }

        self.types.insert(ty.name.clone(), ty);
        Ok(())
    }

    fn register_sentinel(&mut self, ty: SynthesizedType) -> Result<(), SynthesisError> {
        if self.sentinel.is_some() {
            return Err(SynthesisError::AmbiguousSentinel);
        }
        self.sentinel = Some(ty);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Name of the registered type claiming `model`.
    pub fn type_name_for_model(&self, model: &ModelId) -> Option<&str> {
        self.by_model.get(model).map(String::as_str)
    }

    /// Registered content types in registration order, the sentinel excluded.
    pub fn types(&self) -> impl Iterator<Item = &SynthesizedType> {
        self.types.values()
    }

    /// Replaces the field bindings of a registered type.
    pub fn set_fields(&mut self, name: &str, fields: Vec<FieldBinding>) {
        if let Some(ty) = self.types.get_mut(name) {
            ty.fields = fields;
        }
    }

    /// Finishes the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::MissingSentinel`] if no sentinel was
    /// registered.
    pub fn finish(self) -> Result<TypeRegistry, SynthesisError> {
        let sentinel = self.sentinel.ok_or(SynthesisError::MissingSentinel)?;
        Ok(TypeRegistry {
            types: self.types,
            by_model: self.by_model,
            sentinel,
        })
    }
}
