//! Content nodes as returned by a repository.
//!
//! A [`ContentNode`] is one content item materialized in one locale. Its
//! property values have already been localized by the repository.

use indexmap::IndexMap;
use time::OffsetDateTime;

use crate::descriptor::ModelId;
use crate::locale::Locale;
use crate::reference::ContentReference;

/// A single property value on a content node.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(OffsetDateTime),
    Reference(ContentReference),
    /// A local block nested inside the owning node.
    Block(Box<ContentNode>),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&ContentNode> {
        match self {
            Self::Block(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<ContentReference> for PropertyValue {
    fn from(value: ContentReference) -> Self {
        Self::Reference(value)
    }
}

impl From<ContentNode> for PropertyValue {
    fn from(value: ContentNode) -> Self {
        Self::Block(Box::new(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    pub reference: ContentReference,
    pub parent: Option<ContentReference>,
    pub name: String,
    pub content_type_id: i32,
    /// Model type tag used for classification; `None` when the model is unknown.
    pub model_type: Option<ModelId>,
    /// Locale this node was materialized in.
    pub locale: Locale,
    pub master_locale: Option<Locale>,
    pub existing_locales: Vec<Locale>,
    pub properties: IndexMap<String, PropertyValue>,
}

impl ContentNode {
    pub fn new(reference: ContentReference, name: impl Into<String>, locale: Locale) -> Self {
        Self {
            reference,
            parent: None,
            name: name.into(),
            content_type_id: 0,
            model_type: None,
            locale,
            master_locale: None,
            existing_locales: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    /// Creates a local block value without an addressable reference.
    pub fn local_block(model: impl Into<ModelId>, locale: Locale) -> Self {
        let model = model.into();
        let mut node = Self::new(ContentReference::EMPTY, model.short_name().to_string(), locale);
        node.model_type = Some(model);
        node
    }

    #[must_use]
    pub fn with_parent(mut self, parent: ContentReference) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<ModelId>) -> Self {
        self.model_type = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_content_type_id(mut self, id: i32) -> Self {
        self.content_type_id = id;
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_block_has_empty_reference() {
        let en = Locale::parse("en").unwrap();
        let block = ContentNode::local_block("Acme.Blocks.Teaser", en).with_property("title", "Hi");

        assert!(block.reference.is_empty());
        assert_eq!(block.name, "Teaser");
        assert_eq!(block.property("title").and_then(PropertyValue::as_str), Some("Hi"));
    }

    #[test]
    fn test_nested_block_property() {
        let en = Locale::parse("en").unwrap();
        let teaser = ContentNode::local_block("Acme.Blocks.Teaser", en.clone());
        let page = ContentNode::new(ContentReference::new(5), "Article", en)
            .with_parent(ContentReference::new(1))
            .with_property("teaser", teaser.clone());

        assert_eq!(page.property("teaser").and_then(PropertyValue::as_block), Some(&teaser));
        assert!(page.property("missing").is_none());
    }
}
