//! Content-type descriptors.
//!
//! A [`ContentTypeDescriptor`] is the catalog's description of one registered
//! content type: its name, the model it is backed by and the ordered list of
//! fields editors can fill in. Descriptors are plain data and can be loaded
//! from JSON or TOML catalogs.
//!
//! ```json
//! {
//!   "id": 3,
//!   "name": "ArticlePage",
//!   "model": { "id": "Acme.Models.ArticlePage", "kind": "page" },
//!   "fields": [
//!     { "name": "heading", "kind": { "scalar": "string" } },
//!     { "name": "teaser", "kind": { "block": { "model": "Acme.Blocks.Teaser" } } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the model class backing a content type (e.g. `Acme.Models.ArticlePage`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unqualified model name: the last `.`/`::` separated segment.
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit(['.', ':'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Capability family a model derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelKind {
    /// Addressable page with per-locale variants.
    Page,
    /// Nestable-only block.
    Block,
    /// Media asset (image, document, video).
    Media,
    /// Folder or other structural node.
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: ModelId,
    pub kind: ModelKind,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<ModelId>, kind: ModelKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Scalar value kinds a field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Xhtml,
    Url,
    ContentReference,
}

/// Declared value kind of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// A nested value of another (block) content type.
    Block { model: ModelId },
    List(Box<FieldKind>),
}

impl FieldKind {
    pub fn block(model: impl Into<ModelId>) -> Self {
        Self::Block {
            model: model.into(),
        }
    }

    pub fn list(item: FieldKind) -> Self {
        Self::List(Box::new(item))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Hidden fields are never exposed in the type graph.
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hidden: false,
            description: None,
        }
    }

    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(name, FieldKind::Scalar(kind))
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDescriptor {
    /// Numeric content type id assigned by the catalog.
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backing model; `None` for modelless types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelDescriptor>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ContentTypeDescriptor {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            model: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<ModelId>, kind: ModelKind) -> Self {
        self.model = Some(ModelDescriptor::new(model, kind));
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn model_id(&self) -> Option<&ModelId> {
        self.model.as_ref().map(|m| &m.id)
    }

    /// True iff the backing model derives from the block capability.
    pub fn is_block(&self) -> bool {
        matches!(self.model, Some(ModelDescriptor { kind: ModelKind::Block, .. }))
    }

    /// True iff the backing model supports page-level locale variance.
    pub fn is_localizable(&self) -> bool {
        matches!(self.model, Some(ModelDescriptor { kind: ModelKind::Page, .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_short_name() {
        assert_eq!(ModelId::new("Acme.Models.ArticlePage").short_name(), "ArticlePage");
        assert_eq!(ModelId::new("acme::blocks::Teaser").short_name(), "Teaser");
        assert_eq!(ModelId::new("StartPage").short_name(), "StartPage");
    }

    #[test]
    fn test_block_and_localizable_flags() {
        let page = ContentTypeDescriptor::new(1, "StartPage").with_model("Acme.StartPage", ModelKind::Page);
        let block = ContentTypeDescriptor::new(2, "Teaser").with_model("Acme.Teaser", ModelKind::Block);
        let modelless = ContentTypeDescriptor::new(3, "Legacy");

        assert!(page.is_localizable());
        assert!(!page.is_block());
        assert!(block.is_block());
        assert!(!block.is_localizable());
        assert!(!modelless.is_block());
        assert!(!modelless.is_localizable());
        assert!(modelless.model_id().is_none());
    }

    #[test]
    fn test_deserialize_descriptor_from_json() {
        let json = r#"{
            "id": 3,
            "name": "ArticlePage",
            "model": { "id": "Acme.Models.ArticlePage", "kind": "page" },
            "fields": [
                { "name": "heading", "kind": { "scalar": "string" }, "description": "Main heading" },
                { "name": "teaser", "kind": { "block": { "model": "Acme.Blocks.Teaser" } } },
                { "name": "tags", "kind": { "list": { "scalar": "string" } }, "hidden": true }
            ]
        }"#;

        let descriptor: ContentTypeDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.name, "ArticlePage");
        assert!(descriptor.is_localizable());
        assert_eq!(descriptor.fields.len(), 3);
        assert_eq!(descriptor.fields[0].kind, FieldKind::Scalar(ScalarKind::String));
        assert_eq!(descriptor.fields[1].kind, FieldKind::block("Acme.Blocks.Teaser"));
        assert_eq!(
            descriptor.fields[2].kind,
            FieldKind::list(FieldKind::Scalar(ScalarKind::String))
        );
        assert!(descriptor.fields[2].hidden);
    }
}
