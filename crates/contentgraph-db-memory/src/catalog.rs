use contentgraph_core::ContentTypeDescriptor;
use contentgraph_storage::ContentTypeCatalog;

/// Content-type catalog backed by an ordered in-memory list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    types: Vec<ContentTypeDescriptor>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, descriptor: ContentTypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    /// Loads a catalog from a JSON array of descriptors.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let types: Vec<ContentTypeDescriptor> = serde_json::from_str(json)?;
        Ok(Self { types })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ContentTypeCatalog for InMemoryCatalog {
    fn list_content_types(&self) -> Vec<ContentTypeDescriptor> {
        self.types.clone()
    }
}

impl FromIterator<ContentTypeDescriptor> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = ContentTypeDescriptor>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentgraph_core::ModelKind;

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = InMemoryCatalog::new()
            .with_type(ContentTypeDescriptor::new(2, "ArticlePage"))
            .with_type(ContentTypeDescriptor::new(1, "StartPage"));

        let names: Vec<_> = catalog
            .list_content_types()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["ArticlePage", "StartPage"]);
    }

    #[test]
    fn test_catalog_from_json() {
        let catalog = InMemoryCatalog::from_json(
            r#"[
                { "id": 1, "name": "Teaser", "model": { "id": "Acme.Teaser", "kind": "block" } },
                { "id": 2, "name": "StartPage", "model": { "id": "Acme.StartPage", "kind": "page" } }
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let types = catalog.list_content_types();
        assert!(catalog.is_block_type(&types[0]));
        assert_eq!(types[1].model.as_ref().map(|m| m.kind), Some(ModelKind::Page));
    }

    #[test]
    fn test_catalog_from_invalid_json() {
        assert!(InMemoryCatalog::from_json("{").is_err());
    }
}
