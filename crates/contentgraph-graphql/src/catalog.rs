//! Content-type catalog adapter.
//!
//! Reads descriptors from a [`ContentTypeCatalog`] and prepares them for
//! synthesis: descriptors whose names cannot become GraphQL type names are
//! dropped, the rest keep catalog order.

use std::sync::LazyLock;

use contentgraph_core::ContentTypeDescriptor;
use contentgraph_storage::ContentTypeCatalog;
use regex::Regex;
use tracing::debug;

/// GraphQL name pattern: `[_A-Za-z][_0-9A-Za-z]*`.
static GRAPHQL_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("Invalid GraphQL name regex"));

/// Returns true if `name` is a valid GraphQL name outside the reserved `__` namespace.
pub fn is_valid_graphql_name(name: &str) -> bool {
    GRAPHQL_NAME_REGEX.is_match(name) && !name.starts_with("__")
}

/// Derives a GraphQL field name from a descriptor field name.
///
/// Characters outside `[_0-9A-Za-z]` become `_`, and a leading digit gets a
/// `_` prefix (`hero-image` becomes `hero_image`). Returns `None` when no
/// usable name remains.
pub fn graphql_field_name(name: &str) -> Option<String> {
    let mut field_name: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if field_name.starts_with(|c: char| c.is_ascii_digit()) {
        field_name.insert(0, '_');
    }

    if field_name.chars().all(|c| c == '_') || !is_valid_graphql_name(&field_name) {
        return None;
    }
    Some(field_name)
}

/// Enumerates the catalog's descriptors that can be synthesized.
pub fn available_content_types(catalog: &dyn ContentTypeCatalog) -> Vec<ContentTypeDescriptor> {
    catalog
        .list_content_types()
        .into_iter()
        .filter(|descriptor| {
            let valid = is_valid_graphql_name(&descriptor.name);
            if !valid {
                debug!(
                    content_type = %descriptor.name,
                    id = descriptor.id,
                    "Skipping content type with invalid GraphQL name"
                );
            }
            valid
        })
        .collect()
}

/// Splits descriptors into `(blocks, others)`, preserving relative order.
pub fn partition_content_types<F>(
    descriptors: &[ContentTypeDescriptor],
    is_block: F,
) -> (Vec<&ContentTypeDescriptor>, Vec<&ContentTypeDescriptor>)
where
    F: Fn(&ContentTypeDescriptor) -> bool,
{
    descriptors.iter().partition(|descriptor| is_block(descriptor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentgraph_core::ModelKind;

    struct StaticCatalog(Vec<ContentTypeDescriptor>);

    impl ContentTypeCatalog for StaticCatalog {
        fn list_content_types(&self) -> Vec<ContentTypeDescriptor> {
            self.0.clone()
        }
    }

    #[test]
    fn test_graphql_names() {
        assert!(is_valid_graphql_name("ArticlePage"));
        assert!(is_valid_graphql_name("_internal"));
        assert!(!is_valid_graphql_name("Article Page"));
        assert!(!is_valid_graphql_name("1stPage"));
        assert!(!is_valid_graphql_name("__Schema"));
        assert!(!is_valid_graphql_name(""));
    }

    #[test]
    fn test_graphql_field_name() {
        assert_eq!(graphql_field_name("heading").as_deref(), Some("heading"));
        assert_eq!(graphql_field_name("hero-image").as_deref(), Some("hero_image"));
        assert_eq!(graphql_field_name("2col").as_deref(), Some("_2col"));
        assert_eq!(graphql_field_name("---"), None);
        assert_eq!(graphql_field_name("__typename"), None);
    }

    #[test]
    fn test_available_content_types_drops_invalid_names() {
        let catalog = StaticCatalog(vec![
            ContentTypeDescriptor::new(1, "StartPage"),
            ContentTypeDescriptor::new(2, "Broken Name"),
            ContentTypeDescriptor::new(3, "ArticlePage"),
        ]);

        let names: Vec<_> = available_content_types(&catalog)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["StartPage", "ArticlePage"]);
    }

    #[test]
    fn test_partition_preserves_order() {
        let descriptors = vec![
            ContentTypeDescriptor::new(1, "StartPage").with_model("A.StartPage", ModelKind::Page),
            ContentTypeDescriptor::new(2, "Teaser").with_model("A.Teaser", ModelKind::Block),
            ContentTypeDescriptor::new(3, "Article").with_model("A.Article", ModelKind::Page),
            ContentTypeDescriptor::new(4, "Hero").with_model("A.Hero", ModelKind::Block),
        ];

        let (blocks, others) = partition_content_types(&descriptors, ContentTypeDescriptor::is_block);
        let blocks: Vec<_> = blocks.iter().map(|d| d.name.as_str()).collect();
        let others: Vec<_> = others.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(blocks, vec!["Teaser", "Hero"]);
        assert_eq!(others, vec!["StartPage", "Article"]);
    }
}
