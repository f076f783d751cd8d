//! Collaborator traits for the content graph.

use async_trait::async_trait;
use contentgraph_core::{ContentNode, ContentReference, ContentTypeDescriptor, Locale};

use crate::error::StorageError;
use crate::options::LoaderOptions;

/// The content repository: a tree of nodes addressed by reference and locale.
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use contentgraph_storage::{ContentRepository, LoaderOptions};
///
/// async fn titles(repo: &dyn ContentRepository, parent: ContentReference, locale: Locale) -> Vec<String> {
///     let options = LoaderOptions::new(locale);
///     repo.children(parent, &options)
///         .await
///         .map(|nodes| nodes.into_iter().map(|n| n.name).collect())
///         .unwrap_or_default()
/// }
/// ```
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetches a node materialized in the requested locale.
    ///
    /// Returns `None` if the node does not exist, or if it has no variant in
    /// the requested locale and fallback is disabled or exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing nodes.
    async fn get(
        &self,
        reference: ContentReference,
        options: &LoaderOptions,
    ) -> Result<Option<ContentNode>, StorageError>;

    /// Lists the children of `parent` in repository order.
    ///
    /// Locale resolution is applied to every child independently; children
    /// without an acceptable variant are left out.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn children(
        &self,
        parent: ContentReference,
        options: &LoaderOptions,
    ) -> Result<Vec<ContentNode>, StorageError>;

    /// Builds the public URL of a node in `locale`.
    ///
    /// Returns `None` for nodes that are not routable.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues or inconsistent trees.
    async fn url(
        &self,
        reference: ContentReference,
        locale: &Locale,
        absolute: bool,
    ) -> Result<Option<String>, StorageError>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// The catalog of registered content types.
pub trait ContentTypeCatalog: Send + Sync {
    /// Enumerates content-type descriptors in catalog order.
    fn list_content_types(&self) -> Vec<ContentTypeDescriptor>;

    /// True iff the descriptor's model derives from the block capability.
    fn is_block_type(&self, descriptor: &ContentTypeDescriptor) -> bool {
        descriptor.is_block()
    }
}

/// Exclusion rules applied to fetched nodes.
///
/// An excluded node is indistinguishable from a missing one.
pub trait VisibilityFilter: Send + Sync {
    fn should_exclude(&self, node: &ContentNode) -> bool;
}

/// Provides the default identity used when a request names no node.
pub trait StartPageProvider: Send + Sync {
    fn start_page(&self) -> ContentReference;
}

/// A start page provider with a fixed reference.
#[derive(Debug, Clone, Copy)]
pub struct FixedStartPage(pub ContentReference);

impl StartPageProvider for FixedStartPage {
    fn start_page(&self) -> ContentReference {
        self.0
    }
}

impl<F> VisibilityFilter for F
where
    F: Fn(&ContentNode) -> bool + Send + Sync,
{
    fn should_exclude(&self, node: &ContentNode) -> bool {
        self(node)
    }
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
    fn test_default_block_classification() {
        let catalog = StaticCatalog(vec![
            ContentTypeDescriptor::new(1, "Teaser").with_model("Acme.Teaser", ModelKind::Block),
            ContentTypeDescriptor::new(2, "Article").with_model("Acme.Article", ModelKind::Page),
        ]);

        let types = catalog.list_content_types();
        assert!(catalog.is_block_type(&types[0]));
        assert!(!catalog.is_block_type(&types[1]));
    }

    #[test]
    fn test_closure_visibility_filter() {
        let locale = Locale::parse("en").unwrap();
        let filter = |node: &ContentNode| node.name.starts_with('_');
        let hidden = ContentNode::new(ContentReference::new(1), "_draft", locale.clone());
        let visible = ContentNode::new(ContentReference::new(2), "About", locale);

        assert!(filter.should_exclude(&hidden));
        assert!(!filter.should_exclude(&visible));
    }

    #[test]
    fn test_fixed_start_page() {
        let provider = FixedStartPage(ContentReference::new(42));
        assert_eq!(provider.start_page().id(), 42);
    }

    #[test]
    fn test_loader_options_defaults() {
        let options = LoaderOptions::new(Locale::parse("sv").unwrap());
        assert!(options.allow_fallback);
        assert!(!options.with_fallback(false).allow_fallback);
    }
}
