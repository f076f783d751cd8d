use async_trait::async_trait;
use contentgraph_core::{ContentNode, ContentReference, Locale, ModelId, PropertyValue};
use contentgraph_storage::{ContentRepository, LoaderOptions, StorageError};
use dashmap::DashMap;
use indexmap::IndexMap;
use tracing::trace;
use url::Url;

/// One locale variant of a stored content item.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentVariant {
    pub name: String,
    /// URL segment used when building routes.
    pub url_segment: String,
    pub properties: IndexMap<String, PropertyValue>,
}

impl ContentVariant {
    /// Creates a variant whose URL segment is derived from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            url_segment: slugify(&name),
            name,
            properties: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.url_segment = segment.into();
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// A content item with all of its locale variants.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredContent {
    pub reference: ContentReference,
    pub parent: Option<ContentReference>,
    pub content_type_id: i32,
    pub model_type: Option<ModelId>,
    pub master_locale: Locale,
    pub variants: IndexMap<Locale, ContentVariant>,
}

impl StoredContent {
    pub fn new(reference: ContentReference, master_locale: Locale) -> Self {
        Self {
            reference,
            parent: None,
            content_type_id: 0,
            model_type: None,
            master_locale,
            variants: IndexMap::new(),
        }
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
    pub fn with_variant(mut self, locale: Locale, variant: ContentVariant) -> Self {
        self.variants.insert(locale, variant);
        self
    }

    fn materialize(&self, locale: &Locale, variant: &ContentVariant) -> ContentNode {
        ContentNode {
            reference: self.reference,
            parent: self.parent,
            name: variant.name.clone(),
            content_type_id: self.content_type_id,
            model_type: self.model_type.clone(),
            locale: locale.clone(),
            master_locale: Some(self.master_locale.clone()),
            existing_locales: self.variants.keys().cloned().collect(),
            properties: variant.properties.clone(),
        }
    }
}

/// In-memory content repository.
///
/// Locale resolution for a request in locale `L`:
/// 1. the variant in `L`
/// 2. with fallback allowed: the configured fallback chain for `L`, then the
///    bare language of `L` (`en` for `en-GB`), then the master locale
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    nodes: DashMap<ContentReference, StoredContent>,
    /// Child references per parent, in insertion order.
    children: DashMap<ContentReference, Vec<ContentReference>>,
    fallbacks: DashMap<Locale, Vec<Locale>>,
    site_url: Option<Url>,
    /// Routing root; it and its ancestors contribute no URL segment.
    start_page: Option<ContentReference>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site URL used for absolute URLs.
    #[must_use]
    pub fn with_site_url(mut self, site_url: Url) -> Self {
        self.site_url = Some(site_url);
        self
    }

    /// Sets the node that routes to `/{locale}/`.
    #[must_use]
    pub fn with_start_page(mut self, start_page: ContentReference) -> Self {
        self.start_page = Some(start_page);
        self
    }

    /// Configures the fallback chain tried for `locale`.
    pub fn set_fallback(&self, locale: Locale, chain: Vec<Locale>) {
        self.fallbacks.insert(locale, chain);
    }

    /// Inserts or replaces a content item.
    ///
    /// A new item is appended to its parent's child list.
    pub fn insert(&self, content: StoredContent) {
        let reference = content.reference;
        let parent = content.parent;
        let previous = self.nodes.insert(reference, content);

        if let Some(old_parent) = previous.and_then(|p| p.parent)
            && Some(old_parent) != parent
            && let Some(mut siblings) = self.children.get_mut(&old_parent)
        {
            siblings.retain(|r| *r != reference);
        }

        if let Some(parent) = parent {
            let mut siblings = self.children.entry(parent).or_default();
            if !siblings.contains(&reference) {
                siblings.push(reference);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn load(&self, reference: ContentReference, options: &LoaderOptions) -> Option<ContentNode> {
        let stored = self.nodes.get(&reference)?;
        let (locale, variant) = self.select_variant(&stored, options)?;
        Some(stored.materialize(&locale, variant))
    }

    fn select_variant<'a>(
        &self,
        stored: &'a StoredContent,
        options: &LoaderOptions,
    ) -> Option<(Locale, &'a ContentVariant)> {
        if let Some(variant) = stored.variants.get(&options.locale) {
            return Some((options.locale.clone(), variant));
        }
        if !options.allow_fallback {
            trace!(
                reference = %stored.reference,
                locale = %options.locale,
                "No variant in requested locale and fallback disabled"
            );
            return None;
        }

        let mut candidates: Vec<Locale> = self
            .fallbacks
            .get(&options.locale)
            .map(|chain| chain.clone())
            .unwrap_or_default();
        if let Ok(language) = Locale::parse(options.locale.language()) {
            candidates.push(language);
        }
        candidates.push(stored.master_locale.clone());

        candidates.into_iter().find_map(|candidate| {
            stored
                .variants
                .get(&candidate)
                .map(|variant| (candidate, variant))
        })
    }

    fn route_segments(
        &self,
        reference: ContentReference,
        locale: &Locale,
    ) -> Result<Option<Vec<String>>, StorageError> {
        let options = LoaderOptions::new(locale.clone());
        let mut segments = Vec::new();
        let mut current = Some(reference);
        let limit = self.nodes.len();
        let mut hops = 0usize;

        while let Some(node_ref) = current {
            if Some(node_ref) == self.start_page {
                break;
            }
            let Some(stored) = self.nodes.get(&node_ref) else {
                if node_ref == reference {
                    return Ok(None);
                }
                return Err(StorageError::inconsistent(format!(
                    "parent {node_ref} of {reference} is missing"
                )));
            };

            hops += 1;
            if hops > limit {
                return Err(StorageError::inconsistent(format!(
                    "cycle in parent chain of {reference}"
                )));
            }

            // Nodes above the routing root are not part of the route.
            if stored.parent.is_none() {
                break;
            }
            if let Some((_, variant)) = self.select_variant(&stored, &options) {
                segments.push(variant.url_segment.clone());
            }
            current = stored.parent;
        }

        segments.reverse();
        Ok(Some(segments))
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn get(
        &self,
        reference: ContentReference,
        options: &LoaderOptions,
    ) -> Result<Option<ContentNode>, StorageError> {
        Ok(self.load(reference, options))
    }

    async fn children(
        &self,
        parent: ContentReference,
        options: &LoaderOptions,
    ) -> Result<Vec<ContentNode>, StorageError> {
        let child_refs = self
            .children
            .get(&parent)
            .map(|refs| refs.clone())
            .unwrap_or_default();

        Ok(child_refs
            .into_iter()
            .filter_map(|child| self.load(child, options))
            .collect())
    }

    async fn url(
        &self,
        reference: ContentReference,
        locale: &Locale,
        absolute: bool,
    ) -> Result<Option<String>, StorageError> {
        let Some(segments) = self.route_segments(reference, locale)? else {
            return Ok(None);
        };

        let mut path = format!("/{locale}/");
        for segment in segments.iter().filter(|s| !s.is_empty()) {
            path.push_str(segment);
            path.push('/');
        }

        match (&self.site_url, absolute) {
            (Some(site), true) => site
                .join(&path)
                .map(|url| Some(url.to_string()))
                .map_err(|e| StorageError::internal(format!("invalid url for {reference}: {e}"))),
            _ => Ok(Some(path)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
