use contentgraph_core::Locale;

/// Options controlling how a repository materializes a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Requested locale.
    pub locale: Locale,
    /// Whether a variant in a fallback locale may be returned when the
    /// requested locale has no variant.
    pub allow_fallback: bool,
}

impl LoaderOptions {
    /// Loader options for `locale` with language fallback enabled.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            allow_fallback: true,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, allow_fallback: bool) -> Self {
        self.allow_fallback = allow_fallback;
        self
    }
}
