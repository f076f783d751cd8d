//! Content graph configuration.
//!
//! Configuration can be specified in a TOML file under the `[contentgraph]`
//! section.
//!
//! # Example Configuration
//!
//! ```toml
//! [contentgraph]
//! default_locale = "en"
//! default_page_size = 10
//! max_page_size = 100
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```

use contentgraph_core::Locale;
use serde::{Deserialize, Serialize};

use crate::pagination::PageSizing;
use crate::schema::SchemaBuilderConfig;

/// Content graph API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentGraphConfig {
    /// Locale used when a request carries no `locale` argument.
    /// Default: "en"
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Page size used by `children` when `first` is absent.
    /// Default: 10
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Upper bound for `first`; larger requests are clamped.
    /// Default: 100
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Maximum query depth allowed.
    /// Default: 15
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    /// Default: 500
    #[serde(default = "default_max_complexity")]
    pub max_complexity: usize,

    /// Enable GraphQL introspection queries.
    /// Default: true
    #[serde(default = "default_introspection")]
    pub introspection: bool,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_max_page_size() -> usize {
    100
}

fn default_max_depth() -> usize {
    15
}

fn default_max_complexity() -> usize {
    500
}

fn default_introspection() -> bool {
    true
}

impl Default for ContentGraphConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_depth: default_max_depth(),
            max_complexity: default_max_complexity(),
            introspection: default_introspection(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    contentgraph: ContentGraphConfig,
}

impl ContentGraphConfig {
    /// Reads the `[contentgraph]` section of a TOML document.
    ///
    /// A document without the section yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or the section
    /// has values of the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(source)?;
        Ok(file.contentgraph)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if Locale::parse(&self.default_locale).is_err() {
            return Err(format!(
                "contentgraph.default_locale '{}' is not a valid locale",
                self.default_locale
            ));
        }
        if self.default_page_size == 0 {
            return Err("contentgraph.default_page_size must be > 0".into());
        }
        if self.max_page_size == 0 {
            return Err("contentgraph.max_page_size must be > 0".into());
        }
        if self.default_page_size > self.max_page_size {
            return Err("contentgraph.default_page_size must not exceed max_page_size".into());
        }
        if self.max_depth == 0 {
            return Err("contentgraph.max_depth must be > 0".into());
        }
        if self.max_complexity == 0 {
            return Err("contentgraph.max_complexity must be > 0".into());
        }
        Ok(())
    }

    /// Converts this config to a SchemaBuilderConfig.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn to_schema_builder_config(&self) -> Result<SchemaBuilderConfig, String> {
        self.validate()?;
        let default_locale = Locale::parse(&self.default_locale).map_err(|e| e.to_string())?;

        Ok(SchemaBuilderConfig {
            default_locale,
            paging: PageSizing {
                default_size: self.default_page_size,
                max_size: self.max_page_size,
            },
            max_depth: self.max_depth,
            max_complexity: self.max_complexity,
            introspection_enabled: self.introspection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ContentGraphConfig::default();
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.max_complexity, 500);
        assert!(config.introspection);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_default_locale() {
        let config = ContentGraphConfig {
            default_locale: "not a locale".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.to_schema_builder_config().is_err());
    }

    #[test]
    fn test_invalid_page_sizes() {
        let mut config = ContentGraphConfig::default();
        config.default_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = ContentGraphConfig::default();
        config.default_page_size = 50;
        config.max_page_size = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_limits() {
        let mut config = ContentGraphConfig::default();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        let mut config = ContentGraphConfig::default();
        config.max_complexity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_section() {
        let toml = r#"
            [server]
            port = 8080

            [contentgraph]
            default_locale = "sv"
            max_page_size = 25
            introspection = false
        "#;

        let config = ContentGraphConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.default_locale, "sv");
        assert_eq!(config.max_page_size, 25);
        assert_eq!(config.default_page_size, 10);
        assert!(!config.introspection);
    }

    #[test]
    fn test_from_toml_without_section() {
        let config = ContentGraphConfig::from_toml_str("[server]\nport = 1\n").unwrap();
        assert_eq!(config, ContentGraphConfig::default());
    }

    #[test]
    fn test_to_schema_builder_config() {
        let config = ContentGraphConfig {
            default_locale: "EN-gb".into(),
            default_page_size: 5,
            ..Default::default()
        };

        let builder_config = config.to_schema_builder_config().unwrap();
        assert_eq!(builder_config.default_locale.as_str(), "en-GB");
        assert_eq!(builder_config.paging.default_size, 5);
        assert_eq!(builder_config.paging.max_size, 100);
        assert_eq!(builder_config.max_depth, 15);
    }
}
