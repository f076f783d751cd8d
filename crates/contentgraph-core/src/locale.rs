//! Locale tags.
//!
//! A [`Locale`] is a well-formed language tag such as `en`, `sv`, `en-GB` or
//! `zh-Hant-TW`. Parsing normalizes casing (`EN-gb` becomes `en-GB`) so that
//! two spellings of the same tag compare equal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::CoreError;

/// language[-Script][-REGION][-variant...]
static LOCALE_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[A-Za-z]{2,3}(-[A-Za-z]{4})?(-([A-Za-z]{2}|[0-9]{3}))?(-([A-Za-z0-9]{5,8}|[0-9][A-Za-z0-9]{3}))*$",
    )
    .expect("Invalid locale regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    /// Parses and normalizes a locale tag.
    pub fn parse(tag: &str) -> Result<Self, CoreError> {
        let tag = tag.trim();
        if !LOCALE_REGEX.is_match(tag) {
            return Err(CoreError::unrecognized_locale(tag));
        }

        let normalized = tag
            .split('-')
            .enumerate()
            .map(|(idx, part)| match (idx, part.len()) {
                (0, _) => part.to_ascii_lowercase(),
                (_, 4) if part.chars().all(|c| c.is_ascii_alphabetic()) => {
                    let mut chars = part.chars();
                    let first = chars.next().map(|c| c.to_ascii_uppercase());
                    first
                        .into_iter()
                        .chain(chars.map(|c| c.to_ascii_lowercase()))
                        .collect()
                }
                (_, 2) => part.to_ascii_uppercase(),
                _ => part.to_ascii_lowercase(),
            })
            .collect::<Vec<_>>()
            .join("-");

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`en` for `en-GB`).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

/// English (`en`), the default content language.
impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Locale::parse(&raw).map_err(serde::de::Error::custom)
    }
}
