use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Numeric identity of a content node in the repository tree.
///
/// The zero reference is the empty reference, used for values that have no
/// addressable identity of their own (local blocks nested inside a node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentReference(i64);

impl ContentReference {
    /// The empty reference.
    pub const EMPTY: ContentReference = ContentReference(0);

    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> i64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ContentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ContentReference {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for ContentReference {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| CoreError::invalid_reference(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reference() {
        assert!(ContentReference::EMPTY.is_empty());
        assert!(!ContentReference::new(5).is_empty());
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!("42".parse::<ContentReference>().unwrap(), ContentReference::new(42));
        assert_eq!(" 7 ".parse::<ContentReference>().unwrap().id(), 7);
        assert!("page-1".parse::<ContentReference>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ContentReference::new(12)).unwrap();
        assert_eq!(json, "12");
    }
}
