use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a stored file lives, as reported by the storage service. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Returns `None` for an empty or whitespace-only locator.
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return None;
        }
        Some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locator {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(Locator::parse(""), None);
        assert_eq!(Locator::parse("  "), None);
        assert_eq!(Locator::parse("https://cdn/a.png").unwrap().as_str(), "https://cdn/a.png");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let locator = Locator::parse("x/1").unwrap();
        assert_eq!(serde_json::to_string(&locator).unwrap(), "\"x/1\"");
    }
}
