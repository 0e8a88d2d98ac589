//! Content domains.
//!
//! Built-in domains form a closed set. Additional domains can only be added
//! as `Domain::Plugin` through explicit registration in `pf-engine`; parsing a
//! name never invents a domain on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A named category of content with its own required fields, defaults, and
/// JSON Schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Domain {
    Chat,
    Code,
    Image,
    Analysis,
    /// A domain contributed through plugin registration.
    Plugin(String),
}

impl Domain {
    /// All built-in domains, in table order.
    pub const BUILTIN: [Self; 4] = [Self::Chat, Self::Code, Self::Image, Self::Analysis];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chat => "chat",
            Self::Code => "code",
            Self::Image => "image",
            Self::Analysis => "analysis",
            Self::Plugin(name) => name,
        }
    }

    /// Look up a built-in domain by name (case-insensitive, surrounding
    /// whitespace ignored).
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::BUILTIN
            .into_iter()
            .find(|domain| domain.as_str().eq_ignore_ascii_case(name))
    }

    /// Build a plugin domain, checking the name is a usable registry key.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDomainName` if the name is empty, contains
    /// characters outside `[a-z0-9_-]`, or collides with a built-in domain.
    pub fn plugin(name: &str) -> Result<Self, CoreError> {
        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if name.is_empty() || !valid_chars {
            return Err(CoreError::InvalidDomainName(name.to_string()));
        }
        if Self::builtin(name).is_some() {
            return Err(CoreError::InvalidDomainName(format!(
                "{name} (reserved for a built-in domain)"
            )));
        }
        Ok(Self::Plugin(name.to_string()))
    }

    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        !matches!(self, Self::Plugin(_))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        match domain {
            Domain::Plugin(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl From<String> for Domain {
    fn from(name: String) -> Self {
        Self::builtin(&name).unwrap_or(Self::Plugin(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("chat", Domain::Chat)]
    #[case("CODE", Domain::Code)]
    #[case("  image ", Domain::Image)]
    #[case("analysis", Domain::Analysis)]
    fn builtin_lookup(#[case] name: &str, #[case] expected: Domain) {
        assert_eq!(Domain::builtin(name), Some(expected));
    }

    #[test]
    fn builtin_lookup_misses_unknown() {
        assert_eq!(Domain::builtin("unknown"), None);
    }

    #[test]
    fn plugin_rejects_builtin_names() {
        assert!(matches!(
            Domain::plugin("chat"),
            Err(CoreError::InvalidDomainName(_))
        ));
    }

    #[test]
    fn plugin_rejects_bad_characters() {
        assert!(Domain::plugin("").is_err());
        assert!(Domain::plugin("Has Space").is_err());
        assert!(Domain::plugin("legal-review").is_ok());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Domain::Analysis).unwrap();
        assert_eq!(json, "\"analysis\"");
        let plugin: Domain = serde_json::from_str("\"legal\"").unwrap();
        assert_eq!(plugin, Domain::Plugin("legal".into()));
        let chat: Domain = serde_json::from_str("\"chat\"").unwrap();
        assert_eq!(chat, Domain::Chat);
    }
}
