//! Turning raw strings into tag candidates.
//!
//! - `normalize`: trim a candidate
//! - `tokenize`: split a pasted block with the configured `PasteSplit`
//! - `validate`: non-empty and, if a pattern is configured, a full match
//!
//! All of these are pure. Invalid candidates are filtered by the caller,
//! nothing here fails at runtime.

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Trim surrounding whitespace, preserving everything else.
pub fn normalize(raw: &str) -> &str {
    raw.trim()
}

/// Split a pasted block into candidate strings.
pub fn tokenize(raw: &str, splitter: &PasteSplit) -> Vec<String> {
    splitter.split(raw)
}

/// Check a (normalized) candidate against the optional pattern.
pub fn validate(candidate: &str, pattern: Option<&FullMatch>) -> bool {
    if candidate.trim().is_empty() {
        return false;
    }
    pattern.map_or(true, |p| p.is_match(candidate))
}

/// Host-supplied splitting function.
pub type SplitFn = dyn Fn(&str) -> Vec<String> + Send + Sync;

/// Strategy used to split pasted text into candidates.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PasteSplit {
    /// Split on runs of whitespace.
    #[default]
    Whitespace,
    /// Split on any of the given characters.
    Delimiters { chars: String },
    /// Split on every match of a pattern.
    Pattern {
        #[serde(with = "pattern_serde")]
        regex: Regex,
    },
    /// Arbitrary splitting function; runtime only.
    #[serde(skip)]
    Custom(Arc<SplitFn>),
}

impl PasteSplit {
    pub fn delimiters<T: Into<String>>(chars: T) -> Self {
        PasteSplit::Delimiters {
            chars: chars.into(),
        }
    }

    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        let regex =
            Regex::new(pattern).map_err(|e| ConfigError::invalid_pattern(pattern, e))?;
        Ok(PasteSplit::Pattern { regex })
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        PasteSplit::Custom(Arc::new(f))
    }

    pub fn split(&self, raw: &str) -> Vec<String> {
        match self {
            PasteSplit::Whitespace => raw.split_whitespace().map(str::to_string).collect(),
            PasteSplit::Delimiters { chars } => raw
                .split(|c: char| chars.contains(c))
                .map(str::to_string)
                .collect(),
            PasteSplit::Pattern { regex } => regex.split(raw).map(str::to_string).collect(),
            PasteSplit::Custom(f) => f(raw),
        }
    }
}

impl fmt::Debug for PasteSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasteSplit::Whitespace => f.write_str("Whitespace"),
            PasteSplit::Delimiters { chars } => {
                f.debug_struct("Delimiters").field("chars", chars).finish()
            }
            PasteSplit::Pattern { regex } => f
                .debug_struct("Pattern")
                .field("regex", &regex.as_str())
                .finish(),
            PasteSplit::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A pattern that must match an entire candidate, not just part of it.
#[derive(Clone)]
pub struct FullMatch {
    source: String,
    anchored: Regex,
}

impl FullMatch {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        // Compile the bare pattern first: an unbalanced group like `a+)|(b`
        // would otherwise pair up with the anchoring group and compile.
        Regex::new(pattern).map_err(|e| ConfigError::invalid_pattern(pattern, e))?;
        let anchored = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| ConfigError::invalid_pattern(pattern, e))?;
        Ok(Self {
            source: pattern.to_string(),
            anchored,
        })
    }

    /// The pattern as written, without the anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.anchored.is_match(candidate)
    }
}

impl fmt::Debug for FullMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FullMatch").field(&self.source).finish()
    }
}

impl Serialize for FullMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for FullMatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        FullMatch::new(&pattern).map_err(serde::de::Error::custom)
    }
}

mod pattern_serde {
    use regex::Regex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(regex: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(regex.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Regex, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        Regex::new(&pattern).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize("  foo bar \t"), "foo bar");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_whitespace_split() {
        let parts = tokenize("a  b\tc\nd", &PasteSplit::Whitespace);
        assert_eq!(parts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_delimiter_split_keeps_empty_pieces() {
        let parts = tokenize("a,,b;c", &PasteSplit::delimiters(",;"));
        assert_eq!(parts, vec!["a", "", "b", "c"]);
    }

    #[test]
    fn test_pattern_split() {
        let split = PasteSplit::pattern(r"\s*,\s*").unwrap();
        assert_eq!(tokenize("x , y,z", &split), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_custom_split() {
        let split = PasteSplit::custom(|raw| raw.split('|').map(str::to_string).collect());
        assert_eq!(tokenize("p|q", &split), vec!["p", "q"]);
        assert_eq!(format!("{:?}", split), "Custom(..)");
    }

    #[test]
    fn test_validate_requires_full_match() {
        let pattern = FullMatch::new("a+").unwrap();
        assert!(validate("aaa", Some(&pattern)));
        assert!(!validate("xyz", Some(&pattern)));
        assert!(!validate("baaa", Some(&pattern)));
    }

    #[test]
    fn test_validate_alternation_is_anchored_as_a_whole() {
        let pattern = FullMatch::new("foo|bar").unwrap();
        assert!(validate("bar", Some(&pattern)));
        assert!(!validate("foobar", Some(&pattern)));
        assert!(!validate("barx", Some(&pattern)));
    }

    #[test]
    fn test_validate_rejects_empty_without_pattern() {
        assert!(!validate("", None));
        assert!(!validate("  ", None));
        assert!(validate("x", None));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = FullMatch::new("(unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
        assert!(PasteSplit::pattern("[").is_err());
    }

    #[test]
    fn test_unbalanced_group_cannot_escape_anchor() {
        let err = FullMatch::new("a+)|(b").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
        assert!(FullMatch::new("a+)(b").is_err());
    }

    #[test]
    fn test_unbalanced_group_rejected_from_toml() {
        #[derive(Debug, Deserialize)]
        struct Holder {
            #[allow(dead_code)]
            pattern: FullMatch,
        }
        assert!(toml::from_str::<Holder>(r#"pattern = "a+)|(b""#).is_err());
        assert!(toml::from_str::<Holder>(r#"pattern = "a+|b""#).is_ok());
    }
}
