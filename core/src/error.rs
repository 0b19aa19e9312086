//! Configuration errors.
//!
//! The commit engine itself never fails: rejected candidates are filtered
//! and reported, not raised. The only fallible surface is building a
//! `Config` from host-supplied data (patterns, key names, TOML files).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown key name `{0}`")]
    UnknownKey(String),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
