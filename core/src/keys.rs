//! Key codes that trigger commits and removals.
//!
//! Hosts report key presses as numeric codes (the DOM `keyCode` values).
//! Configuration files may spell them by name instead.

use crate::error::ConfigError;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static KEY_NAMES: phf::Map<&'static str, u32> = phf_map! {
    "backspace" => 8,
    "tab" => 9,
    "enter" => 13,
    "return" => 13,
    "escape" => 27,
    "esc" => 27,
    "space" => 32,
    "delete" => 46,
    "semicolon" => 186,
    "comma" => 188,
    "period" => 190,
    "slash" => 191,
};

/// A numeric key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "KeySpec", into = "u32")]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(8);
    pub const TAB: KeyCode = KeyCode(9);
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const SEMICOLON: KeyCode = KeyCode(186);
    pub const COMMA: KeyCode = KeyCode(188);

    /// Look up a key by its (case-insensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        KEY_NAMES
            .get(name.trim().to_ascii_lowercase().as_str())
            .map(|&code| KeyCode(code))
    }

    /// The canonical name of this key, if it has one.
    pub fn name(self) -> Option<&'static str> {
        // "return" and "esc" are aliases; prefer the longer spelling
        match self.0 {
            13 => Some("enter"),
            27 => Some("escape"),
            code => KEY_NAMES
                .entries()
                .find(|entry| *entry.1 == code)
                .map(|(name, _)| *name),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for KeyCode {
    type Err = ConfigError;

    /// Parse either a numeric code (`"188"`) or a key name (`"comma"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.trim().parse::<u32>() {
            return Ok(KeyCode(code));
        }
        KeyCode::from_name(s).ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl From<KeyCode> for u32 {
    fn from(key: KeyCode) -> u32 {
        key.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeySpec {
    Code(u32),
    Name(String),
}

impl TryFrom<KeySpec> for KeyCode {
    type Error = ConfigError;

    fn try_from(spec: KeySpec) -> Result<Self, Self::Error> {
        match spec {
            KeySpec::Code(code) => Ok(KeyCode(code)),
            KeySpec::Name(name) => name.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(KeyCode::from_name("Enter"), Some(KeyCode::ENTER));
        assert_eq!(KeyCode::from_name("return"), Some(KeyCode::ENTER));
        assert_eq!(KeyCode::from_name("comma"), Some(KeyCode::COMMA));
        assert_eq!(KeyCode::from_name("hyper"), None);
    }

    #[test]
    fn test_parse_code_or_name() {
        assert_eq!("44".parse::<KeyCode>().unwrap(), KeyCode(44));
        assert_eq!("tab".parse::<KeyCode>().unwrap(), KeyCode::TAB);
        assert!(matches!(
            "nope".parse::<KeyCode>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_display_prefers_name() {
        assert_eq!(KeyCode::ENTER.to_string(), "enter");
        assert_eq!(KeyCode::ESCAPE.to_string(), "escape");
        assert_eq!(KeyCode(44).to_string(), "44");
    }
}
