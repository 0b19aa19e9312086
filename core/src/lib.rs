//! tagsinput-core
//!
//! The tag-commit state machine behind a multi-value text entry widget.
//! The host owns the committed tag collection; this crate computes the next
//! collection plus a change descriptor from the current one and an event.
//!
//! Public API:
//! - `Tag` - Plain string or structured record with a display field
//! - `commit` / `remove_at` / `remove_last` - Pure collection transitions
//! - `ChangeDescriptor` - Which tags were added or removed, and where
//! - `TagsInput` - Draft buffer and event dispatch for a single widget
//! - `TagsContext` - What the host reads after each event
//! - `Config` - Behavior options, loadable from TOML
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod error;
pub use error::ConfigError;

pub mod keys;
pub use keys::KeyCode;

pub mod tag;
pub use tag::Tag;

pub mod tokenizer;
pub use tokenizer::{normalize, tokenize, validate, FullMatch, PasteSplit};

pub mod change;
pub use change::{ChangeDescriptor, ChangeKind, RejectReason, Rejection};

pub mod commit;
pub use commit::{commit, remove_at, remove_last, Outcome};

// Widget-facing state
pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod draft;
pub use draft::{DraftBuffer, DraftPhase};

pub mod context;
pub use context::{TagsContext, TagsUpdate};

pub mod widget;
pub use widget::{EventResult, InputEvent, TagsInput};

/// Upper bound on the collection length.
///
/// Serialized as an integer: any negative value (canonically `-1`) means
/// unlimited, `0` accepts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Capacity {
    #[default]
    Unlimited,
    Limited(usize),
}

impl Capacity {
    /// How many more tags fit into a collection of length `len`.
    /// `None` means there is no bound.
    pub fn room(self, len: usize) -> Option<usize> {
        match self {
            Capacity::Unlimited => None,
            Capacity::Limited(max) => Some(max.saturating_sub(len)),
        }
    }

    pub fn is_unlimited(self) -> bool {
        matches!(self, Capacity::Unlimited)
    }
}

impl From<i64> for Capacity {
    fn from(value: i64) -> Self {
        if value < 0 {
            Capacity::Unlimited
        } else {
            Capacity::Limited(usize::try_from(value).unwrap_or(usize::MAX))
        }
    }
}

impl From<Capacity> for i64 {
    fn from(capacity: Capacity) -> i64 {
        match capacity {
            Capacity::Unlimited => -1,
            Capacity::Limited(max) => i64::try_from(max).unwrap_or(i64::MAX),
        }
    }
}

impl From<Option<usize>> for Capacity {
    fn from(value: Option<usize>) -> Self {
        value.map_or(Capacity::Unlimited, Capacity::Limited)
    }
}

/// Widget behavior options.
///
/// A `Config` is an immutable value per render; widgets hold it behind an
/// `Arc` and may share it. Every key is optional in TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Reject candidates whose display value is already in the collection
    pub only_unique: bool,
    /// Maximum collection length
    pub max_tags: Capacity,
    /// Keys that commit the draft (default: Enter, Tab)
    pub add_keys: BTreeSet<KeyCode>,
    /// Keys that remove the last tag when the draft is empty (default: Backspace)
    pub remove_keys: BTreeSet<KeyCode>,
    /// Commit the draft when the input loses focus
    pub add_on_blur: bool,
    /// Tokenize and commit pasted text instead of inserting it
    pub add_on_paste: bool,
    /// Candidates must fully match this pattern
    pub validation_regex: Option<FullMatch>,
    /// Field name used to display structured tags
    pub tag_display_prop: Option<String>,
    /// Ignore every event
    pub disabled: bool,
    /// How pasted text is split into candidates
    pub paste_split: PasteSplit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            only_unique: false,
            max_tags: Capacity::Unlimited,
            add_keys: [KeyCode::TAB, KeyCode::ENTER].into_iter().collect(),
            remove_keys: [KeyCode::BACKSPACE].into_iter().collect(),
            add_on_blur: false,
            add_on_paste: false,
            validation_regex: None,
            tag_display_prop: None,
            disabled: false,
            paste_split: PasteSplit::Whitespace,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize configuration to TOML string.
    ///
    /// Fails for a `PasteSplit::Custom` splitter, which has no textual form.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    // ========== Builders ==========

    pub fn with_only_unique(mut self, only_unique: bool) -> Self {
        self.only_unique = only_unique;
        self
    }

    /// Set `max_tags`; any negative value means unlimited.
    pub fn with_max_tags(mut self, max_tags: i64) -> Self {
        self.max_tags = Capacity::from(max_tags);
        self
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.max_tags = capacity;
        self
    }

    pub fn with_add_keys<I: IntoIterator<Item = KeyCode>>(mut self, keys: I) -> Self {
        self.add_keys = keys.into_iter().collect();
        self
    }

    pub fn with_remove_keys<I: IntoIterator<Item = KeyCode>>(mut self, keys: I) -> Self {
        self.remove_keys = keys.into_iter().collect();
        self
    }

    pub fn with_add_on_blur(mut self, add_on_blur: bool) -> Self {
        self.add_on_blur = add_on_blur;
        self
    }

    pub fn with_add_on_paste(mut self, add_on_paste: bool) -> Self {
        self.add_on_paste = add_on_paste;
        self
    }

    pub fn with_paste_split(mut self, paste_split: PasteSplit) -> Self {
        self.paste_split = paste_split;
        self
    }

    /// Set the validation pattern; it must match whole candidates.
    pub fn with_validation_regex(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.validation_regex = Some(FullMatch::new(pattern)?);
        Ok(self)
    }

    pub fn with_tag_display_prop<T: Into<String>>(mut self, prop: T) -> Self {
        self.tag_display_prop = Some(prop.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // ========== Key Lookup ==========

    pub fn is_add_key(&self, key: KeyCode) -> bool {
        self.add_keys.contains(&key)
    }

    pub fn is_remove_key(&self, key: KeyCode) -> bool {
        self.remove_keys.contains(&key)
    }

    pub fn display_prop(&self) -> Option<&str> {
        self.tag_display_prop.as_deref()
    }
}
