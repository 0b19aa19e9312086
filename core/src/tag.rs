//! Tag values held in the committed collection.
//!
//! A tag is either a plain string or a structured record whose display
//! value lives in a named field. The commit engine only ever looks at
//! `display_value()`; uniqueness, validation and rendering all go through it.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// A committed tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// The raw string is the tag.
    Text(String),
    /// A record displayed through one of its fields.
    Record {
        display_prop: String,
        fields: Map<String, Value>,
    },
}

impl Tag {
    pub fn text<T: Into<String>>(text: T) -> Self {
        Tag::Text(text.into())
    }

    /// Build a record containing only the display field.
    pub fn record<P: Into<String>, T: Into<String>>(display_prop: P, text: T) -> Self {
        let display_prop = display_prop.into();
        let mut fields = Map::new();
        fields.insert(display_prop.clone(), Value::String(text.into()));
        Tag::Record {
            display_prop,
            fields,
        }
    }

    /// Build a tag from an accepted candidate string.
    ///
    /// With a display prop configured the candidate is wrapped as
    /// `{display_prop: candidate}`, otherwise the string itself is the tag.
    pub fn from_candidate(candidate: String, display_prop: Option<&str>) -> Self {
        match display_prop {
            Some(prop) => Tag::record(prop, candidate),
            None => Tag::Text(candidate),
        }
    }

    /// Adopt a caller-supplied JSON value.
    ///
    /// Objects become records (keeping every field) when a display prop is
    /// configured. Strings are always text tags; any other value is kept as
    /// its JSON text.
    pub fn from_json(value: Value, display_prop: Option<&str>) -> Self {
        match (value, display_prop) {
            (Value::String(s), _) => Tag::Text(s),
            (Value::Object(fields), Some(prop)) => Tag::Record {
                display_prop: prop.to_string(),
                fields,
            },
            (other, _) => Tag::Text(other.to_string()),
        }
    }

    /// The string used for display, equality checks and validation.
    pub fn display_value(&self) -> Cow<'_, str> {
        match self {
            Tag::Text(text) => Cow::Borrowed(text.as_str()),
            Tag::Record {
                display_prop,
                fields,
            } => match fields.get(display_prop) {
                Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
                Some(Value::Null) | None => Cow::Borrowed(""),
                Some(other) => Cow::Owned(other.to_string()),
            },
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Tag::Record { .. })
    }

    pub fn to_json(&self) -> Value {
        match self {
            Tag::Text(text) => Value::String(text.clone()),
            Tag::Record { fields, .. } => Value::Object(fields.clone()),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl From<&str> for Tag {
    fn from(text: &str) -> Self {
        Tag::Text(text.to_string())
    }
}

impl From<String> for Tag {
    fn from(text: String) -> Self {
        Tag::Text(text)
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tag::Text(text) => serializer.serialize_str(text),
            Tag::Record { fields, .. } => fields.serialize(serializer),
        }
    }
}
