//! Ready-made configurations for common tag fields.

use std::fmt;
use std::str::FromStr;
use tagsinput_core::{Config, ConfigError, KeyCode, PasteSplit};

/// Pattern for a plausible e-mail address (one `@`, a dot in the domain).
pub const EMAIL_PATTERN: &str = r"[^@\s]+@[^@\s]+\.[^@\s]+";

/// Pattern for a `#hashtag`.
pub const HASHTAG_PATTERN: &str = r"#\w+";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Enter/Tab commit, Backspace removes, no limits
    #[default]
    Default,
    /// Unique e-mail addresses; comma, semicolon, paste and blur commit
    Emails,
    /// Unique `#hashtags`; space commits
    Hashtags,
    /// Comma-separated values; paste and blur commit
    Csv,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Default, Preset::Emails, Preset::Hashtags, Preset::Csv];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Emails => "emails",
            Preset::Hashtags => "hashtags",
            Preset::Csv => "csv",
        }
    }

    /// Build the configuration for this preset.
    pub fn config(self) -> Result<Config, ConfigError> {
        let cfg = match self {
            Preset::Default => Config::default(),
            Preset::Emails => Config::default()
                .with_only_unique(true)
                .with_add_keys([
                    KeyCode::ENTER,
                    KeyCode::TAB,
                    KeyCode::COMMA,
                    KeyCode::SEMICOLON,
                ])
                .with_add_on_paste(true)
                .with_add_on_blur(true)
                .with_paste_split(PasteSplit::pattern(r"[,;\s]+")?)
                .with_validation_regex(EMAIL_PATTERN)?,
            Preset::Hashtags => Config::default()
                .with_only_unique(true)
                .with_add_keys([KeyCode::ENTER, KeyCode::TAB, KeyCode::SPACE])
                .with_add_on_paste(true)
                .with_validation_regex(HASHTAG_PATTERN)?,
            Preset::Csv => Config::default()
                .with_add_keys([KeyCode::ENTER, KeyCode::COMMA])
                .with_add_on_paste(true)
                .with_add_on_blur(true)
                .with_paste_split(PasteSplit::delimiters(",")),
        };
        Ok(cfg)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset `{}` (expected one of: {})", s, names.join(", "))
            })
    }
}
