//! Harness configuration file.
//!
//! A harness file is a widget `Config` in TOML plus a few keys describing
//! the starting state of a session:
//!
//! ```toml
//! preset = "emails"            # base configuration, default "default"
//! max_tags = 5                 # any Config key overrides the preset
//! draft = "half-typed"         # initial draft text
//! initial_tags = ["a@b.io", { name = "ops", id = 3 }]
//! ```
//!
//! Widget keys are layered over the preset's configuration, so a file only
//! has to spell out what differs.

use anyhow::{Context, Result};
use std::path::Path;
use tagsinput_core::{Config, Tag};

use crate::presets::Preset;

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub preset: Preset,
    pub widget: Config,
    pub initial_tags: Vec<Tag>,
    pub draft: String,
}

impl HarnessConfig {
    /// Configuration of a bare preset with an empty session.
    pub fn from_preset(preset: Preset) -> Result<Self> {
        Ok(Self {
            preset,
            widget: preset
                .config()
                .with_context(|| format!("building preset `{}`", preset))?,
            initial_tags: Vec::new(),
            draft: String::new(),
        })
    }

    /// Load a harness file. `preset_override` replaces the file's `preset`.
    pub fn load<P: AsRef<Path>>(path: P, preset_override: Option<Preset>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&content, preset_override)
            .with_context(|| format!("loading {}", path.display()))
    }

    pub fn from_toml_str(content: &str, preset_override: Option<Preset>) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(content).context("parsing TOML")?;

        let file_preset = match table.remove("preset") {
            Some(value) => {
                let name = value
                    .as_str()
                    .context("`preset` must be a string")?
                    .to_string();
                Some(name.parse::<Preset>().map_err(anyhow::Error::msg)?)
            }
            None => None,
        };
        let preset = preset_override.or(file_preset).unwrap_or_default();

        let draft = match table.remove("draft") {
            Some(value) => value.as_str().context("`draft` must be a string")?.to_string(),
            None => String::new(),
        };
        let raw_tags: Vec<serde_json::Value> = match table.remove("initial_tags") {
            Some(value) => value
                .try_into::<Vec<serde_json::Value>>()
                .context("`initial_tags` must be an array")?,
            None => Vec::new(),
        };

        let widget = layer(preset, table)?;
        let initial_tags = raw_tags
            .into_iter()
            .map(|value| Tag::from_json(value, widget.display_prop()))
            .collect();

        Ok(Self {
            preset,
            widget,
            initial_tags,
            draft,
        })
    }
}

/// Apply the keys in `overrides` on top of the preset's configuration.
fn layer(preset: Preset, overrides: toml::Table) -> Result<Config> {
    let base = preset
        .config()
        .with_context(|| format!("building preset `{}`", preset))?;
    let mut merged = match toml::Value::try_from(&base).context("serializing preset")? {
        toml::Value::Table(table) => table,
        _ => anyhow::bail!("preset `{}` did not serialize to a table", preset),
    };
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    toml::Value::Table(merged)
        .try_into::<Config>()
        .context("invalid widget configuration")
}
