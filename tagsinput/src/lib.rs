//! tagsinput crate root
//!
//! Front end for `tagsinput-core`: ready-made configuration presets, the
//! harness configuration file, and line-oriented event scripts played
//! through a `Session`.
//!
//! Public API exported here:
//! - `Preset` from `presets`
//! - `HarnessConfig` from `config`
//! - `Session`, `Command` and `parse_script` from `script`

pub mod config;
pub mod presets;
pub mod script;

// Re-export the widget and engine from core so callers need one dependency.
pub use tagsinput_core::{
    commit, remove_at, remove_last, Capacity, ChangeDescriptor, ChangeKind, Config, ConfigError,
    DraftBuffer, DraftPhase, EventResult, FullMatch, InputEvent, KeyCode, Outcome, PasteSplit,
    RejectReason, Rejection, Tag, TagsContext, TagsInput, TagsUpdate,
};

pub use config::HarnessConfig;
pub use presets::Preset;
pub use script::{format_values, parse_line, parse_script, Command, Played, Session, Step};
