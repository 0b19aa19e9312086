//! Host-facing context.
//!
//! `TagsContext` is a plain data container. After every `TagsInput::handle`
//! call the host reads these fields: it persists `update.tags` as its new
//! collection, mirrors `draft_text` into its input control, and reacts to
//! focus or text notifications. No callbacks; the host pulls.

use crate::change::{ChangeDescriptor, Rejection};
use crate::tag::Tag;

/// A new collection together with the change that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct TagsUpdate {
    pub tags: Vec<Tag>,
    pub change: ChangeDescriptor,
}

/// What the host needs to know after an event.
///
/// # Fields
///
/// - `update`: present only when the collection actually changed
/// - `rejected`: candidates dropped by the last commit
/// - `draft_text` / `draft_cursor`: current draft state
/// - `focused`: current focus flag
/// - `text_changed`: the draft text changed during the last event
/// - `focus_changed`: the focus flag flipped during the last event
#[derive(Debug, Clone, Default)]
pub struct TagsContext {
    pub update: Option<TagsUpdate>,
    pub rejected: Vec<Rejection>,
    pub draft_text: String,
    pub draft_cursor: usize,
    pub focused: bool,
    pub text_changed: bool,
    pub focus_changed: bool,
}

impl TagsContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-event notifications. Draft mirror fields are left alone.
    pub fn begin_event(&mut self) {
        self.update = None;
        self.rejected.clear();
        self.text_changed = false;
        self.focus_changed = false;
    }

    /// Take the pending update, leaving `None`.
    pub fn take_update(&mut self) -> Option<TagsUpdate> {
        self.update.take()
    }

    pub fn has_update(&self) -> bool {
        self.update.is_some()
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}
