//! Event dispatch for a tags input widget.
//!
//! `TagsInput` owns the draft buffer and reacts to host events: text
//! changes, key presses, pastes, focus changes and programmatic calls. The
//! committed collection is not stored here. The host passes its current
//! collection into every `handle()` call and persists whatever arrives in
//! `context().update`.
//!
//! # Example
//!
//! ```
//! use tagsinput_core::{Config, InputEvent, KeyCode, Tag, TagsInput};
//!
//! let mut tags: Vec<Tag> = Vec::new();
//! let mut input = TagsInput::new(Config::default());
//!
//! input.handle(&tags, InputEvent::TextChange("rust".into()));
//! input.handle(&tags, InputEvent::KeyDown(KeyCode::ENTER));
//!
//! if let Some(update) = input.context_mut().take_update() {
//!     tags = update.tags;
//! }
//! assert_eq!(tags, vec![Tag::text("rust")]);
//! assert_eq!(input.context().draft_text, "");
//! ```

use crate::commit::{commit, remove_at, remove_last, Outcome};
use crate::context::{TagsContext, TagsUpdate};
use crate::draft::{DraftBuffer, DraftPhase};
use crate::keys::KeyCode;
use crate::tag::Tag;
use crate::tokenizer::tokenize;
use crate::Config;
use std::sync::Arc;
use tracing::trace;

/// Events a host forwards to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The input control's text changed to this value
    TextChange(String),
    /// The caret moved to this byte offset in the draft (ignored unless it
    /// falls on a character boundary)
    SetCursor(usize),
    /// A key was pressed
    KeyDown(KeyCode),
    /// Text was pasted
    Paste(String),
    /// The input gained focus
    Focus,
    /// The input lost focus
    Blur,
    /// Commit this text directly, independent of key codes
    AddTag(String),
    /// Reset the draft without committing
    ClearDraft,
    /// Remove the tag at this index (e.g. its remove button was clicked)
    RemoveAt(usize),
}

/// Result of processing an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The widget consumed the event; the host must suppress its default
    /// action (form submission, focus traversal, text insertion)
    Handled,
    /// Let the default action happen
    NotHandled,
}

impl EventResult {
    pub fn is_handled(self) -> bool {
        self == EventResult::Handled
    }
}

/// One tags input widget: draft buffer, configuration and host context.
#[derive(Debug, Clone)]
pub struct TagsInput {
    config: Arc<Config>,
    draft: DraftBuffer,
    context: TagsContext,
}

impl TagsInput {
    /// Create a widget with an empty, unfocused draft.
    pub fn new(config: Config) -> Self {
        Self::from_arc(Arc::new(config))
    }

    /// Create a widget sharing an existing configuration.
    pub fn from_arc(config: Arc<Config>) -> Self {
        let mut input = Self {
            config,
            draft: DraftBuffer::new(),
            context: TagsContext::new(),
        };
        input.draft.sync_to_context(&mut input.context);
        input
    }

    /// Pre-fill the draft (builder).
    pub fn with_draft<T: Into<String>>(mut self, text: T) -> Self {
        self.draft = DraftBuffer::with_text(text);
        self.draft.sync_to_context(&mut self.context);
        self
    }

    /// Start focused, for hosts that focus the input on mount (builder).
    pub fn focused(mut self) -> Self {
        self.draft.set_focused(true);
        self.draft.sync_to_context(&mut self.context);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Swap in the configuration for the next render.
    pub fn set_config(&mut self, config: Arc<Config>) {
        self.config = config;
    }

    pub fn draft(&self) -> &DraftBuffer {
        &self.draft
    }

    /// Get a reference to the context for reading widget state.
    pub fn context(&self) -> &TagsContext {
        &self.context
    }

    /// Get a mutable reference to the context.
    pub fn context_mut(&mut self) -> &mut TagsContext {
        &mut self.context
    }

    /// Process one event against the host's current collection.
    ///
    /// After calling this, read `context()`. A pending `update` means the
    /// collection changed and the host should store `update.tags`.
    pub fn handle(&mut self, tags: &[Tag], event: InputEvent) -> EventResult {
        self.context.begin_event();

        if self.config.disabled {
            trace!(?event, "ignored, widget disabled");
            return EventResult::NotHandled;
        }

        let result = match event {
            InputEvent::TextChange(text) => {
                self.context.text_changed = self.draft.set_text(text);
                EventResult::Handled
            }
            InputEvent::SetCursor(pos) => {
                if !self.draft.set_cursor(pos) {
                    trace!(pos, "cursor unchanged");
                }
                EventResult::Handled
            }
            InputEvent::KeyDown(key) => self.handle_key(tags, key),
            InputEvent::Paste(text) => self.handle_paste(tags, &text),
            InputEvent::Focus => {
                self.context.focus_changed = self.draft.set_focused(true);
                EventResult::Handled
            }
            InputEvent::Blur => {
                if self.config.add_on_blur && !self.draft.is_empty() {
                    self.commit_draft(tags);
                }
                self.context.focus_changed = self.draft.set_focused(false);
                EventResult::Handled
            }
            InputEvent::AddTag(text) => {
                let outcome = commit(tags, [text], &self.config);
                self.publish(outcome);
                EventResult::Handled
            }
            InputEvent::ClearDraft => {
                self.context.text_changed = self.draft.clear();
                EventResult::Handled
            }
            InputEvent::RemoveAt(index) => {
                let outcome = remove_at(tags, index);
                self.publish(outcome);
                EventResult::Handled
            }
        };

        self.draft.sync_to_context(&mut self.context);
        result
    }

    // ========== Programmatic API ==========

    /// Commit `text` as a single candidate.
    pub fn add_tag(&mut self, tags: &[Tag], text: &str) -> EventResult {
        self.handle(tags, InputEvent::AddTag(text.to_string()))
    }

    pub fn clear_draft(&mut self, tags: &[Tag]) -> EventResult {
        self.handle(tags, InputEvent::ClearDraft)
    }

    pub fn remove_at(&mut self, tags: &[Tag], index: usize) -> EventResult {
        self.handle(tags, InputEvent::RemoveAt(index))
    }

    pub fn focus(&mut self, tags: &[Tag]) -> EventResult {
        self.handle(tags, InputEvent::Focus)
    }

    pub fn blur(&mut self, tags: &[Tag]) -> EventResult {
        self.handle(tags, InputEvent::Blur)
    }

    // ========== Internals ==========

    fn handle_key(&mut self, tags: &[Tag], key: KeyCode) -> EventResult {
        let is_add = self.config.is_add_key(key);
        let is_remove = self.config.is_remove_key(key);

        match self.draft.phase() {
            DraftPhase::Editing if is_add => {
                self.commit_draft(tags);
                EventResult::Handled
            }
            // Remove keys edit the text normally while there is text
            DraftPhase::Editing => EventResult::NotHandled,
            DraftPhase::Empty if is_remove => {
                let outcome = remove_last(tags);
                let removed = !outcome.is_noop();
                self.publish(outcome);
                if removed || is_add {
                    EventResult::Handled
                } else {
                    EventResult::NotHandled
                }
            }
            // Nothing to commit, but still keep e.g. Enter from submitting a form
            DraftPhase::Empty if is_add => EventResult::Handled,
            DraftPhase::Empty => EventResult::NotHandled,
        }
    }

    fn handle_paste(&mut self, tags: &[Tag], text: &str) -> EventResult {
        if !self.config.add_on_paste {
            self.draft.insert_str(text);
            self.context.text_changed = !text.is_empty();
            return EventResult::NotHandled;
        }

        let candidates = tokenize(text, &self.config.paste_split);
        trace!(pieces = candidates.len(), "paste tokenized");
        let outcome = commit(tags, candidates, &self.config);
        self.publish(outcome);
        EventResult::Handled
    }

    /// Commit the whole draft as one candidate and clear it, whether or not
    /// anything was accepted.
    fn commit_draft(&mut self, tags: &[Tag]) {
        let text = self.draft.input_buffer_mut().take();
        self.context.text_changed = true;
        let outcome = commit(tags, [text], &self.config);
        self.publish(outcome);
    }

    fn publish(&mut self, outcome: Outcome) {
        let Outcome {
            tags,
            change,
            rejected,
        } = outcome;
        self.context.rejected = rejected;
        if !change.is_empty() {
            self.context.update = Some(TagsUpdate { tags, change });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{ChangeKind, RejectReason};

    fn tags(values: &[&str]) -> Vec<Tag> {
        values.iter().map(|v| Tag::text(*v)).collect()
    }

    /// Feed `event` and apply any update to `collection`, like a host would.
    fn send(input: &mut TagsInput, collection: &mut Vec<Tag>, event: InputEvent) -> EventResult {
        let result = input.handle(collection, event);
        if let Some(update) = input.context_mut().take_update() {
            *collection = update.tags;
        }
        result
    }

    fn type_and_press(input: &mut TagsInput, collection: &mut Vec<Tag>, text: &str, key: KeyCode) {
        send(input, collection, InputEvent::TextChange(text.into()));
        send(input, collection, InputEvent::KeyDown(key));
    }

    #[test]
    fn test_new_widget_state() {
        let input = TagsInput::new(Config::default());
        assert_eq!(input.draft().phase(), DraftPhase::Empty);
        assert!(!input.draft().is_focused());
        assert!(!input.context().has_update());
    }

    #[test]
    fn test_enter_commits_and_clears() {
        let mut input = TagsInput::new(Config::default());
        let mut collection = Vec::new();
        type_and_press(&mut input, &mut collection, "foo", KeyCode::ENTER);
        assert_eq!(collection, tags(&["foo"]));
        assert_eq!(input.draft().text(), "");
        assert_eq!(input.context().draft_text, "");
    }

    #[test]
    fn test_add_key_result_and_update() {
        let mut input = TagsInput::new(Config::default());
        input.handle(&[], InputEvent::TextChange("foo".into()));
        let result = input.handle(&[], InputEvent::KeyDown(KeyCode::TAB));
        assert_eq!(result, EventResult::Handled);
        let update = input.context().update.clone().unwrap();
        assert_eq!(update.change.kind, ChangeKind::Added);
        assert_eq!(update.change.indexes, vec![0]);
        assert!(input.context().text_changed);
    }

    #[test]
    fn test_rejected_commit_still_clears_draft() {
        let cfg = Config::default().with_only_unique(true);
        let mut input = TagsInput::new(cfg);
        let mut collection = tags(&["test"]);
        input.handle(&collection, InputEvent::TextChange("test".into()));
        let result = send(&mut input, &mut collection, InputEvent::KeyDown(KeyCode::TAB));
        assert_eq!(result, EventResult::Handled);
        assert_eq!(collection, tags(&["test"]));
        assert!(!input.context().has_update());
        assert_eq!(input.context().rejected[0].reason, RejectReason::Duplicate);
        assert_eq!(input.draft().text(), "");
    }

    #[test]
    fn test_add_key_on_empty_draft_is_suppressed_noop() {
        let mut input = TagsInput::new(Config::default());
        let result = input.handle(&[], InputEvent::KeyDown(KeyCode::ENTER));
        assert_eq!(result, EventResult::Handled);
        assert!(!input.context().has_update());
    }

    #[test]
    fn test_whitespace_draft_is_not_committed() {
        let mut input = TagsInput::new(Config::default());
        let mut collection = Vec::new();
        type_and_press(&mut input, &mut collection, "   ", KeyCode::ENTER);
        assert!(collection.is_empty());
        assert_eq!(input.context().rejected[0].reason, RejectReason::Empty);
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut input = TagsInput::new(Config::default());
        input.handle(&[], InputEvent::TextChange("ab".into()));
        let result = input.handle(&[], InputEvent::KeyDown(KeyCode(65)));
        assert_eq!(result, EventResult::NotHandled);
        assert_eq!(input.draft().text(), "ab");
    }

    #[test]
    fn test_backspace_removes_last_only_when_empty() {
        let mut input = TagsInput::new(Config::default());
        let mut collection = tags(&["a", "b"]);

        send(&mut input, &mut collection, InputEvent::TextChange("x".into()));
        let result = send(&mut input, &mut collection, InputEvent::KeyDown(KeyCode::BACKSPACE));
        assert_eq!(result, EventResult::NotHandled);
        assert_eq!(collection, tags(&["a", "b"]));

        send(&mut input, &mut collection, InputEvent::TextChange(String::new()));
        let result = send(&mut input, &mut collection, InputEvent::KeyDown(KeyCode::BACKSPACE));
        assert_eq!(result, EventResult::Handled);
        assert_eq!(collection, tags(&["a"]));
    }

    #[test]
    fn test_backspace_on_empty_collection() {
        let mut input = TagsInput::new(Config::default());
        let result = input.handle(&[], InputEvent::KeyDown(KeyCode::BACKSPACE));
        assert_eq!(result, EventResult::NotHandled);
        assert!(!input.context().has_update());
    }

    #[test]
    fn test_key_in_both_sets() {
        let cfg = Config::default()
            .with_add_keys([KeyCode(44)])
            .with_remove_keys([KeyCode(44)]);
        let mut input = TagsInput::new(cfg);
        let mut collection = Vec::new();

        type_and_press(&mut input, &mut collection, "a", KeyCode(44));
        assert_eq!(collection, tags(&["a"]));

        let result = send(&mut input, &mut collection, InputEvent::KeyDown(KeyCode(44)));
        assert_eq!(result, EventResult::Handled);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_paste_inserts_text_when_not_adding() {
        let mut input = TagsInput::new(Config::default());
        input.handle(&[], InputEvent::TextChange("ab".into()));
        let result = input.handle(&[], InputEvent::Paste(" cd".into()));
        assert_eq!(result, EventResult::NotHandled);
        assert_eq!(input.draft().text(), "ab cd");
        assert!(input.context().text_changed);
        assert!(!input.context().has_update());
    }

    #[test]
    fn test_paste_inserts_at_host_caret() {
        let mut input = TagsInput::new(Config::default());
        input.handle(&[], InputEvent::TextChange("ad".into()));
        input.handle(&[], InputEvent::SetCursor(1));
        assert_eq!(input.context().draft_cursor, 1);
        input.handle(&[], InputEvent::Paste("bc".into()));
        assert_eq!(input.draft().text(), "abcd");
        assert_eq!(input.context().draft_text, "abcd");
        assert_eq!(input.context().draft_cursor, 3);
    }

    #[test]
    fn test_cursor_off_char_boundary_is_ignored() {
        let mut input = TagsInput::new(Config::default()).with_draft("é");
        input.handle(&[], InputEvent::SetCursor(1));
        assert_eq!(input.context().draft_cursor, 2);
        input.handle(&[], InputEvent::Paste("!".into()));
        assert_eq!(input.draft().text(), "é!");
    }

    #[test]
    fn test_paste_commits_batch_and_keeps_draft() {
        let cfg = Config::default().with_add_on_paste(true);
        let mut input = TagsInput::new(cfg);
        let mut collection = tags(&["a"]);
        send(&mut input, &mut collection, InputEvent::TextChange("draft".into()));

        input.handle(&collection, InputEvent::Paste("b c".into()));
        let update = input.context_mut().take_update().unwrap();
        assert_eq!(update.tags, tags(&["a", "b", "c"]));
        assert_eq!(update.change.indexes, vec![1, 2]);
        assert_eq!(input.draft().text(), "draft");
        assert!(!input.context().text_changed);
    }

    #[test]
    fn test_blur_commits_when_enabled() {
        let cfg = Config::default().with_add_on_blur(true);
        let mut input = TagsInput::new(cfg).focused();
        let mut collection = Vec::new();
        send(&mut input, &mut collection, InputEvent::TextChange("x".into()));
        send(&mut input, &mut collection, InputEvent::Blur);
        assert_eq!(collection, tags(&["x"]));
        assert!(!input.draft().is_focused());
        assert!(input.context().focus_changed);
        assert_eq!(input.draft().text(), "");
    }

    #[test]
    fn test_blur_with_empty_draft_commits_nothing() {
        let cfg = Config::default().with_add_on_blur(true);
        let mut input = TagsInput::new(cfg).focused();
        let collection = tags(&["a"]);
        let result = input.handle(&collection, InputEvent::Blur);
        assert_eq!(result, EventResult::Handled);
        assert!(!input.context().has_update());
        assert!(input.context().rejected.is_empty());
        assert!(!input.context().text_changed);
        assert!(!input.context().focused);
    }

    #[test]
    fn test_blur_with_rejected_draft_still_clears_and_unfocuses() {
        let cfg = Config::default()
            .with_add_on_blur(true)
            .with_only_unique(true);
        let mut input = TagsInput::new(cfg).focused();
        let mut collection = tags(&["dup"]);
        send(&mut input, &mut collection, InputEvent::TextChange("dup".into()));
        send(&mut input, &mut collection, InputEvent::Blur);
        assert_eq!(collection, tags(&["dup"]));
        assert!(!input.context().has_update());
        assert_eq!(input.context().rejected[0].reason, RejectReason::Duplicate);
        assert_eq!(input.draft().text(), "");
        assert!(input.context().text_changed);
        assert!(!input.draft().is_focused());
        assert!(input.context().focus_changed);
    }

    #[test]
    fn test_blur_without_add_on_blur_keeps_draft() {
        let mut input = TagsInput::new(Config::default());
        let mut collection = Vec::new();
        send(&mut input, &mut collection, InputEvent::Focus);
        assert!(input.context().focused);
        send(&mut input, &mut collection, InputEvent::TextChange("x".into()));
        send(&mut input, &mut collection, InputEvent::Blur);
        assert!(collection.is_empty());
        assert_eq!(input.draft().text(), "x");
        assert!(!input.context().focused);
    }

    #[test]
    fn test_programmatic_add_ignores_draft() {
        let mut input = TagsInput::new(Config::default()).with_draft("typing");
        input.add_tag(&[], "test");
        let update = input.context().update.clone().unwrap();
        assert_eq!(update.tags, tags(&["test"]));
        assert_eq!(input.draft().text(), "typing");
    }

    #[test]
    fn test_clear_draft() {
        let mut input = TagsInput::new(Config::default()).with_draft("test");
        assert_eq!(input.context().draft_text, "test");
        input.clear_draft(&[]);
        assert_eq!(input.draft().text(), "");
        assert!(input.context().text_changed);
        assert!(!input.context().has_update());
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut input = TagsInput::new(Config::default());
        input.remove_at(&tags(&["a"]), 1);
        assert!(!input.context().has_update());
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let cfg = Config::default().with_disabled(true);
        let mut input = TagsInput::new(cfg);
        let collection = tags(&["a"]);
        assert_eq!(
            input.handle(&collection, InputEvent::TextChange("x".into())),
            EventResult::NotHandled
        );
        assert_eq!(
            input.handle(&collection, InputEvent::KeyDown(KeyCode::BACKSPACE)),
            EventResult::NotHandled
        );
        assert_eq!(input.draft().text(), "");
        assert!(!input.context().has_update());
    }

    #[test]
    fn test_update_cleared_on_next_event() {
        let mut input = TagsInput::new(Config::default());
        input.add_tag(&[], "a");
        assert!(input.context().has_update());
        input.focus(&tags(&["a"]));
        assert!(!input.context().has_update());
    }
}
