//! Draft state of a widget.
//!
//! The draft is the text being typed plus the focus flag. Emptiness and
//! focus are orthogonal: `Empty`/`Editing` crossed with focused/unfocused.

use crate::context::TagsContext;
use crate::input_buffer::InputBuffer;

/// Whether the draft holds any text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    /// Buffer is ""
    Empty,
    /// Buffer is non-empty
    Editing,
}

/// Draft text and focus for one widget instance.
#[derive(Debug, Clone, Default)]
pub struct DraftBuffer {
    input: InputBuffer,
    focused: bool,
}

impl DraftBuffer {
    /// An empty, unfocused draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft pre-filled with `text`.
    pub fn with_text<T: Into<String>>(text: T) -> Self {
        Self {
            input: InputBuffer::with_text(text),
            focused: false,
        }
    }

    pub fn phase(&self) -> DraftPhase {
        if self.input.is_empty() {
            DraftPhase::Empty
        } else {
            DraftPhase::Editing
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    pub fn input_buffer(&self) -> &InputBuffer {
        &self.input
    }

    pub fn input_buffer_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Set the focus flag, returning whether it changed.
    pub fn set_focused(&mut self, focused: bool) -> bool {
        let changed = self.focused != focused;
        self.focused = focused;
        changed
    }

    /// Replace the draft text, returning whether it changed.
    pub fn set_text<T: Into<String>>(&mut self, text: T) -> bool {
        let text = text.into();
        if text == self.input.text() {
            return false;
        }
        self.input.set_text(text);
        true
    }

    /// Move the caret to byte offset `pos`. Offsets past the end or inside
    /// a character are ignored; returns whether the caret moved.
    pub fn set_cursor(&mut self, pos: usize) -> bool {
        let before = self.input.cursor();
        self.input.set_cursor(pos) && before != pos
    }

    /// Insert at the caret.
    pub fn insert_str(&mut self, s: &str) {
        self.input.insert_str(s);
    }

    /// Clear the draft, returning whether there was anything to clear.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.input.is_empty();
        self.input.clear();
        had_text
    }

    /// Copy the draft state into the host context.
    pub fn sync_to_context(&self, context: &mut TagsContext) {
        context.draft_text.clear();
        context.draft_text.push_str(self.input.text());
        context.draft_cursor = self.input.cursor();
        context.focused = self.focused;
    }
}
