//! Line-oriented event scripts and the session that plays them.
//!
//! One command per line:
//!
//! ```text
//! # comment
//! type hello world     set the draft text (everything after `type `)
//! cursor 3             move the caret to a byte offset
//! key enter            press a key, by name or numeric code
//! paste a, b, c        paste text
//! focus | blur         focus changes
//! add text             programmatic add
//! clear                clear the draft
//! remove 2             remove the tag at an index
//! tags                 show the collection
//! quit                 stop
//! ```

use anyhow::{bail, Context, Result};
use std::fmt;
use tagsinput_core::{ChangeDescriptor, ChangeKind, InputEvent, KeyCode, Rejection, Tag, TagsInput};
use tracing::debug;

use crate::config::HarnessConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward an event to the widget
    Event(InputEvent),
    /// Show the current collection
    Tags,
    Quit,
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim_start();
    if line.trim_end().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line.trim_end(), ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "type" => Command::Event(InputEvent::TextChange(rest.to_string())),
        "paste" => Command::Event(InputEvent::Paste(rest.to_string())),
        "add" => Command::Event(InputEvent::AddTag(rest.to_string())),
        "key" => {
            let key_spec = rest.trim();
            if key_spec.is_empty() {
                bail!("`key` needs a key name or code");
            }
            let key = key_spec
                .parse::<KeyCode>()
                .with_context(|| format!("bad key `{}`", key_spec))?;
            Command::Event(InputEvent::KeyDown(key))
        }
        "cursor" => {
            let pos = rest
                .trim()
                .parse::<usize>()
                .with_context(|| format!("bad cursor offset `{}`", rest.trim()))?;
            Command::Event(InputEvent::SetCursor(pos))
        }
        "remove" => {
            let index = rest
                .trim()
                .parse::<usize>()
                .with_context(|| format!("bad index `{}`", rest.trim()))?;
            Command::Event(InputEvent::RemoveAt(index))
        }
        "focus" => Command::Event(InputEvent::Focus),
        "blur" => Command::Event(InputEvent::Blur),
        "clear" => Command::Event(InputEvent::ClearDraft),
        "tags" => Command::Tags,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command `{}`", other),
    };
    Ok(Some(command))
}

/// Parse a whole script; errors carry the 1-based line number.
pub fn parse_script(text: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(line).with_context(|| format!("line {}", n + 1))? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Render an event in script syntax.
pub fn describe(event: &InputEvent) -> String {
    match event {
        InputEvent::TextChange(text) => format!("type {}", text),
        InputEvent::SetCursor(pos) => format!("cursor {}", pos),
        InputEvent::KeyDown(key) => format!("key {}", key),
        InputEvent::Paste(text) => format!("paste {}", text),
        InputEvent::Focus => "focus".to_string(),
        InputEvent::Blur => "blur".to_string(),
        InputEvent::AddTag(text) => format!("add {}", text),
        InputEvent::ClearDraft => "clear".to_string(),
        InputEvent::RemoveAt(index) => format!("remove {}", index),
    }
}

/// What one event did.
#[derive(Debug, Clone)]
pub struct Step {
    pub command: String,
    pub handled: bool,
    pub change: Option<ChangeDescriptor>,
    pub rejected: Vec<Rejection>,
    pub draft: String,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.handled { "handled" } else { "not handled" };
        write!(f, "{} -> {}", self.command, verdict)?;
        if let Some(change) = &self.change {
            let sign = match change.kind {
                ChangeKind::Added => '+',
                ChangeKind::Removed => '-',
            };
            for (tag, index) in change.tags.iter().zip(&change.indexes) {
                write!(f, "; {}{}@{}", sign, tag, index)?;
            }
        }
        for rejection in &self.rejected {
            write!(f, "; rejected {:?} ({})", rejection.candidate, rejection.reason)?;
        }
        write!(f, "; draft {:?}", self.draft)
    }
}

/// What `Session::run` reports for each command it plays.
#[derive(Debug, Clone, Copy)]
pub enum Played<'a> {
    /// An event was applied
    Step(&'a Step),
    /// A `tags` command asked for the collection
    Tags(&'a [Tag]),
}

/// Display values joined as `[a, b, c]`.
pub fn format_values(tags: &[Tag]) -> String {
    let values: Vec<_> = tags.iter().map(|tag| tag.display_value()).collect();
    format!("[{}]", values.join(", "))
}

/// A tag collection owned on behalf of a widget, like a host application.
#[derive(Debug)]
pub struct Session {
    input: TagsInput,
    tags: Vec<Tag>,
    transcript: Vec<Step>,
}

impl Session {
    pub fn new(config: HarnessConfig) -> Self {
        let HarnessConfig {
            widget,
            initial_tags,
            draft,
            ..
        } = config;
        Self {
            input: TagsInput::new(widget).with_draft(draft),
            tags: initial_tags,
            transcript: Vec::new(),
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn input(&self) -> &TagsInput {
        &self.input
    }

    pub fn transcript(&self) -> &[Step] {
        &self.transcript
    }

    /// Display values of the collection.
    pub fn values(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|tag| tag.display_value().into_owned())
            .collect()
    }

    /// Send one event and store the resulting collection.
    pub fn apply(&mut self, event: InputEvent) -> &Step {
        let command = describe(&event);
        let result = self.input.handle(&self.tags, event);

        let context = self.input.context_mut();
        let change = context.take_update().map(|update| {
            self.tags = update.tags;
            update.change
        });
        let step = Step {
            command,
            handled: result.is_handled(),
            change,
            rejected: context.rejected.clone(),
            draft: context.draft_text.clone(),
        };
        debug!(command = %step.command, handled = step.handled, tags = self.tags.len(), "step");

        self.transcript.push(step);
        &self.transcript[self.transcript.len() - 1]
    }

    /// Play commands until the end or a `quit`, handing each applied step
    /// and each `tags` request to `on_play`. Returns how many events ran.
    pub fn run<I, F>(&mut self, commands: I, mut on_play: F) -> usize
    where
        I: IntoIterator<Item = Command>,
        F: FnMut(Played<'_>),
    {
        let mut events = 0;
        for command in commands {
            match command {
                Command::Event(event) => {
                    on_play(Played::Step(self.apply(event)));
                    events += 1;
                }
                Command::Tags => on_play(Played::Tags(&self.tags)),
                Command::Quit => break,
            }
        }
        events
    }
}
