//! Change descriptors and rejection reports.

use crate::tag::Tag;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
}

/// What one commit or removal did to the collection.
///
/// For additions `indexes` are positions in the new collection; for
/// removals they are positions in the old one. A caller can rebuild the new
/// collection from the old one with `apply` instead of diffing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeDescriptor {
    pub kind: ChangeKind,
    pub tags: Vec<Tag>,
    pub indexes: Vec<usize>,
}

impl ChangeDescriptor {
    pub fn empty(kind: ChangeKind) -> Self {
        Self {
            kind,
            tags: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn added(tags: Vec<Tag>, first_index: usize) -> Self {
        let indexes = (first_index..first_index + tags.len()).collect();
        Self {
            kind: ChangeKind::Added,
            tags,
            indexes,
        }
    }

    pub fn removed(tag: Tag, index: usize) -> Self {
        Self {
            kind: ChangeKind::Removed,
            tags: vec![tag],
            indexes: vec![index],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Replay this change on `old`.
    pub fn apply(&self, old: &[Tag]) -> Vec<Tag> {
        match self.kind {
            ChangeKind::Added => {
                let mut next = old.to_vec();
                next.extend(self.tags.iter().cloned());
                next
            }
            ChangeKind::Removed => old
                .iter()
                .enumerate()
                .filter(|(i, _)| !self.indexes.contains(i))
                .map(|(_, tag)| tag.clone())
                .collect(),
        }
    }
}

/// Why a candidate did not become a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Empty or whitespace-only after normalization.
    Empty,
    /// Did not fully match the validation pattern.
    Invalid,
    /// Display value already present (only with `only_unique`).
    Duplicate,
    /// No room left under `max_tags`.
    OverCapacity,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::Empty => "empty",
            RejectReason::Invalid => "invalid",
            RejectReason::Duplicate => "duplicate",
            RejectReason::OverCapacity => "over capacity",
        };
        f.write_str(s)
    }
}

/// A candidate that was dropped, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub candidate: String,
    pub reason: RejectReason,
}

impl Rejection {
    pub fn new<T: Into<String>>(candidate: T, reason: RejectReason) -> Self {
        Self {
            candidate: candidate.into(),
            reason,
        }
    }
}
