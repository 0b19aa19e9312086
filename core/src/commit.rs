//! The commit engine.
//!
//! `commit` runs a batch of candidate strings through a fixed pipeline and
//! appends whatever survives:
//!
//! ```text
//! normalize -> validate -> build -> dedupe -> capacity
//! ```
//!
//! Each stage takes a sequence and returns a possibly shorter one, recording
//! what it dropped. Nothing in the pipeline fails: an empty result is a
//! valid no-op. The input collection is never mutated; every operation
//! returns a fresh `Vec`.

use crate::change::{ChangeDescriptor, ChangeKind, RejectReason, Rejection};
use crate::tag::Tag;
use crate::tokenizer::{normalize, validate, FullMatch};
use crate::{Capacity, Config};
use ahash::AHashSet;
use tracing::{debug, trace};

/// Result of a commit or removal.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The next collection.
    pub tags: Vec<Tag>,
    /// What changed relative to the input collection.
    pub change: ChangeDescriptor,
    /// Candidates dropped by the pipeline (always empty for removals).
    pub rejected: Vec<Rejection>,
}

impl Outcome {
    fn unchanged(collection: &[Tag], kind: ChangeKind, rejected: Vec<Rejection>) -> Self {
        Self {
            tags: collection.to_vec(),
            change: ChangeDescriptor::empty(kind),
            rejected,
        }
    }

    /// True when the collection did not change. Callers must not assume a
    /// state change happened just because they asked for one.
    pub fn is_noop(&self) -> bool {
        self.change.is_empty()
    }
}

/// Commit a batch of candidates to `collection`.
///
/// Surviving tags are appended in batch order; their indexes in the new
/// collection start at `collection.len()`.
pub fn commit<I, S>(collection: &[Tag], candidates: I, config: &Config) -> Outcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rejected = Vec::new();

    let accepted = normalize_stage(candidates, &mut rejected);
    let accepted = validate_stage(accepted, config.validation_regex.as_ref(), &mut rejected);
    let accepted = build_stage(accepted, config.display_prop());
    let accepted = dedupe_stage(collection, accepted, config.only_unique, &mut rejected);
    let accepted = capacity_stage(collection.len(), accepted, config.max_tags, &mut rejected);

    debug!(
        existing = collection.len(),
        added = accepted.len(),
        rejected = rejected.len(),
        "commit"
    );

    if accepted.is_empty() {
        return Outcome::unchanged(collection, ChangeKind::Added, rejected);
    }

    let mut tags = Vec::with_capacity(collection.len() + accepted.len());
    tags.extend_from_slice(collection);
    tags.extend(accepted.iter().cloned());

    Outcome {
        tags,
        change: ChangeDescriptor::added(accepted, collection.len()),
        rejected,
    }
}

/// Remove the tag at `index`.
///
/// An index past the end is a no-op, so this is safe to call speculatively.
pub fn remove_at(collection: &[Tag], index: usize) -> Outcome {
    if index >= collection.len() {
        trace!(index, len = collection.len(), "remove index out of bounds");
        return Outcome::unchanged(collection, ChangeKind::Removed, Vec::new());
    }

    let mut tags = collection.to_vec();
    let removed = tags.remove(index);
    debug!(index, tag = %removed, "remove");

    Outcome {
        tags,
        change: ChangeDescriptor::removed(removed, index),
        rejected: Vec::new(),
    }
}

/// Remove the last tag; a no-op on an empty collection.
pub fn remove_last(collection: &[Tag]) -> Outcome {
    match collection.len().checked_sub(1) {
        Some(last) => remove_at(collection, last),
        None => Outcome::unchanged(collection, ChangeKind::Removed, Vec::new()),
    }
}

fn reject(rejected: &mut Vec<Rejection>, candidate: impl Into<String>, reason: RejectReason) {
    let rejection = Rejection::new(candidate, reason);
    trace!(candidate = %rejection.candidate, reason = %reason, "candidate rejected");
    rejected.push(rejection);
}

// ============================================================================
// Pipeline stages
// ============================================================================

/// Trim every candidate and drop the ones left empty.
pub fn normalize_stage<I, S>(candidates: I, rejected: &mut Vec<Rejection>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for raw in candidates {
        let raw = raw.as_ref();
        let normalized = normalize(raw);
        if normalized.is_empty() {
            reject(rejected, raw, RejectReason::Empty);
        } else {
            out.push(normalized.to_string());
        }
    }
    out
}

/// Keep the candidates that fully match `pattern` (all of them if `None`).
pub fn validate_stage(
    candidates: Vec<String>,
    pattern: Option<&FullMatch>,
    rejected: &mut Vec<Rejection>,
) -> Vec<String> {
    let mut out = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if validate(&candidate, pattern) {
            out.push(candidate);
        } else {
            reject(rejected, candidate, RejectReason::Invalid);
        }
    }
    out
}

/// Turn accepted strings into tags.
pub fn build_stage(candidates: Vec<String>, display_prop: Option<&str>) -> Vec<Tag> {
    candidates
        .into_iter()
        .map(|candidate| Tag::from_candidate(candidate, display_prop))
        .collect()
}

/// Drop tags whose display value is already in `existing` or earlier in
/// the batch. Left to right, so the first occurrence wins.
pub fn dedupe_stage(
    existing: &[Tag],
    candidates: Vec<Tag>,
    only_unique: bool,
    rejected: &mut Vec<Rejection>,
) -> Vec<Tag> {
    if !only_unique {
        return candidates;
    }

    let mut seen: AHashSet<String> = existing
        .iter()
        .map(|tag| tag.display_value().into_owned())
        .collect();

    let mut out = Vec::with_capacity(candidates.len());
    for tag in candidates {
        let display = tag.display_value().into_owned();
        if seen.contains(&display) {
            reject(rejected, display, RejectReason::Duplicate);
        } else {
            seen.insert(display);
            out.push(tag);
        }
    }
    out
}

/// Keep only as many tags as fit under `max_tags`.
pub fn capacity_stage(
    existing_len: usize,
    mut candidates: Vec<Tag>,
    max_tags: Capacity,
    rejected: &mut Vec<Rejection>,
) -> Vec<Tag> {
    let Some(room) = max_tags.room(existing_len) else {
        return candidates;
    };
    if candidates.len() > room {
        for tag in candidates.drain(room..) {
            reject(rejected, tag.display_value(), RejectReason::OverCapacity);
        }
    }
    candidates
}
