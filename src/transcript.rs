//! Chat transcript state
//!
//! Append-only log of user/bot exchanges. The store is the single source of
//! truth for the rendered conversation; the view reads snapshots and never
//! mutates entries.

use serde::{Deserialize, Serialize};

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Speaker {
    User,
    Bot,
}

/// A single chat bubble in the conversation
///
/// `id` is derived from the submission timestamp and is only used for
/// rendering identity; ordering is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TranscriptEntry {
    pub id: i64,
    pub speaker: Speaker,
    pub content: String,
}

impl TranscriptEntry {
    pub(crate) fn user(id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            speaker: Speaker::User,
            content: content.into(),
        }
    }

    pub(crate) fn bot(id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            speaker: Speaker::Bot,
            content: content.into(),
        }
    }
}

/// Ordered, append-only transcript store
///
/// No deletion, update, or reordering operations exist.
#[derive(Debug, Default)]
pub(crate) struct TranscriptStore {
    entries: Vec<TranscriptEntry>,
}

impl TranscriptStore {
    /// Add an entry to the end of the transcript. Never fails.
    pub(crate) fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Snapshot of the current transcript in insertion order.
    ///
    /// Callers must not assume live mutation visibility; the snapshot is
    /// detached from subsequent appends.
    pub(crate) fn all(&self) -> Vec<TranscriptEntry> {
        self.entries.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
