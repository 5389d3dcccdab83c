//! Session history — append-only record of every processed outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::ProcessedOutcome;

/// Reduced projection of one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub source: String,
    /// Category, absent for failed items.
    pub category: Option<String>,
    /// Justification on success, failure message otherwise.
    pub summary: String,
    pub is_error: bool,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    fn from_outcome(outcome: &ProcessedOutcome, recorded_at: DateTime<Utc>) -> Self {
        match outcome {
            ProcessedOutcome::Success { result, source } => Self {
                source: source.clone(),
                category: Some(result.category.clone()),
                summary: result.justification.clone(),
                is_error: false,
                recorded_at,
            },
            ProcessedOutcome::Failure { message, source } => Self {
                source: source.clone(),
                category: None,
                summary: message.clone(),
                is_error: true,
                recorded_at,
            },
        }
    }
}

/// Ordered history for the lifetime of a session. Entries are only ever
/// appended; the owning session may clear it on reset.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry per outcome, in order.
    pub fn append(&mut self, outcomes: &[ProcessedOutcome]) {
        let now = Utc::now();
        self.entries
            .extend(outcomes.iter().map(|o| HistoryEntry::from_outcome(o, now)));
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
