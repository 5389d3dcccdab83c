//! Input collector — pending text buffer plus validated file set.

use tracing::{debug, info};

use crate::error::ValidationError;

use super::types::{FileRef, Rejection, WorkItem, size_summary};

/// A file accepted into the pending set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub size_bytes: u64,
    payload: Vec<u8>,
}

impl PendingFile {
    /// Display line such as `PDF • 0.01 MB`.
    pub fn summary(&self) -> String {
        size_summary(&self.name, self.size_bytes)
    }

    fn same_file(&self, candidate: &FileRef) -> bool {
        self.name == candidate.name && self.size_bytes == candidate.size_bytes
    }
}

impl From<PendingFile> for WorkItem {
    fn from(file: PendingFile) -> Self {
        WorkItem::File {
            name: file.name,
            size_bytes: file.size_bytes,
            payload: file.payload,
        }
    }
}

/// Outcome of [`InputCollector::add_files`].
#[derive(Debug, Default)]
pub struct AddFilesReport {
    /// Names accepted into the pending set, in arrival order. The accepted
    /// items themselves stay owned by the collector (see
    /// [`InputCollector::pending_files`]) until `snapshot_and_clear` turns
    /// them into work items, so the report carries names only.
    pub accepted: Vec<String>,
    pub rejections: Vec<Rejection>,
}

/// Holds everything the user has entered but not yet submitted.
#[derive(Debug, Default)]
pub struct InputCollector {
    text: String,
    files: Vec<PendingFile>,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text buffer.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append a line to the text buffer.
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Characters in the raw text buffer.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn pending_files(&self) -> &[PendingFile] {
        &self.files
    }

    /// True when a submission would fail with `empty-batch`.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.files.is_empty()
    }

    /// Validate candidates and append the accepted ones to the pending set.
    ///
    /// Checks, in order: extension, empty file, size, then duplicate
    /// (same name and size as something already pending, including files
    /// accepted earlier in this call).
    pub fn add_files(&mut self, candidates: impl IntoIterator<Item = FileRef>) -> AddFilesReport {
        let mut report = AddFilesReport::default();

        for candidate in candidates {
            let verdict = candidate.validate().and_then(|()| {
                if self.files.iter().any(|f| f.same_file(&candidate)) {
                    Err(ValidationError::Duplicate {
                        name: candidate.name.clone(),
                    })
                } else {
                    Ok(())
                }
            });

            match verdict {
                Ok(()) => {
                    debug!(name = %candidate.name, size = candidate.size_bytes, "File accepted");
                    report.accepted.push(candidate.name.clone());
                    self.files.push(PendingFile {
                        name: candidate.name,
                        size_bytes: candidate.size_bytes,
                        payload: candidate.payload,
                    });
                }
                Err(reason) => {
                    info!(name = %candidate.name, reason = reason.code(), "File rejected");
                    report.rejections.push(Rejection {
                        name: candidate.name,
                        reason,
                    });
                }
            }
        }

        report
    }

    /// Remove the pending file at `index`. Out of range is a no-op.
    pub fn remove_file(&mut self, index: usize) -> Option<PendingFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            debug!(index, pending = self.files.len(), "Ignoring out-of-range file removal");
            None
        }
    }

    /// Drain the pending input into an ordered batch.
    ///
    /// The trimmed text (if any) comes first, then files in insertion order.
    /// On `EmptyBatch` nothing is cleared.
    pub fn snapshot_and_clear(&mut self) -> Result<Vec<WorkItem>, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        let mut items = Vec::with_capacity(self.files.len() + 1);

        let text = std::mem::take(&mut self.text);
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            items.push(WorkItem::Text {
                content: trimmed.to_string(),
            });
        }

        items.extend(self.files.drain(..).map(WorkItem::from));
        Ok(items)
    }

    /// Drop all pending text and files.
    pub fn reset(&mut self) {
        self.text.clear();
        self.files.clear();
    }
}
