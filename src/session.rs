//! Triage session — owns pending input and history, drives submissions.

use std::sync::Arc;

use tracing::info;

use crate::classify::{Classifier, HttpClassifier};
use crate::config::TriageConfig;
use crate::error::ValidationError;
use crate::intake::{AddFilesReport, FileRef, InputCollector};
use crate::pipeline::BatchProcessor;
use crate::results::{History, RenderModel, present};

/// One user session: pending input, batch processor, and history.
///
/// All state is mutated through `&mut self`, so there is exactly one writer
/// and a submission always sees a consistent pending set.
pub struct TriageSession {
    input: InputCollector,
    history: History,
    processor: BatchProcessor,
}

impl TriageSession {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            input: InputCollector::new(),
            history: History::new(),
            processor: BatchProcessor::new(classifier),
        }
    }

    /// Session backed by the HTTP classifier described by `config`.
    pub fn from_config(config: &TriageConfig) -> crate::Result<Self> {
        let classifier = HttpClassifier::new(config)?;
        Ok(Self::new(Arc::new(classifier)))
    }

    pub fn input(&self) -> &InputCollector {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputCollector {
        &mut self.input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Shorthand for `input_mut().add_files(..)`.
    pub fn add_files(&mut self, candidates: impl IntoIterator<Item = FileRef>) -> AddFilesReport {
        self.input.add_files(candidates)
    }

    /// Submit everything pending as one batch.
    ///
    /// Fails with `EmptyBatch` before any network call when there is nothing
    /// to send. Otherwise every item is classified, the render model is
    /// returned, and the outcomes are appended to the history.
    pub async fn submit(&mut self) -> Result<RenderModel, ValidationError> {
        let items = self.input.snapshot_and_clear()?;
        let outcomes = self.processor.run_batch(items).await;

        let model = present(&outcomes);
        self.history.append(&outcomes);

        info!(
            total = model.total,
            succeeded = model.succeeded,
            history = self.history.len(),
            "Batch submitted"
        );
        Ok(model)
    }

    /// Drop pending input and history.
    pub fn reset(&mut self) {
        self.input.reset();
        self.history.clear();
    }
}
