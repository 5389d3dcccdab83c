//! Classification client — the single network boundary.
//!
//! One request per work item, no retries. Non-success statuses become
//! `ClassifyError::Transport`, unreadable bodies `ClassifyError::Protocol`.

pub mod client;
pub mod types;

pub use client::{Classifier, HttpClassifier};
pub use types::ClassificationResult;
