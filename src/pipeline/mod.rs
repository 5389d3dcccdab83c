//! Batch processing pipeline.
//!
//! A submitted batch flows through:
//! 1. `InputCollector::snapshot_and_clear()` — ordered work items
//! 2. `BatchProcessor::run_batch()` — one classification call per item, in order
//! 3. `results::present()` / `History::append()` — render model and history
//!
//! **No item failure aborts a batch.** Every item yields exactly one outcome.

pub mod batch;
pub mod types;

pub use batch::BatchProcessor;
pub use types::ProcessedOutcome;
