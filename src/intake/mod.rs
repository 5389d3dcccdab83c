//! Input collection: typed text plus validated `.txt`/`.pdf` uploads.
//!
//! Nothing in this module touches the network. Invalid input is reported
//! to the caller as a `ValidationError` and never becomes a work item.

pub mod collector;
pub mod types;

pub use collector::{AddFilesReport, InputCollector, PendingFile};
pub use types::{
    ALLOWED_EXTENSIONS, DIRECT_TEXT_SOURCE, FileRef, MAX_FILE_BYTES, Rejection, WorkItem,
};
