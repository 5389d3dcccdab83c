//! Result aggregation: the current batch's render model and the session history.

pub mod history;
pub mod view;

pub use history::{History, HistoryEntry};
pub use view::{RenderModel, RenderedOutcome, present};
