//! mail-triage — client-side orchestration for an email classification service.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod pipeline;
pub mod replies;
pub mod results;
pub mod session;

pub use error::{Error, Result};
pub use session::TriageSession;
