//! Error types for mail-triage.

use std::time::Duration;

/// Top-level error type for the triage client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Input rejected before anything reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{name}: only .txt and .pdf files are accepted")]
    InvalidExtension { name: String },

    #[error("{name}: file is empty")]
    EmptyFile { name: String },

    #[error("{name}: file too large ({size_bytes} bytes, max {max_bytes})")]
    TooLarge {
        name: String,
        size_bytes: u64,
        max_bytes: u64,
    },

    #[error("{name}: an identical file is already pending")]
    Duplicate { name: String },

    #[error("Nothing to submit: enter the email text or add a file")]
    EmptyBatch,
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidExtension { .. } => "invalid-extension",
            Self::EmptyFile { .. } => "empty-file",
            Self::TooLarge { .. } => "too-large",
            Self::Duplicate { .. } => "duplicate",
            Self::EmptyBatch => "empty-batch",
        }
    }
}

/// Failures of a single call to the classification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("Endpoint returned HTTP {status_code}{}", detail_suffix(.detail))]
    Transport {
        status_code: u16,
        detail: Option<String>,
    },

    #[error("Could not reach the classification endpoint: {reason}")]
    Connection { reason: String },

    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Unreadable response from the classification endpoint: {reason}")]
    Protocol { reason: String },
}

impl ClassifyError {
    /// HTTP status carried by a transport failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
