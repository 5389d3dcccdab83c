//! Shared types for batch processing.

use serde::{Deserialize, Serialize};

use crate::classify::ClassificationResult;

/// Per-item result of a batch run.
///
/// `source` is the file name, or `"direct text"` for typed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessedOutcome {
    Success {
        result: ClassificationResult,
        source: String,
    },
    Failure {
        message: String,
        source: String,
    },
}

impl ProcessedOutcome {
    pub fn source(&self) -> &str {
        match self {
            Self::Success { source, .. } | Self::Failure { source, .. } => source,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Failure { .. } => "failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success() -> ProcessedOutcome {
        ProcessedOutcome::Success {
            result: ClassificationResult {
                category: "Produtivo".into(),
                reply: "Vou verificar.".into(),
                justification: "Pedido de status.".into(),
                preview: None,
            },
            source: "direct text".into(),
        }
    }

    #[test]
    fn accessors() {
        let ok = success();
        assert_eq!(ok.source(), "direct text");
        assert!(ok.is_success());
        assert_eq!(ok.label(), "success");

        let failed = ProcessedOutcome::Failure {
            message: "Endpoint returned HTTP 500".into(),
            source: "mail.pdf".into(),
        };
        assert_eq!(failed.source(), "mail.pdf");
        assert!(!failed.is_success());
        assert_eq!(failed.label(), "failure");
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(success()).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["result"]["category"], "Produtivo");
        assert!(json["result"].get("preview").is_none());
    }
}
