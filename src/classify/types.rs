//! Classification result and its wire format.

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

/// Normalized answer from the classification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Category label, e.g. "Produtivo" or "Improdutivo".
    pub category: String,
    /// Suggested base reply; variants are derived from it.
    pub reply: String,
    /// Short justification for the category.
    pub justification: String,
    /// Leading excerpt of the analysed email text, when the service sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Response body as the service sends it. The deployed service uses
/// Portuguese keys; English keys are accepted too. When a body carries both
/// spellings of a field, the Portuguese one wins if it is non-blank.
#[derive(Debug, Deserialize)]
struct WireResult {
    #[serde(default)]
    categoria: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    resposta: Option<String>,
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    justificativa_curta: Option<String>,
    #[serde(default)]
    justification: Option<String>,
    #[serde(default)]
    preview: Option<String>,
}

/// Failure body: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn first_non_blank(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    non_blank(preferred).or_else(|| non_blank(fallback))
}

impl ClassificationResult {
    /// Parse a success body. Missing or blank `category`/`reply` is a
    /// protocol error.
    pub fn from_json(body: &str) -> Result<Self, ClassifyError> {
        let wire: WireResult = serde_json::from_str(body).map_err(|e| ClassifyError::Protocol {
            reason: format!("invalid JSON: {e}"),
        })?;

        let category = first_non_blank(wire.categoria, wire.category).ok_or_else(|| ClassifyError::Protocol {
            reason: "response has no category".into(),
        })?;
        let reply = first_non_blank(wire.resposta, wire.reply).ok_or_else(|| ClassifyError::Protocol {
            reason: "response has no reply".into(),
        })?;

        Ok(Self {
            category,
            reply,
            justification: first_non_blank(wire.justificativa_curta, wire.justification)
                .unwrap_or_default(),
            preview: non_blank(wire.preview),
        })
    }
}

/// Pull the `error` message out of a failure body, if it has one.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<WireError>(body)
        .ok()
        .map(|e| e.error.trim().to_string())
        .filter(|e| !e.is_empty())
}
