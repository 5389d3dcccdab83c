//! Render model for the outcomes of one batch.

use serde::{Deserialize, Serialize};

use crate::pipeline::ProcessedOutcome;
use crate::replies::{LabeledVariant, generate_variants, select_variants};

/// One rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderedOutcome {
    Classified {
        source: String,
        category: String,
        /// Lower-cased category, used as a style class by front-ends.
        badge: String,
        justification: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preview: Option<String>,
        /// The base reply as the service returned it.
        reply: String,
        variants: Vec<LabeledVariant>,
    },
    Error {
        source: String,
        message: String,
    },
}

/// Display-ready view of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderModel {
    /// Items attempted, successful or not.
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub entries: Vec<RenderedOutcome>,
}

/// Build the render model, deriving reply variants for each success.
pub fn present(outcomes: &[ProcessedOutcome]) -> RenderModel {
    let entries: Vec<RenderedOutcome> = outcomes.iter().map(render_one).collect();
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();

    RenderModel {
        total: outcomes.len(),
        succeeded,
        failed: outcomes.len() - succeeded,
        entries,
    }
}

fn render_one(outcome: &ProcessedOutcome) -> RenderedOutcome {
    match outcome {
        ProcessedOutcome::Success { result, source } => {
            let variants = generate_variants(&result.reply);
            RenderedOutcome::Classified {
                source: source.clone(),
                category: result.category.clone(),
                badge: result.category.to_lowercase(),
                justification: result.justification.clone(),
                preview: result.preview.clone(),
                reply: result.reply.clone(),
                variants: select_variants(&result.justification, &variants),
            }
        }
        ProcessedOutcome::Failure { message, source } => RenderedOutcome::Error {
            source: source.clone(),
            message: message.clone(),
        },
    }
}
