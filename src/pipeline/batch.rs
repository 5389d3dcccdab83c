//! Batch processor — sequential per-item dispatch with isolated failures.
//!
//! **Core invariant: one outcome per input item, in input order.**
//! A failing item becomes a `Failure` outcome and the loop moves on.
//!
//! Items are sent one at a time; each request completes before the next is
//! issued. Parallel fan-out would need index-tagged results to restore order.

use std::sync::Arc;

use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::classify::Classifier;
use crate::intake::WorkItem;

use super::types::ProcessedOutcome;

/// Runs a batch of work items through a [`Classifier`].
pub struct BatchProcessor {
    classifier: Arc<dyn Classifier>,
}

impl BatchProcessor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Classify every item in order. Never fails as a whole: the output has
    /// exactly one outcome per input item.
    pub async fn run_batch(&self, items: Vec<WorkItem>) -> Vec<ProcessedOutcome> {
        let batch_id = Uuid::new_v4();
        let total = items.len();
        let span = info_span!("batch", %batch_id, total);

        async move {
            info!("Processing batch");

            let mut outcomes = Vec::with_capacity(total);
            for (index, item) in items.into_iter().enumerate() {
                outcomes.push(self.run_item(index, &item).await);
            }

            let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
            info!(
                succeeded,
                failed = total - succeeded,
                "Batch processing complete"
            );
            debug_assert_eq!(outcomes.len(), total);
            outcomes
        }
        .instrument(span)
        .await
    }

    async fn run_item(&self, index: usize, item: &WorkItem) -> ProcessedOutcome {
        let source = item.source().to_string();

        match self.classifier.classify(item).await {
            Ok(result) => {
                info!(
                    index,
                    source = %source,
                    kind = item.kind(),
                    category = %result.category,
                    "Item classified"
                );
                ProcessedOutcome::Success { result, source }
            }
            Err(e) => {
                warn!(
                    index,
                    source = %source,
                    kind = item.kind(),
                    error = %e,
                    "Item failed, continuing with batch"
                );
                ProcessedOutcome::Failure {
                    message: e.to_string(),
                    source,
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::classify::ClassificationResult;
    use crate::error::ClassifyError;
    use crate::intake::FileRef;

    /// Scripted classifier: answers by source, records call order.
    pub(crate) struct ScriptedClassifier {
        failures: HashMap<String, ClassifyError>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl ScriptedClassifier {
        pub(crate) fn new() -> Self {
            Self {
                failures: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(mut self, source: &str, error: ClassifyError) -> Self {
            self.failures.insert(source.to_string(), error);
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Classifier for ScriptedClassifier {
        async fn classify(
            &self,
            item: &WorkItem,
        ) -> Result<ClassificationResult, ClassifyError> {
            let source = item.source().to_string();
            self.calls.lock().unwrap().push(source.clone());
            if let Some(err) = self.failures.get(&source) {
                return Err(err.clone());
            }
            Ok(ClassificationResult {
                category: "Produtivo".into(),
                reply: format!("Resposta para {source}"),
                justification: "Solicitação de trabalho.".into(),
                preview: None,
            })
        }
    }

    fn text(content: &str) -> WorkItem {
        WorkItem::Text {
            content: content.into(),
        }
    }

    fn file(name: &str) -> WorkItem {
        FileRef::from_bytes(name, b"conteudo".to_vec()).into()
    }

    #[tokio::test]
    async fn output_matches_input_length_and_order() {
        let classifier = Arc::new(ScriptedClassifier::new());
        let processor = BatchProcessor::new(classifier.clone());

        let items = vec![text("Oi"), file("a.txt"), file("b.pdf"), file("c.txt")];
        let outcomes = processor.run_batch(items).await;

        assert_eq!(outcomes.len(), 4);
        let sources: Vec<_> = outcomes.iter().map(|o| o.source()).collect();
        assert_eq!(sources, ["direct text", "a.txt", "b.pdf", "c.txt"]);
        assert_eq!(classifier.calls(), ["direct text", "a.txt", "b.pdf", "c.txt"]);
    }

    #[tokio::test]
    async fn failure_is_isolated() {
        let classifier = Arc::new(ScriptedClassifier::new().failing(
            "broken.pdf",
            ClassifyError::Transport {
                status_code: 500,
                detail: None,
            },
        ));
        let processor = BatchProcessor::new(classifier.clone());

        let outcomes = processor
            .run_batch(vec![text("Preciso do relatório"), file("broken.pdf")])
            .await;

        assert_eq!(outcomes.len(), 2);
        match &outcomes[0] {
            ProcessedOutcome::Success { result, source } => {
                assert_eq!(source, "direct text");
                assert_eq!(result.reply, "Resposta para direct text");
            }
            other => panic!("expected success, got {other:?}"),
        }
        match &outcomes[1] {
            ProcessedOutcome::Failure { message, source } => {
                assert_eq!(source, "broken.pdf");
                assert_eq!(message, "Endpoint returned HTTP 500");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_in_the_middle_does_not_skip_later_items() {
        let classifier = Arc::new(ScriptedClassifier::new().failing(
            "b.txt",
            ClassifyError::Protocol {
                reason: "response has no reply".into(),
            },
        ));
        let processor = BatchProcessor::new(classifier.clone());

        let outcomes = processor
            .run_batch(vec![file("a.txt"), file("b.txt"), file("c.txt")])
            .await;

        let labels: Vec<_> = outcomes.iter().map(|o| o.label()).collect();
        assert_eq!(labels, ["success", "failure", "success"]);
        assert_eq!(classifier.calls().len(), 3);
    }

    #[tokio::test]
    async fn every_item_failing_still_yields_full_output() {
        let err = ClassifyError::Connection {
            reason: "connection refused".into(),
        };
        let classifier = Arc::new(
            ScriptedClassifier::new()
                .failing("direct text", err.clone())
                .failing("a.txt", err),
        );
        let processor = BatchProcessor::new(classifier);

        let outcomes = processor.run_batch(vec![text("x"), file("a.txt")]).await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.is_success()));
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let classifier = Arc::new(ScriptedClassifier::new());
        let processor = BatchProcessor::new(classifier.clone());
        assert!(processor.run_batch(Vec::new()).await.is_empty());
        assert!(classifier.calls().is_empty());
    }
}
