//! HTTP client for the classification endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::config::TriageConfig;
use crate::error::{ClassifyError, ConfigError};
use crate::intake::WorkItem;
use crate::intake::types::extension_of;

use super::types::{ClassificationResult, error_detail};

/// Anything that can classify a single work item.
///
/// Implementations make exactly one attempt per call; the batch processor
/// decides what a failure means for the rest of the batch.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify one item.
    async fn classify(&self, item: &WorkItem) -> Result<ClassificationResult, ClassifyError>;
}

/// Production classifier: one multipart POST per item.
pub struct HttpClassifier {
    endpoint: String,
    api_token: Option<SecretString>,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl HttpClassifier {
    /// Build a classifier from configuration.
    pub fn new(config: &TriageConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
            timeout: config.request_timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClassifyError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => ClassifyError::Timeout { timeout },
            _ => ClassifyError::Connection {
                reason: err.to_string(),
            },
        }
    }
}

/// Build the multipart body: a `text` field or a `file` part, never both.
fn build_form(item: &WorkItem) -> Result<Form, ClassifyError> {
    match item {
        WorkItem::Text { content } => Ok(Form::new().text("text", content.clone())),
        WorkItem::File { name, payload, .. } => {
            let mime = match extension_of(name).as_deref() {
                Some("pdf") => "application/pdf",
                _ => "text/plain",
            };
            let part = Part::bytes(payload.clone())
                .file_name(name.clone())
                .mime_str(mime)
                .map_err(|e| ClassifyError::Protocol {
                    reason: format!("invalid content type {mime}: {e}"),
                })?;
            Ok(Form::new().part("file", part))
        }
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, item: &WorkItem) -> Result<ClassificationResult, ClassifyError> {
        let form = build_form(item)?;

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response.text().await;

        // The status decides first; an unreadable error body only loses the detail.
        if !status.is_success() {
            warn!(
                source = item.source(),
                status = status.as_u16(),
                "Classification endpoint returned an error status"
            );
            return Err(ClassifyError::Transport {
                status_code: status.as_u16(),
                detail: body.ok().as_deref().and_then(error_detail),
            });
        }

        let body = body.map_err(|e| match self.map_send_error(e) {
            ClassifyError::Connection { reason } => ClassifyError::Protocol {
                reason: format!("unreadable response body: {reason}"),
            },
            other => other,
        })?;

        let result = ClassificationResult::from_json(&body)?;
        debug!(
            source = item.source(),
            category = %result.category,
            "Classification received"
        );
        Ok(result)
    }
}
