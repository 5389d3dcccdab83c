//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Endpoint used when `TRIAGE_ENDPOINT` is unset (the service's local dev address).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/process";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Full URL of the classification endpoint.
    pub endpoint: String,
    /// Optional bearer token sent with every request.
    pub api_token: Option<SecretString>,
    /// Per-request timeout. `None` leaves timing to the transport,
    /// so a hung request blocks the rest of its batch.
    pub request_timeout: Option<Duration>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            request_timeout: None,
        }
    }
}

impl TriageConfig {
    /// Build configuration from environment variables.
    ///
    /// - `TRIAGE_ENDPOINT`: classification URL
    /// - `TRIAGE_API_TOKEN`: optional bearer token
    /// - `TRIAGE_REQUEST_TIMEOUT_SECS`: optional, positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("TRIAGE_ENDPOINT")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "TRIAGE_ENDPOINT".into(),
                message: format!("expected an http(s) URL, got {endpoint:?}"),
            });
        }

        let api_token = lookup("TRIAGE_API_TOKEN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(SecretString::from);

        let request_timeout = match lookup("TRIAGE_REQUEST_TIMEOUT_SECS") {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "TRIAGE_REQUEST_TIMEOUT_SECS".into(),
                    message: format!("not a number: {raw:?}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "TRIAGE_REQUEST_TIMEOUT_SECS".into(),
                        message: "must be greater than zero".into(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self {
            endpoint,
            api_token,
            request_timeout,
        })
    }
}
