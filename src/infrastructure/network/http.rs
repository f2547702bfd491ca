// HTTP client utilities shared by the provider adapters
use crate::domain::error::LingoError;
use crate::domain::model::{
    DetectionResult, LanguagesResult, TranslationResult, ValidationResult,
};
use reqwest::Client;

/// Create the shared HTTP client with appropriate pool settings
pub fn create_client() -> Result<Client, LingoError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(concat!("lingo/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Transport-level failure folded into the common result shape.
/// Adapters convert this into `{status_code, message}` and never let the
/// underlying error escape as an exception.
pub struct TransportFailure {
    pub status_code: Option<u16>,
    pub message: String,
}

impl TransportFailure {
    pub fn new(operation: &str, cause: &reqwest::Error) -> Self {
        Self {
            status_code: cause.status().map(|s| s.as_u16()),
            message: format!("{} failed:\n({})", operation, cause),
        }
    }

    pub fn into_translation(self) -> TranslationResult {
        TranslationResult {
            status_code: self.status_code,
            message: Some(self.message),
            ..Default::default()
        }
    }

    pub fn into_validation(self) -> ValidationResult {
        ValidationResult {
            valid: false,
            status_code: self.status_code,
            message: Some(self.message),
            ..Default::default()
        }
    }

    pub fn into_detection(self) -> DetectionResult {
        DetectionResult {
            status_code: self.status_code,
            message: Some(self.message),
            detected_languages: None,
        }
    }

    pub fn into_languages(self) -> LanguagesResult {
        LanguagesResult {
            status_code: self.status_code,
            message: Some(self.message),
            languages: None,
        }
    }
}

/// Perform a request and parse the body as JSON, folding every
/// network/parse fault into a `TransportFailure`. Returns the HTTP status
/// alongside the body so adapters can run their own error-envelope
/// mapping on non-2xx responses.
pub async fn send_json(
    operation: &str,
    request: reqwest::RequestBuilder,
) -> Result<(u16, serde_json::Value), TransportFailure> {
    let response = request
        .send()
        .await
        .map_err(|e| TransportFailure::new(operation, &e))?;
    let status = response.status().as_u16();
    let body = response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| TransportFailure::new(operation, &e))?;
    Ok((status, body))
}
