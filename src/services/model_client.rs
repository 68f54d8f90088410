use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Failure reported by a model backend, split by whether a retry may help.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendFailure {
    #[error("{0}")]
    Transient(String),

    #[error("{0}")]
    Permanent(String),
}

/// One structured-output call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub video_uri: Option<String>,
    pub response_schema: Value,
    pub thinking_level: Option<String>,
}

/// A hosted model that returns JSON text constrained by a schema.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate_json(&self, request: &GenerationRequest) -> Result<String, BackendFailure>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.gemini_api_base.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

/// Builds the `generateContent` body with the schema as a hard output constraint.
pub fn build_request_body(request: &GenerationRequest) -> Value {
    let mut parts = Vec::new();
    if let Some(uri) = &request.video_uri {
        parts.push(json!({ "fileData": { "fileUri": uri } }));
    }
    parts.push(json!({ "text": request.prompt }));

    let mut generation_config = json!({
        "responseMimeType": "application/json",
        "responseJsonSchema": request.response_schema,
    });
    if let Some(level) = &request.thinking_level {
        generation_config["thinkingConfig"] = json!({ "thinkingLevel": level });
    }

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": generation_config,
    })
}

/// Joins the text parts of the first candidate.
pub fn extract_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter(|part| !part.get("thought").and_then(Value::as_bool).unwrap_or(false))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    Some(text).filter(|t| !t.is_empty())
}

pub fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

#[async_trait]
impl ModelBackend for GeminiClient {
    async fn generate_json(&self, request: &GenerationRequest) -> Result<String, BackendFailure> {
        log::debug!("Calling model {} (video: {:?})", request.model, request.video_uri);

        let response = self
            .http
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&build_request_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    BackendFailure::Transient(format!("Request failed: {}", e))
                } else {
                    BackendFailure::Permanent(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("Model backend returned {}: {}", status, body.trim());
            return Err(if is_transient_status(status) {
                BackendFailure::Transient(message)
            } else {
                BackendFailure::Permanent(message)
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| BackendFailure::Transient(format!("Failed to read response: {}", e)))?;

        extract_text(&payload).ok_or_else(|| {
            let reason = payload
                .pointer("/candidates/0/finishReason")
                .or_else(|| payload.pointer("/promptFeedback/blockReason"))
                .and_then(Value::as_str)
                .unwrap_or("no text returned");
            BackendFailure::Permanent(format!("Model returned no content ({})", reason))
        })
    }
}
