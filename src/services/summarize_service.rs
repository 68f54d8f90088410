use std::sync::Arc;

use serde_json::Value;

use crate::{
    constants::prompts::build_video_prompt,
    errors::{AppError, AppResult},
    models::domain::{PresetDocument, VideoMetadata, VideoReference},
    services::{
        model_client::{GenerationRequest, ModelBackend},
        retry::{call_with_retry, RetryPolicy, Sleeper},
    },
};

pub struct SummarizeRequest {
    pub video_input: String,
    pub prompt: String,
    pub schema: Value,
    pub model: String,
    pub metadata: VideoMetadata,
}

pub struct SummarizeService {
    backend: Arc<dyn ModelBackend>,
    sleeper: Arc<dyn Sleeper>,
    retry_policy: RetryPolicy,
    thinking_level: Option<String>,
}

impl SummarizeService {
    pub fn new(
        backend: Arc<dyn ModelBackend>,
        sleeper: Arc<dyn Sleeper>,
        retry_policy: RetryPolicy,
        thinking_level: Option<String>,
    ) -> Self {
        Self {
            backend,
            sleeper,
            retry_policy,
            thinking_level,
        }
    }

    /// Summarizes one video into JSON conforming to `request.schema`.
    pub async fn summarize(&self, request: SummarizeRequest) -> AppResult<Value> {
        let video = VideoReference::parse(&request.video_input).ok_or_else(|| {
            AppError::ValidationError("Provide a YouTube URL or video id.".to_string())
        })?;
        if !request.schema.is_object() {
            return Err(AppError::ValidationError(
                "schema must be a JSON object".to_string(),
            ));
        }
        if request.model.trim().is_empty() {
            return Err(AppError::ValidationError("model must not be empty".to_string()));
        }

        log::info!("Summarizing {} with model {}", video, request.model);

        let generation = GenerationRequest {
            model: request.model,
            prompt: build_video_prompt(&request.prompt, &video, &request.metadata),
            video_uri: Some(video.to_string()),
            response_schema: request.schema,
            thinking_level: self.thinking_level.clone(),
        };

        let backend = self.backend.as_ref();
        let generation = &generation;
        let raw = call_with_retry(&self.retry_policy, self.sleeper.as_ref(), move || {
            backend.generate_json(generation)
        })
        .await?;

        serde_json::from_str(&raw).map_err(|e| {
            log::warn!("Model returned invalid JSON for {}: {}", video, e);
            AppError::ResponseFormatError {
                message: format!("Model returned invalid JSON: {}", e),
                raw: Some(raw),
            }
        })
    }
}

/// Contents of a schema file handed to the CLI.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDocument {
    Preset {
        prompt: Option<String>,
        schema: Value,
    },
    Schema(Value),
}

impl SchemaDocument {
    /// Tells a preset document (`name`/`prompt` plus `schema`) from a bare
    /// JSON Schema (`type`/`properties`).
    pub fn detect(value: Value) -> AppResult<Self> {
        let Some(object) = value.as_object() else {
            return Err(AppError::ValidationError(
                "Schema file must contain a JSON object".to_string(),
            ));
        };

        let looks_like_preset = (object.contains_key("prompt") || object.contains_key("name"))
            && object.get("schema").is_some_and(Value::is_object);
        if looks_like_preset {
            let document: PresetDocument = serde_json::from_value(value)
                .map_err(|e| AppError::ValidationError(format!("Invalid preset file: {}", e)))?;
            return Ok(SchemaDocument::Preset {
                prompt: document.prompt,
                schema: document.schema,
            });
        }

        if object.contains_key("type") || object.contains_key("properties") {
            return Ok(SchemaDocument::Schema(value));
        }

        Err(AppError::ValidationError(
            "File is neither a JSON Schema nor a preset document".to_string(),
        ))
    }
}
