use std::sync::Arc;

use serde_json::{json, Value};

use crate::{
    constants::prompts::build_schema_inference_prompt,
    errors::{AppError, AppResult},
    services::{
        model_client::{GenerationRequest, ModelBackend},
        retry::{call_with_retry, RetryPolicy, Sleeper},
    },
};

pub struct SchemaInferenceService {
    backend: Arc<dyn ModelBackend>,
    sleeper: Arc<dyn Sleeper>,
    retry_policy: RetryPolicy,
    thinking_level: Option<String>,
}

impl SchemaInferenceService {
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

    /// Asks the model for an object schema describing a summary of `prompt`.
    pub async fn infer_schema(&self, prompt: &str, model: &str) -> AppResult<Value> {
        if prompt.trim().is_empty() {
            return Err(AppError::ValidationError("Prompt is required.".to_string()));
        }

        log::info!("Inferring schema with model {}", model);

        let generation = GenerationRequest {
            model: model.to_string(),
            prompt: build_schema_inference_prompt(prompt),
            video_uri: None,
            response_schema: json!({ "type": "object" }),
            thinking_level: self.thinking_level.clone(),
        };

        let backend = self.backend.as_ref();
        let generation = &generation;
        let raw = call_with_retry(&self.retry_policy, self.sleeper.as_ref(), move || {
            backend.generate_json(generation)
        })
        .await?;

        let schema: Value = serde_json::from_str(&raw).map_err(|e| AppError::ResponseFormatError {
            message: format!("Schema inference returned invalid JSON: {}", e),
            raw: Some(raw.clone()),
        })?;

        if schema.get("type").and_then(Value::as_str) != Some("object") {
            return Err(AppError::ResponseFormatError {
                message: "Invalid schema returned by model: top-level type must be \"object\""
                    .to_string(),
                raw: Some(raw),
            });
        }

        Ok(schema)
    }
}
