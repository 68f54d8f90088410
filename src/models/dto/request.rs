use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::models::domain::SchemaField;

fn validate_object_schema(schema: &Value) -> Result<(), ValidationError> {
    if schema.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("schema_not_object")
            .with_message("schema must be a JSON object".into()))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SummarizeRequestDto {
    #[validate(length(min = 1, message = "Provide a YouTube URL or video id."))]
    #[serde(default)]
    pub video_input: String,

    #[serde(default)]
    pub prompt: Option<String>,

    #[validate(custom(function = "validate_object_schema"))]
    #[serde(default)]
    pub schema: Value,

    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InferSchemaRequestDto {
    #[validate(length(min = 1, message = "Prompt is required."))]
    #[serde(default)]
    pub prompt: String,

    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavePresetRequestDto {
    #[validate(length(min = 1, max = 200, message = "Preset name is required."))]
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub prompt: String,

    #[validate(custom(function = "validate_object_schema"))]
    #[serde(default)]
    pub schema: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldsToSchemaRequestDto {
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}
