use serde::Serialize;
use serde_json::Value;

use crate::models::domain::SchemaField;

#[derive(Debug, Clone, Serialize)]
pub struct SchemaFieldsDto {
    pub fields: Vec<SchemaField>,
    /// Set when nesting deeper than one level was dropped from the rows.
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefaultsDto {
    pub prompt: String,
    pub schema: Value,
    pub model: String,
    pub preset_id: String,
}
