use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Field types offered by the schema builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    String,
    Number,
    Boolean,
    List,
    Object,
}

/// One editable row of the schema builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SchemaField {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub children: Vec<SchemaField>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
            children: Vec::new(),
        }
    }

    pub fn object(name: impl Into<String>, required: bool, children: Vec<SchemaField>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Object,
            required,
            children,
        }
    }

    /// The empty row shown for an object without properties.
    pub fn placeholder() -> Self {
        Self::default()
    }
}

/// Item schema of a builder list. Lists only ever hold strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ListItems {
    String,
}

/// The JSON Schema subset the builder understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaNode {
    String,
    Number,
    Boolean,
    #[serde(rename = "array")]
    List { items: ListItems },
    Object(ObjectSchema),
}

impl SchemaNode {
    pub fn list() -> Self {
        SchemaNode::List {
            items: ListItems::String,
        }
    }

    /// Reads an arbitrary JSON Schema fragment, mapping anything outside the
    /// subset onto its closest variant.
    pub fn from_value(value: &Value) -> Self {
        match schema_type(value) {
            Some("array") => SchemaNode::list(),
            Some("object") => SchemaNode::Object(ObjectSchema::from_value_lenient(value)),
            Some("number") | Some("integer") => SchemaNode::Number,
            Some("boolean") => SchemaNode::Boolean,
            _ => SchemaNode::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(default)]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ObjectSchema {
    /// Parses a top-level schema. Anything but `type: "object"` is rejected.
    pub fn from_value(value: &Value) -> AppResult<Self> {
        match schema_type(value) {
            Some("object") => Ok(Self::from_value_lenient(value)),
            Some(other) => Err(AppError::ValidationError(format!(
                "Schema must have type \"object\", got \"{}\"",
                other
            ))),
            None => Err(AppError::ValidationError(
                "Schema must be a JSON object with type \"object\"".to_string(),
            )),
        }
    }

    fn from_value_lenient(value: &Value) -> Self {
        let properties = value
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, sub)| (name.clone(), SchemaNode::from_value(sub)))
                    .collect()
            })
            .unwrap_or_default();

        let required = value
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            properties,
            required,
        }
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(SchemaNode::Object(self.clone()))
            .unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
    }
}

fn schema_type(value: &Value) -> Option<&str> {
    match value.get("type")? {
        Value::String(t) => Some(t.as_str()),
        // `["string", "null"]` style unions: take the first non-null member.
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}
