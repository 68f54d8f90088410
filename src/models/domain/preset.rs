use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A saved (name, prompt, schema) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub prompt: String,
    pub schema: Value,
}

/// On-disk form of a preset; the id lives in the file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSummary {
    pub id: String,
    pub name: String,
}

impl Preset {
    pub fn from_document(id: impl Into<String>, document: PresetDocument) -> Self {
        let id = id.into();
        Self {
            name: document.name.unwrap_or_else(|| id.clone()),
            prompt: document.prompt.unwrap_or_default(),
            schema: document.schema,
            id,
        }
    }

    pub fn to_document(&self) -> PresetDocument {
        PresetDocument {
            name: Some(self.name.clone()),
            prompt: Some(self.prompt.clone()),
            schema: self.schema.clone(),
        }
    }

    pub fn summary(&self) -> PresetSummary {
        PresetSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Derives a filesystem-safe preset id from a display name.
///
/// Lossy: names differing only in punctuation or case map to the same id.
pub fn slugify(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_' || *ch == '-')
        .collect()
}
