use std::sync::Arc;

use serde_json::Value;

use crate::{
    constants::{
        prompts::{CASE_STUDY_PROMPT, DEFAULT_PROMPT},
        schemas::{case_study_schema, default_schema, CASE_STUDY_PRESET_ID},
    },
    errors::{AppError, AppResult},
    models::domain::{slugify, Preset, PresetSummary},
    repositories::PresetRepository,
};

pub struct PresetService {
    repository: Arc<dyn PresetRepository>,
    default_preset_id: String,
}

impl PresetService {
    pub fn new(repository: Arc<dyn PresetRepository>, default_preset_id: impl Into<String>) -> Self {
        Self {
            repository,
            default_preset_id: default_preset_id.into(),
        }
    }

    pub async fn list_presets(&self) -> AppResult<Vec<PresetSummary>> {
        self.repository.list().await
    }

    pub async fn get_preset(&self, id: &str) -> AppResult<Preset> {
        let safe_id = slugify(id);
        if safe_id.is_empty() {
            return Err(AppError::NotFound(format!("Preset '{}' not found", id)));
        }

        self.repository
            .find_by_id(&safe_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Preset '{}' not found", id)))
    }

    /// Creates or overwrites the preset whose id is derived from `name`.
    pub async fn save_preset(&self, name: &str, prompt: &str, schema: Value) -> AppResult<Preset> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError("Preset name is required.".to_string()));
        }
        if !schema.is_object() {
            return Err(AppError::ValidationError(
                "Schema must be a JSON object.".to_string(),
            ));
        }

        let id = slugify(name);
        if id.is_empty() {
            return Err(AppError::ValidationError(
                "Preset name has no valid characters.".to_string(),
            ));
        }

        if let Some(existing) = self.repository.find_by_id(&id).await.ok().flatten() {
            if existing.name != name {
                log::warn!(
                    "Preset '{}' (\"{}\") is overwritten by \"{}\"",
                    id,
                    existing.name,
                    name
                );
            }
        }

        self.repository
            .save(Preset {
                id,
                name: name.to_string(),
                prompt: prompt.to_string(),
                schema,
            })
            .await
    }

    /// The configured default preset, or the built-in prompt and schema.
    pub async fn default_preset(&self) -> Preset {
        match self.repository.find_by_id(&self.default_preset_id).await {
            Ok(Some(preset)) if preset.schema.is_object() => preset,
            Ok(_) => builtin_default(&self.default_preset_id),
            Err(e) => {
                log::warn!("Failed to load default preset: {}", e);
                builtin_default(&self.default_preset_id)
            }
        }
    }

    /// Writes the bundled presets that are not in the store yet.
    pub async fn ensure_builtin_presets(&self) -> AppResult<()> {
        let builtins = [
            builtin_default(&self.default_preset_id),
            Preset {
                id: CASE_STUDY_PRESET_ID.to_string(),
                name: "Startup case study".to_string(),
                prompt: CASE_STUDY_PROMPT.to_string(),
                schema: case_study_schema(),
            },
        ];

        for preset in builtins {
            if self.repository.find_by_id(&preset.id).await?.is_none() {
                log::info!("Seeding built-in preset '{}'", preset.id);
                self.repository.save(preset).await?;
            }
        }
        Ok(())
    }
}

fn builtin_default(id: &str) -> Preset {
    Preset {
        id: id.to_string(),
        name: "Summary + keywords".to_string(),
        prompt: DEFAULT_PROMPT.to_string(),
        schema: default_schema(),
    }
}
