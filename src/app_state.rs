use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::FilePresetRepository,
    services::{
        model_client::{GeminiClient, ModelBackend},
        preset_service::PresetService,
        retry::{RetryPolicy, Sleeper, TokioSleeper},
        schema_inference_service::SchemaInferenceService,
        summarize_service::SummarizeService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub summarize_service: Arc<SummarizeService>,
    pub schema_inference_service: Arc<SchemaInferenceService>,
    pub preset_service: Arc<PresetService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the Gemini client and seeds the bundled presets.
    pub async fn new(config: Config) -> AppResult<Self> {
        let backend = Arc::new(GeminiClient::new(&config)?);
        let state = Self::with_backend(config, backend, Arc::new(TokioSleeper));
        state.preset_service.ensure_builtin_presets().await?;
        Ok(state)
    }

    pub fn with_backend(
        config: Config,
        backend: Arc<dyn ModelBackend>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        let retry_policy = RetryPolicy::from_config(&config);

        let summarize_service = Arc::new(SummarizeService::new(
            backend.clone(),
            sleeper.clone(),
            retry_policy,
            config.thinking_level.clone(),
        ));
        let schema_inference_service = Arc::new(SchemaInferenceService::new(
            backend,
            sleeper,
            retry_policy,
            config.thinking_level.clone(),
        ));

        let preset_repository = Arc::new(FilePresetRepository::new(config.presets_dir.clone()));
        let preset_service = Arc::new(PresetService::new(
            preset_repository,
            config.default_preset_id.clone(),
        ));

        Self {
            summarize_service,
            schema_inference_service,
            preset_service,
            config: Arc::new(config),
        }
    }

    /// Request model, falling back to the configured default.
    pub fn model_or_default(&self, model: Option<&str>) -> String {
        model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.config.default_model)
            .to_string()
    }
}
