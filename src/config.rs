use std::{env, path::PathBuf, time::Duration};

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_PRESET_ID: &str = "summary_keywords";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: SecretString,
    pub gemini_api_base: String,
    pub default_model: String,
    pub thinking_level: Option<String>,
    pub request_timeout: Duration,
    pub max_attempts: u32,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
    pub presets_dir: PathBuf,
    pub default_preset_id: String,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    /// Reads configuration from the environment. A missing API key is fatal.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(
                    "Set GEMINI_API_KEY (or GOOGLE_API_KEY) in your environment or .env file."
                        .to_string(),
                )
            })?;

        let mut config = Self::with_api_key(api_key);

        if let Ok(base) = env::var("GEMINI_API_BASE") {
            config.gemini_api_base = base.trim_end_matches('/').to_string();
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.default_model = model;
        }
        if let Ok(level) = env::var("GEMINI_THINKING_LEVEL") {
            config.thinking_level = Some(level).filter(|l| !l.is_empty() && l != "none");
        }
        if let Some(secs) = parse_env::<u64>("GEMINI_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = parse_env::<u32>("GEMINI_MAX_ATTEMPTS") {
            config.max_attempts = attempts.max(1);
        }
        if let Ok(dir) = env::var("PRESETS_DIR") {
            config.presets_dir = PathBuf::from(dir);
        }
        if let Ok(id) = env::var("DEFAULT_PRESET_ID") {
            config.default_preset_id = id;
        }
        if let Ok(host) = env::var("WEB_SERVER_HOST") {
            config.web_server_host = host;
        }
        if let Some(port) = parse_env::<u16>("WEB_SERVER_PORT") {
            config.web_server_port = port;
        }

        Ok(config)
    }

    /// Builds a configuration with every setting at its default.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            gemini_api_key: SecretString::from(api_key.into()),
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            thinking_level: Some("low".to_string()),
            request_timeout: Duration::from_secs(300),
            max_attempts: 6,
            retry_base_delay: Duration::from_secs(1),
            retry_max_delay: Duration::from_secs(20),
            presets_dir: PathBuf::from("data/presets"),
            default_preset_id: DEFAULT_PRESET_ID.to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        let mut config = Self::with_api_key("test_api_key");
        config.presets_dir = std::env::temp_dir().join("youtube-summarize-test-presets");
        config.max_attempts = 3;
        config.retry_base_delay = Duration::from_millis(1);
        config.retry_max_delay = Duration::from_millis(5);
        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
