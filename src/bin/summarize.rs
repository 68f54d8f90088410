use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use env_logger::Env;
use serde_json::Value;
use tokio::fs;

use youtube_summarize::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::VideoMetadata,
    repositories::FilePresetRepository,
    services::{
        model_client::GeminiClient,
        preset_service::PresetService,
        retry::{RetryPolicy, TokioSleeper},
        summarize_service::{SchemaDocument, SummarizeRequest, SummarizeService},
    },
};

#[derive(Parser)]
#[command(name = "summarize")]
#[command(about = "Summarize a YouTube video into schema-conforming JSON")]
struct Cli {
    /// YouTube URL or bare video id
    video: String,

    /// JSON Schema file, or a saved preset document
    #[arg(long, conflicts_with = "preset")]
    schema: Option<PathBuf>,

    /// Id of a preset in the presets directory
    #[arg(long)]
    preset: Option<String>,

    /// Prompt override
    #[arg(long)]
    prompt: Option<String>,

    /// Model name (defaults to GEMINI_MODEL or the built-in default)
    #[arg(long)]
    model: Option<String>,

    /// Optional title included in the prompt
    #[arg(long, default_value = "")]
    title: String,

    /// Optional channel included in the prompt
    #[arg(long, default_value = "")]
    channel: String,

    /// Optional upload date (YYYY-MM-DD) included in the prompt
    #[arg(long, default_value = "")]
    upload_date: String,

    /// Output path, or "-" for stdout
    #[arg(long, default_value = "-")]
    out: String,
}

/// Resolves the prompt and schema to use, in order: --schema, --preset,
/// the default preset.
async fn resolve_request(cli: &Cli, presets: &PresetService) -> AppResult<(String, Value)> {
    let default_preset = presets.default_preset().await;

    let (prompt, schema) = if let Some(path) = &cli.schema {
        let content = fs::read_to_string(path).await.map_err(|e| {
            AppError::InternalError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            AppError::ValidationError(format!("{} is not valid JSON: {}", path.display(), e))
        })?;

        match SchemaDocument::detect(value)? {
            SchemaDocument::Preset { prompt, schema } => {
                (prompt.unwrap_or(default_preset.prompt), schema)
            }
            SchemaDocument::Schema(schema) => (default_preset.prompt, schema),
        }
    } else if let Some(id) = &cli.preset {
        let preset = presets.get_preset(id).await?;
        (preset.prompt, preset.schema)
    } else {
        (default_preset.prompt, default_preset.schema)
    };

    Ok((cli.prompt.clone().unwrap_or(prompt), schema))
}

async fn write_output(out: &str, payload: &str) -> AppResult<()> {
    if out == "-" {
        println!("{}", payload);
        return Ok(());
    }

    let path = PathBuf::from(out);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&path, payload).await?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

async fn run(cli: Cli, config: Config) -> AppResult<()> {
    let presets = PresetService::new(
        Arc::new(FilePresetRepository::new(config.presets_dir.clone())),
        config.default_preset_id.clone(),
    );
    let (prompt, schema) = resolve_request(&cli, &presets).await?;

    let service = SummarizeService::new(
        Arc::new(GeminiClient::new(&config)?),
        Arc::new(TokioSleeper),
        RetryPolicy::from_config(&config),
        config.thinking_level.clone(),
    );

    let result = service
        .summarize(SummarizeRequest {
            video_input: cli.video.clone(),
            prompt,
            schema,
            model: cli.model.clone().unwrap_or_else(|| config.default_model.clone()),
            metadata: VideoMetadata {
                title: cli.title.clone(),
                channel: cli.channel.clone(),
                upload_date: cli.upload_date.clone(),
            },
        })
        .await?;

    let payload = serde_json::to_string_pretty(&result)
        .map_err(|e| AppError::InternalError(format!("Failed to encode result: {}", e)))?;
    write_output(&cli.out, &payload).await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
