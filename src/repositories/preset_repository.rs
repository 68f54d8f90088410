use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Preset, PresetDocument, PresetSummary},
};

#[async_trait]
pub trait PresetRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<PresetSummary>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Preset>>;
    async fn save(&self, preset: Preset) -> AppResult<Preset>;
}

/// One `<id>.json` document per preset in a directory.
pub struct FilePresetRepository {
    dir: PathBuf,
}

impl FilePresetRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn read_document(path: &Path) -> AppResult<PresetDocument> {
        let content = fs::read_to_string(path).await?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::InternalError(format!(
                "Invalid preset file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl PresetRepository for FilePresetRepository {
    async fn list(&self) -> AppResult<Vec<PresetSummary>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut presets = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            match Self::read_document(&path).await {
                Ok(document) => presets.push(Preset::from_document(id, document).summary()),
                Err(e) => log::warn!("Skipping preset {}: {}", path.display(), e),
            }
        }

        Ok(presets)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Preset>> {
        let path = self.path_for(id);
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }

        let document = Self::read_document(&path).await?;
        Ok(Some(Preset::from_document(id, document)))
    }

    async fn save(&self, preset: Preset) -> AppResult<Preset> {
        fs::create_dir_all(&self.dir).await?;

        let content = serde_json::to_string_pretty(&preset.to_document()).map_err(|e| {
            AppError::InternalError(format!("Failed to encode preset: {}", e))
        })?;

        // Whole-document replace: write beside the target, then rename over it.
        // One temp file per writer; concurrent saves to an id resolve last-writer-wins.
        let target = self.path_for(&preset.id);
        let temp = self
            .dir
            .join(format!(".{}.{}.json.tmp", preset.id, Uuid::new_v4()));
        if let Err(e) = fs::write(&temp, content).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp, &target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        log::info!("Saved preset '{}' to {}", preset.id, target.display());
        Ok(preset)
    }
}
