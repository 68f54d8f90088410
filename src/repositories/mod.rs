pub mod preset_repository;

pub use preset_repository::{FilePresetRepository, PresetRepository};
