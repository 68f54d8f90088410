pub mod preset;
pub mod schema;
pub mod video;

pub use preset::{slugify, Preset, PresetDocument, PresetSummary};
pub use schema::{FieldKind, ListItems, ObjectSchema, SchemaField, SchemaNode};
pub use video::{VideoMetadata, VideoReference};
