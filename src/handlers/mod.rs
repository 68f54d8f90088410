pub mod preset_handler;
pub mod schema_handler;
pub mod summarize_handler;
pub mod ui_handler;

use actix_web::web;

use crate::errors::AppError;

pub use preset_handler::{get_preset, list_presets, save_preset};
pub use schema_handler::{schema_from_fields, schema_to_rows};
pub use summarize_handler::{infer_schema, summarize};
pub use ui_handler::{defaults, health_check, index};

/// Registers every route. Malformed JSON bodies answer with the usual
/// `{error}` body instead of actix's plain-text rejection.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    }))
    .service(index)
    .service(health_check)
    .service(defaults)
    .service(summarize)
    .service(infer_schema)
    .service(list_presets)
    .service(get_preset)
    .service(save_preset)
    .service(schema_from_fields)
    .service(schema_to_rows);
}
