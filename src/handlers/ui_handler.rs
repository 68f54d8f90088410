use actix_web::{get, http::header::ContentType, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::DefaultsDto};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

/// Prompt, schema and model the UI starts from.
#[get("/api/defaults")]
pub async fn defaults(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let preset = state.preset_service.default_preset().await;
    Ok(HttpResponse::Ok().json(DefaultsDto {
        prompt: preset.prompt,
        schema: preset.schema,
        model: state.config.default_model.clone(),
        preset_id: preset.id,
    }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
