use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::request::SavePresetRequestDto};

#[get("/api/presets")]
pub async fn list_presets(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let presets = state.preset_service.list_presets().await?;
    Ok(HttpResponse::Ok().json(presets))
}

#[get("/api/presets/{id}")]
pub async fn get_preset(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let preset = state.preset_service.get_preset(&id).await?;
    Ok(HttpResponse::Ok().json(preset))
}

#[post("/api/presets")]
pub async fn save_preset(
    state: web::Data<AppState>,
    request: web::Json<SavePresetRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let preset = state
        .preset_service
        .save_preset(&request.name, &request.prompt, request.schema)
        .await?;
    Ok(HttpResponse::Ok().json(preset))
}
