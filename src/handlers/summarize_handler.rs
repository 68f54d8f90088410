use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::VideoMetadata,
        dto::request::{InferSchemaRequestDto, SummarizeRequestDto},
    },
    services::summarize_service::SummarizeRequest,
};

#[post("/api/summarize")]
pub async fn summarize(
    state: web::Data<AppState>,
    request: web::Json<SummarizeRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let model = state.model_or_default(request.model.as_deref());
    let prompt = match request.prompt {
        Some(prompt) => prompt,
        None => state.preset_service.default_preset().await.prompt,
    };

    let result = state
        .summarize_service
        .summarize(SummarizeRequest {
            video_input: request.video_input,
            prompt,
            schema: request.schema,
            model,
            metadata: VideoMetadata::default(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/infer-schema")]
pub async fn infer_schema(
    state: web::Data<AppState>,
    request: web::Json<InferSchemaRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let model = state.model_or_default(request.model.as_deref());
    let schema = state
        .schema_inference_service
        .infer_schema(&request.prompt, &model)
        .await?;

    Ok(HttpResponse::Ok().json(schema))
}
