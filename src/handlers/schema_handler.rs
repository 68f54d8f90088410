use actix_web::{post, web, HttpResponse};
use serde_json::Value;

use crate::{
    errors::AppError,
    models::{
        domain::ObjectSchema,
        dto::{request::FieldsToSchemaRequestDto, response::SchemaFieldsDto},
    },
    services::schema_converter::{fields_to_schema, schema_to_fields},
};

#[post("/api/schema/from-fields")]
pub async fn schema_from_fields(
    request: web::Json<FieldsToSchemaRequestDto>,
) -> Result<HttpResponse, AppError> {
    let schema = fields_to_schema(&request.fields);
    Ok(HttpResponse::Ok().json(schema.to_value()))
}

#[post("/api/schema/to-fields")]
pub async fn schema_to_rows(schema: web::Json<Value>) -> Result<HttpResponse, AppError> {
    let schema = ObjectSchema::from_value(&schema)?;
    let rows = schema_to_fields(&schema);
    Ok(HttpResponse::Ok().json(SchemaFieldsDto {
        fields: rows.fields,
        truncated: rows.truncated,
    }))
}
