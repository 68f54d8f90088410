pub mod model_client;
pub mod preset_service;
pub mod retry;
pub mod schema_converter;
pub mod schema_inference_service;
pub mod summarize_service;
