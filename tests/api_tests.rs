use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;

use youtube_summarize::{
    app_state::AppState,
    config::Config,
    handlers,
    services::{
        model_client::{BackendFailure, GenerationRequest, ModelBackend},
        retry::Sleeper,
    },
};

/// Answers every call with the next canned reply and records the requests.
struct StubBackend {
    replies: Mutex<Vec<Result<String, BackendFailure>>>,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl StubBackend {
    fn new(replies: Vec<Result<String, BackendFailure>>) -> Arc<Self> {
        let mut replies = replies;
        replies.reverse();
        Arc::new(Self {
            replies: Mutex::new(replies),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(text.to_string())])
    }

    fn calls(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for StubBackend {
    async fn generate_json(&self, request: &GenerationRequest) -> Result<String, BackendFailure> {
        self.seen.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(BackendFailure::Permanent("no reply left".to_string())))
    }
}

struct NoSleep;

#[async_trait]
impl Sleeper for NoSleep {
    async fn sleep(&self, _delay: Duration) {}
}

fn state_with(backend: Arc<StubBackend>, presets_dir: &TempDir) -> AppState {
    let mut config = Config::with_api_key("k");
    config.presets_dir = presets_dir.path().to_path_buf();
    config.max_attempts = 3;
    AppState::with_backend(config, backend, Arc::new(NoSleep))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(handlers::configure),
        )
        .await
    };
}

fn summary_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "summary": { "type": "string" } },
        "required": ["summary"]
    })
}

#[actix_web::test]
async fn test_summarize_returns_model_json() {
    let dir = TempDir::new().unwrap();
    let backend = StubBackend::replying(r#"{"summary":"A short summary."}"#);
    let app = app!(state_with(backend.clone(), &dir));

    let req = test::TestRequest::post()
        .uri("/api/summarize")
        .set_json(json!({
            "video_input": "abc123",
            "prompt": "Summarize",
            "schema": summary_schema(),
            "model": "m"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "summary": "A short summary." }));

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "m");
    assert_eq!(
        calls[0].video_uri.as_deref(),
        Some("https://www.youtube.com/watch?v=abc123")
    );
    assert_eq!(calls[0].response_schema, summary_schema());
    assert!(calls[0].prompt.starts_with("Summarize"));
}

#[actix_web::test]
async fn test_summarize_retries_transient_failures() {
    let dir = TempDir::new().unwrap();
    let backend = StubBackend::new(vec![
        Err(BackendFailure::Transient("503 overloaded".to_string())),
        Ok(r#"{"summary":"ok"}"#.to_string()),
    ]);
    let app = app!(state_with(backend.clone(), &dir));

    let req = test::TestRequest::post()
        .uri("/api/summarize")
        .set_json(json!({
            "video_input": "https://youtu.be/abc123",
            "prompt": "Summarize",
            "schema": summary_schema()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(backend.calls().len(), 2);
}

#[actix_web::test]
async fn test_summarize_invalid_model_output_is_server_error() {
    let dir = TempDir::new().unwrap();
    let app = app!(state_with(StubBackend::replying("not json at all"), &dir));

    let req = test::TestRequest::post()
        .uri("/api/summarize")
        .set_json(json!({
            "video_input": "abc123",
            "prompt": "Summarize",
            "schema": summary_schema(),
            "model": "m"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_server_error());

    let body: Value = test::read_body_json(resp).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert_eq!(body["raw"], "not json at all");
}

#[actix_web::test]
async fn test_summarize_permanent_failure_is_not_retried() {
    let dir = TempDir::new().unwrap();
    let backend = StubBackend::new(vec![Err(BackendFailure::Permanent(
        "400 invalid schema".to_string(),
    ))]);
    let app = app!(state_with(backend.clone(), &dir));

    let req = test::TestRequest::post()
        .uri("/api/summarize")
        .set_json(json!({
            "video_input": "abc123",
            "prompt": "Summarize",
            "schema": summary_schema()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_server_error());
    assert_eq!(backend.calls().len(), 1);
}

#[actix_web::test]
async fn test_summarize_rejects_bad_input_without_calling_model() {
    let dir = TempDir::new().unwrap();
    let backend = StubBackend::replying("{}");
    let app = app!(state_with(backend.clone(), &dir));

    let cases = [
        json!({ "video_input": "", "schema": summary_schema() }),
        json!({ "video_input": "abc123", "schema": ["not", "an", "object"] }),
    ];
    for payload in cases {
        let req = test::TestRequest::post()
            .uri("/api/summarize")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    assert!(backend.calls().is_empty());
}

#[actix_web::test]
async fn test_malformed_body_is_json_error() {
    let dir = TempDir::new().unwrap();
    let app = app!(state_with(StubBackend::replying("{}"), &dir));

    let req = test::TestRequest::post()
        .uri("/api/summarize")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid request body"));
}

#[actix_web::test]
async fn test_unknown_preset_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = app!(state_with(StubBackend::replying("{}"), &dir));

    let req = test::TestRequest::get()
        .uri("/api/presets/unknown-id")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_save_list_and_load_preset() {
    let dir = TempDir::new().unwrap();
    let app = app!(state_with(StubBackend::replying("{}"), &dir));

    let req = test::TestRequest::post()
        .uri("/api/presets")
        .set_json(json!({
            "name": "My Preset",
            "prompt": "Summarize briefly",
            "schema": summary_schema()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let saved: Value = test::read_body_json(resp).await;
    assert_eq!(saved["id"], "my_preset");
    assert_eq!(saved["name"], "My Preset");
    assert!(dir.path().join("my_preset.json").exists());

    let req = test::TestRequest::get().uri("/api/presets").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list, json!([{ "id": "my_preset", "name": "My Preset" }]));

    let req = test::TestRequest::get()
        .uri("/api/presets/my_preset")
        .to_request();
    let loaded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(loaded["prompt"], "Summarize briefly");
    assert_eq!(loaded["schema"], summary_schema());
}

#[actix_web::test]
async fn test_save_preset_requires_name() {
    let dir = TempDir::new().unwrap();
    let app = app!(state_with(StubBackend::replying("{}"), &dir));

    let req = test::TestRequest::post()
        .uri("/api/presets")
        .set_json(json!({ "name": "", "prompt": "p", "schema": summary_schema() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_infer_schema_returns_object_schema() {
    let dir = TempDir::new().unwrap();
    let inferred = json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "topics": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["summary"]
    });
    let backend = StubBackend::replying(&inferred.to_string());
    let app = app!(state_with(backend.clone(), &dir));

    let req = test::TestRequest::post()
        .uri("/api/infer-schema")
        .set_json(json!({ "prompt": "Summarize and list topics" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, inferred);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].video_uri.is_none());
    assert!(calls[0].prompt.contains("Summarize and list topics"));
}

#[actix_web::test]
async fn test_infer_schema_rejects_non_object_schema() {
    let dir = TempDir::new().unwrap();
    let app = app!(state_with(StubBackend::replying(r#"{"type":"string"}"#), &dir));

    let req = test::TestRequest::post()
        .uri("/api/infer-schema")
        .set_json(json!({ "prompt": "Summarize" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_server_error());
}

#[actix_web::test]
async fn test_defaults_fall_back_to_builtin_preset() {
    let dir = TempDir::new().unwrap();
    let app = app!(state_with(StubBackend::replying("{}"), &dir));

    let req = test::TestRequest::get().uri("/api/defaults").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["preset_id"], "summary_keywords");
    assert_eq!(body["schema"]["type"], "object");
    assert!(!body["prompt"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn test_schema_builder_round_trip_over_http() {
    let dir = TempDir::new().unwrap();
    let app = app!(state_with(StubBackend::replying("{}"), &dir));

    let req = test::TestRequest::post()
        .uri("/api/schema/from-fields")
        .set_json(json!({
            "fields": [
                { "name": "title", "type": "string", "required": true, "children": [] },
                { "name": "founder", "type": "object", "required": false, "children": [
                    { "name": "name", "type": "string", "required": true, "children": [] }
                ]}
            ]
        }))
        .to_request();
    let schema: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(schema["required"], json!(["title"]));
    assert_eq!(schema["properties"]["founder"]["required"], json!(["name"]));

    let req = test::TestRequest::post()
        .uri("/api/schema/to-fields")
        .set_json(&schema)
        .to_request();
    let rows: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rows["truncated"], false);
    assert_eq!(rows["fields"][0]["name"], "title");
    assert_eq!(rows["fields"][1]["children"][0]["name"], "name");
}
