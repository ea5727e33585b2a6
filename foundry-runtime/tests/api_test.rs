//! Integration tests for the runtime's HTTP surfaces.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use foundry_runtime::adapters;
use foundry_runtime::{AppState, Config, HandlerError, HandlerRegistry};
use serde_json::{json, Value};
use tower::ServiceExt;

fn count_words(item: Value) -> Result<Value, HandlerError> {
    let text = item
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::new("missing text"))?;
    Ok(json!({"word_count": text.split_whitespace().count()}))
}

fn echo(item: Value) -> Result<Value, HandlerError> {
    Ok(json!({"echo": item}))
}

fn app_with(reference: &str, config: Config) -> Router {
    let mut registry = HandlerRegistry::new();
    registry.register_fn("pkg.mod", "count_words", count_words);
    registry.register_fn("pkg.mod", "echo", echo);
    registry.register_fn("pkg.mod", "panics", |_: Value| -> Result<Value, HandlerError> {
        panic!("handler panicked")
    });

    let mut config = config;
    config.handler.reference = reference.to_string();
    adapters::router(Arc::new(AppState::with_registry(config, Arc::new(registry))))
}

fn app(reference: &str) -> Router {
    app_with(reference, Config::default())
}

async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// A JSON array of `n` small records, well over axum's default body limit
/// for large `n`.
fn large_batch(n: usize) -> String {
    let items: Vec<Value> = (0..n)
        .map(|_| json!({"text": "lorem ipsum dolor sit amet consectetur"}))
        .collect();
    serde_json::to_string(&items).unwrap()
}

// REST surface

#[tokio::test]
async fn test_health_endpoint_healthy() {
    let (status, body) = send(app("pkg.mod:count_words"), "GET", "/health", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "handler": "pkg.mod:count_words",
            "module": "pkg.mod",
            "function": "count_words",
            "version": foundry_runtime::VERSION
        })
    );
}

#[tokio::test]
async fn test_health_endpoint_malformed_reference() {
    let (status, body) = send(app("nocolon"), "GET", "/health", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["module"], "unknown");
    assert_eq!(body["function"], "unknown");
}

#[tokio::test]
async fn test_predict_single() {
    let (status, body) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/predict",
        r#"{"text": "a bb ccc"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"word_count": 3}));
}

#[tokio::test]
async fn test_predict_accepts_array() {
    let (status, body) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/predict",
        r#"[{"text": "a bb ccc"}, {"text": "x"}]"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"word_count": 3}, {"word_count": 1}]));
}

#[tokio::test]
async fn test_predict_invalid_json() {
    let (status, body) = send(app("pkg.mod:count_words"), "POST", "/predict", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Invalid JSON in request body"}));
}

#[tokio::test]
async fn test_predict_handler_error() {
    let (status, body) = send(app("pkg.mod:count_words"), "POST", "/predict", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "missing text"}));
}

#[tokio::test]
async fn test_predict_unresolvable_handler() {
    let (status, body) = send(app("pkg.missing:count_words"), "POST", "/predict", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "No module named 'pkg.missing'"}));
}

#[tokio::test]
async fn test_predict_handler_panic_is_internal_error() {
    let (status, body) = send(app("pkg.mod:panics"), "POST", "/predict", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().starts_with("Internal error"));
}

#[tokio::test]
async fn test_batch_endpoint() {
    let (status, body) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/batch",
        r#"[{"text": "a bb ccc"}, {"text": "x"}]"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"word_count": 3}, {"word_count": 1}]));
}

#[tokio::test]
async fn test_batch_requires_array() {
    let (status, body) = send(app("pkg.mod:count_words"), "POST", "/batch", r#"{"a": 1}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Batch endpoint requires array input"}));
}

#[tokio::test]
async fn test_batch_invalid_json() {
    let (status, body) = send(app("pkg.mod:count_words"), "POST", "/batch", "[1,").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Invalid JSON in request body"}));
}

#[tokio::test]
async fn test_batch_item_error_aborts() {
    let (status, body) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/batch",
        r#"[{"text": "ok"}, {"nope": 1}]"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "missing text"}));
}

#[tokio::test]
async fn test_batch_accepts_large_body() {
    let body = large_batch(60_000);
    assert!(body.len() > 2 * 1024 * 1024);

    let (status, result) = send(app("pkg.mod:count_words"), "POST", "/batch", &body).await;

    assert_eq!(status, StatusCode::OK);
    let results = result.as_array().unwrap();
    assert_eq!(results.len(), 60_000);
    assert_eq!(results[59_999], json!({"word_count": 6}));
}

#[tokio::test]
async fn test_large_body_failure_keeps_detail_envelope() {
    let mut body = large_batch(60_000);
    body.pop();

    let (status, result) = send(app("pkg.mod:count_words"), "POST", "/predict", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result, json!({"detail": "Invalid JSON in request body"}));
}

// Function surface

#[tokio::test]
async fn test_function_trigger() {
    let (status, body) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/api/predict",
        r#"{"text": "hello world"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"word_count": 2}));
}

#[tokio::test]
async fn test_function_malformed_body_runs_on_empty_object() {
    let (status, body) = send(app("pkg.mod:echo"), "POST", "/api/predict", "{oops").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"echo": {}}));
}

#[tokio::test]
async fn test_function_empty_body_runs_on_empty_object() {
    let (status, body) = send(app("pkg.mod:echo"), "POST", "/api/anything", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"echo": {}}));
}

#[tokio::test]
async fn test_function_handler_error() {
    let (status, body) = send(app("pkg.mod:count_words"), "POST", "/api/predict", "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "missing text", "status": "failed"}));
}

#[tokio::test]
async fn test_function_accepts_large_body() {
    let body = large_batch(60_000);
    let (status, result) = send(app("pkg.mod:count_words"), "POST", "/api/predict", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.as_array().unwrap().len(), 60_000);
}

// Serving surface

#[tokio::test]
async fn test_score_online_and_batch() {
    let (status, body) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/score",
        r#"{"text": "one two"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"word_count": 2}));

    let (status, body) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/score",
        r#"[{"text": "one"}, {"text": "one two three"}]"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"word_count": 1}, {"word_count": 3}]));
}

#[tokio::test]
async fn test_score_failure_body() {
    let (status, body) = send(app("pkg.mod:count_words"), "POST", "/score", "{}").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "missing text", "status": "failed"}));
}

#[tokio::test]
async fn test_score_accepts_large_body() {
    let (status, result) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/score",
        &large_batch(60_000),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.as_array().unwrap().len(), 60_000);
}

// Action surface

#[tokio::test]
async fn test_action_aliases() {
    for action in ["predict", "process", "execute"] {
        let request = json!({"action": action, "params": {"text": "a b"}}).to_string();
        let (status, body) = send(app("pkg.mod:count_words"), "POST", "/mcp", &request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "result": {"word_count": 2}, "action": action})
        );
    }
}

#[tokio::test]
async fn test_action_defaults() {
    let (_, body) = send(app("pkg.mod:echo"), "POST", "/mcp", "{}").await;

    assert_eq!(
        body,
        json!({"success": true, "result": {"echo": {}}, "action": "predict"})
    );
}

#[tokio::test]
async fn test_unknown_action() {
    let (status, body) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/mcp",
        r#"{"action": "unknown_action", "params": {}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Unknown action: unknown_action",
            "action": "unknown_action"
        })
    );
}

#[tokio::test]
async fn test_action_handler_error() {
    let (_, body) = send(
        app("pkg.mod:count_words"),
        "POST",
        "/mcp",
        r#"{"action": "execute", "params": {}}"#,
    )
    .await;

    assert_eq!(
        body,
        json!({"success": false, "error": "missing text", "action": "execute"})
    );
}

#[tokio::test]
async fn test_action_invalid_json() {
    let (status, body) = send(app("pkg.mod:count_words"), "POST", "/mcp", "nope").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid JSON in request body");
    assert_eq!(body["action"], "predict");
}

#[tokio::test]
async fn test_non_string_action_is_unknown() {
    for (request, name) in [(r#"{"action": 5}"#, "5"), (r#"{"action": null}"#, "null")] {
        let (status, body) = send(app("pkg.mod:echo"), "POST", "/mcp", request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": format!("Unknown action: {}", name),
                "action": name
            })
        );
    }
}

#[tokio::test]
async fn test_action_request_must_be_object() {
    let (status, body) = send(app("pkg.mod:echo"), "POST", "/mcp", r#"["predict"]"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Action request must be a JSON object",
            "action": "predict"
        })
    );
}

#[tokio::test]
async fn test_action_accepts_large_params() {
    let request = format!(r#"{{"action": "process", "params": {}}}"#, large_batch(60_000));
    let (status, body) = send(app("pkg.mod:count_words"), "POST", "/mcp", &request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["result"].as_array().unwrap().len(), 60_000);
}

#[tokio::test]
async fn test_action_schema() {
    let (status, body) = send(app("pkg.mod:count_words"), "GET", "/mcp/schema", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "component-server");
    assert_eq!(body["version"], foundry_runtime::VERSION);
    let names: Vec<&str> = body["actions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["predict", "process"]);
}

// Surface selection

#[tokio::test]
async fn test_disabled_surfaces_are_not_mounted() {
    let mut config = Config::default();
    config.surfaces.function = false;
    config.surfaces.actions = false;

    let (status, _) = send(
        app_with("pkg.mod:echo", config.clone()),
        "POST",
        "/api/predict",
        "{}",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app_with("pkg.mod:echo", config.clone()), "POST", "/mcp", "{}").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app_with("pkg.mod:echo", config), "POST", "/predict", "{}").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_builtin_word_count_is_default() {
    let app = adapters::router(Arc::new(AppState::from_config(Config::default())));
    let (status, body) = send(app, "POST", "/predict", r#"{"text": "a bb ccc"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["word_count"], 3);
    assert_eq!(body["length_distribution"], json!({"1": 1, "2": 1, "3": 1}));
}
