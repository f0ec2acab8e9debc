use crate::state::AppState;
use crate::{app, app_with_state};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use omega_core::{AnchorPolicy, CodecConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const BLOCK: &str = "  const x = 1;\n  const y = 2;\n  return x + y;";

fn three_adders() -> String {
    (1..=3)
        .map(|i| format!("function add{i}() {{\n{BLOCK}\n}}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

// --- Health ---

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptimeSecs"].is_u64());
    assert!(body["startedAt"].is_string());
}

#[tokio::test]
async fn test_status_reports_policy() {
    let state = AppState::new(CodecConfig { policy: AnchorPolicy::bulk(), verify_round_trip: false });
    let (status, body) = send(app_with_state(state), get("/api/v1/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["policy"]["minBlockLen"], 30);
    assert_eq!(body["policy"]["dupThreshold"], 2);
    assert_eq!(body["verifyRoundTrip"], false);
    assert_eq!(body["stats"]["compressRequests"], 0);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _) = send(app(), get("/api/v1/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- Compress ---

#[tokio::test]
async fn test_compress_extracts_anchor() {
    let code = three_adders();
    let (status, body) = send(app(), post_json("/api/v1/compress", &json!({ "code": code }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["originalLineCount"], 15);
    assert_eq!(body["originalBytes"], code.len());
    assert!(body["anchors"].as_u64().unwrap() >= 1);
    let machine = body["machineCode"].as_str().unwrap();
    assert!(machine.starts_with("// Ω_bp: Ω_auto_map\n"));
    assert!(machine.contains("Ω_ext_0();"));
    assert!(body["compressedBytes"].as_u64().unwrap() < code.len() as u64);
    assert!(body.get("conflicts").is_none());
}

#[tokio::test]
async fn test_compress_empty_code() {
    let (status, body) = send(app(), post_json("/api/v1/compress", &json!({ "code": "" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["efficiencyGain"], 0.0);
    assert_eq!(body["anchors"], 0);
}

#[tokio::test]
async fn test_compress_missing_code_field() {
    let (status, body) = send(app(), post_json("/api/v1/compress", &json!({ "source": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(body["error"]["message"].as_str().unwrap().contains("code"));
}

#[tokio::test]
async fn test_compress_invalid_json() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/compress")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

// --- Decompress ---

#[tokio::test]
async fn test_compress_then_decompress() {
    let state = AppState::default();
    let code = three_adders();

    let (_, compressed) = send(
        app_with_state(state.clone()),
        post_json("/api/v1/compress", &json!({ "code": code, "blueprint": "adders" })),
    )
    .await;
    let machine = compressed["machineCode"].as_str().unwrap();

    let (status, body) = send(
        app_with_state(state.clone()),
        post_json("/api/v1/decompress", &json!({ "omegaCode": machine })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], code);
    assert_eq!(body["blueprint"], "adders");

    let snapshot = state.stats.snapshot();
    assert_eq!(snapshot.compress_requests, 1);
    assert_eq!(snapshot.decompress_requests, 1);
    assert_eq!(snapshot.decode_failures, 0);
    assert_eq!(snapshot.bytes_in, code.len() as u64);
}

#[tokio::test]
async fn test_decompress_auto_blueprint_omitted() {
    let (_, compressed) =
        send(app(), post_json("/api/v1/compress", &json!({ "code": "let a = 1;" }))).await;
    let machine = compressed["machineCode"].as_str().unwrap();
    let (status, body) =
        send(app(), post_json("/api/v1/decompress", &json!({ "omegaCode": machine }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "let a = 1;");
    assert!(body.get("blueprint").is_none());
}

#[tokio::test]
async fn test_decompress_missing_body_marker() {
    let state = AppState::default();
    let req = post_json(
        "/api/v1/decompress",
        &json!({ "omegaCode": "// === ANCHOR LOGIC ===\nfunction Ω_ext_0() {\n" }),
    );
    let (status, body) = send(app_with_state(state.clone()), req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "decode_error");
    assert_eq!(state.stats.snapshot().decode_failures, 1);
}

#[tokio::test]
async fn test_decompress_undefined_anchor() {
    let req = post_json("/api/v1/decompress", &json!({ "omegaCode": "Ωg a = 1;\nΩ_ext_7();" }));
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]["message"].as_str().unwrap().contains("Ω_ext_7"));
}

#[tokio::test]
async fn test_decompress_wrong_field_name() {
    let req = post_json("/api/v1/decompress", &json!({ "omega_code": "x" }));
    let (status, _) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
