//! HTTP route handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use omega_core::{CompressReport, CompressStatus, DecompressReport};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

// --- Health ---

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/status", get(status))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSecs": state.start_time.elapsed().as_secs(),
        "startedAt": state.started_at.to_rfc3339(),
    }))
}

async fn status(State(state): State<AppState>) -> Json<Value> {
    let config = &state.codec.config;
    Json(json!({
        "policy": {
            "minBlockLen": config.policy.min_block_len,
            "dupThreshold": config.policy.dup_threshold,
        },
        "verifyRoundTrip": config.verify_round_trip,
        "stats": state.stats.snapshot(),
    }))
}

// --- Codec ---

pub fn codec_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/compress", post(compress))
        .route("/api/v1/decompress", post(decompress))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressRequest {
    pub code: String,
    #[serde(default)]
    pub blueprint: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecompressRequest {
    pub omega_code: String,
}

async fn compress(
    State(state): State<AppState>,
    payload: Result<Json<CompressRequest>, JsonRejection>,
) -> Result<Json<CompressReport>, ApiError> {
    let Json(req) = payload?;
    let report = state.codec.compress(&req.code, req.blueprint.as_deref());
    state.stats.record_compress(
        report.original_bytes,
        report.compressed_bytes,
        report.status == CompressStatus::Degraded,
    );
    tracing::info!(
        original = report.original_bytes,
        compressed = report.compressed_bytes,
        anchors = report.anchors,
        status = ?report.status,
        "compress"
    );
    Ok(Json(report))
}

async fn decompress(
    State(state): State<AppState>,
    payload: Result<Json<DecompressRequest>, JsonRejection>,
) -> Result<Json<DecompressReport>, ApiError> {
    let Json(req) = payload?;
    match state.codec.decompress(&req.omega_code) {
        Ok(report) => {
            state.stats.record_decompress(true);
            tracing::info!(restored = report.text.len(), "decompress");
            Ok(Json(report))
        }
        Err(err) => {
            state.stats.record_decompress(false);
            tracing::warn!(error = %err, "decompress rejected");
            Err(err.into())
        }
    }
}
