//! Ω codec HTTP API server (Axum).
//!
//! Exposes the `compress` and `decompress` operations as JSON request/response
//! endpoints, plus health and status monitoring.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use omega_core::CodecConfig;
use state::AppState;

/// Build the application router with the default codec configuration.
pub fn app() -> Router {
    app_with_state(AppState::new(CodecConfig::default()))
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::codec_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests;
