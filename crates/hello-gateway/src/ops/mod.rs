//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness plus greeting counter state
//! - `/readyz`  : readiness (503 once draining has begun)
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app_state::AppState;

/// Always 200 while the process serves. `counter_exported` is false when
/// the registry refused the hello counter and greetings are counted locally.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let greeting = state.greeting();
    Json(json!({
        "status": "ok",
        "greeting": {
            "requests_served": greeting.requests_served(),
            "counter_exported": greeting.counter_exported(),
        },
    }))
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let (status, label) = if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    };
    (status, Json(json!({ "status": label })))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
