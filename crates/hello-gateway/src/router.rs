//! Axum router wiring.
//!
//! `/api/hello` sits behind the CORS policy; the operational endpoints do not.
//! Every route is counted in `http_requests_total`.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::{api, app_state::AppState, obs, ops, policy};

pub fn build_router(state: AppState) -> Router {
    let cors = Arc::new(policy::CorsPolicy::from_config(&state.cfg().cors));

    let public = Router::new()
        .route("/api/hello", get(api::hello::hello))
        .layer(middleware::from_fn_with_state(cors, policy::cors::cors));

    Router::new()
        .merge(public)
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .fallback(api::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), obs::http::track_requests))
        .with_state(state)
}
