//! hello gateway library entry.
//!
//! Wires configuration, the metrics registry, the greeting service, the CORS
//! policy, and the operational endpoints into one axum router. Consumed by
//! the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod services;

use hello_core::error::{HelloError, Result};
use tokio::net::TcpListener;

/// Serve `state` on an already-bound listener.
///
/// Once `shutdown` resolves, readiness flips to draining and the listener
/// keeps accepting for `gateway.drain_grace_ms` so load balancers observe the
/// 503 from `/readyz` before connections are refused.
pub async fn serve<F>(listener: TcpListener, state: app_state::AppState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = router::build_router(state.clone());
    let grace = state.cfg().gateway.drain_grace();

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            state.set_draining();
            tracing::info!(grace_ms = grace.as_millis() as u64, "draining");
            tokio::time::sleep(grace).await;
        })
        .await
        .map_err(|e| HelloError::Internal(format!("server failed: {e}")))
}
