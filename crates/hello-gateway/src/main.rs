//! hello gateway
//!
//! - `GET /api/hello` : fixed greeting, counted in `app_hello_requests_total`
//! - `GET /metrics`   : Prometheus text
//! - `GET /healthz`, `GET /readyz`
//!
//! Config: `HELLO_CONFIG` path, else `./hello.yaml`, else defaults.
//! `PORT` overrides the listen port.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hello_core::error::{HelloError, Result};
use hello_gateway::{app_state, config};

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "hello-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg_path = std::env::var("HELLO_CONFIG").ok();
    let cfg = config::load(cfg_path.as_deref())?;

    let port = std::env::var("PORT").ok();
    let listen = cfg.gateway.listen_addr(port.as_deref())?;

    let state = app_state::AppState::new(cfg)?;

    tracing::info!(%listen, "hello-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| HelloError::Internal(format!("failed to bind {listen}: {e}")))?;

    hello_gateway::serve(listener, state, shutdown_signal()).await?;
    tracing::info!("hello-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
