//! Shared application state for the hello gateway.
//!
//! The metrics registry is created here and handed to services by reference;
//! services never own it.

use std::sync::Arc;

use hello_core::error::Result;

use crate::config::GatewayConfig;
use crate::obs::MetricsRegistry;
use crate::services::GreetingService;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    metrics: Arc<MetricsRegistry>,
    greeting: GreetingService,
}

impl AppState {
    /// Build application state with a fresh registry.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        Self::with_registry(cfg, Arc::new(MetricsRegistry::new()))
    }

    /// Build application state on a caller-provided registry.
    pub fn with_registry(cfg: GatewayConfig, metrics: Arc<MetricsRegistry>) -> Result<Self> {
        cfg.validate()?;

        let greeting = GreetingService::new(&*metrics, cfg.greeting.message.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, metrics, greeting }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.inner.metrics
    }

    pub fn greeting(&self) -> &GreetingService {
        &self.inner.greeting
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
