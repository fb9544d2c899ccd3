use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use hello_core::error::{HelloError, Result};
use hello_core::DEFAULT_GREETING;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub greeting: GreetingSection,

    #[serde(default)]
    pub cors: CorsSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            greeting: GreetingSection::default(),
            cors: CorsSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HelloError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.greeting.validate()?;
        self.cors.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Time between the shutdown signal and closing the listener, during
    /// which `/readyz` reports draining.
    #[serde(default = "default_drain_grace_ms")]
    pub drain_grace_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            drain_grace_ms: default_drain_grace_ms(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if self.drain_grace_ms > 60000 {
            return Err(HelloError::BadRequest(
                "gateway.drain_grace_ms must be between 0 and 60000".into(),
            ));
        }
        self.listen_addr(None).map(|_| ())
    }

    pub fn drain_grace(&self) -> Duration {
        Duration::from_millis(self.drain_grace_ms)
    }

    /// Resolve the bind address. A platform-assigned port (the `PORT`
    /// variable on Cloud Foundry style hosts) replaces the configured one.
    pub fn listen_addr(&self, port_override: Option<&str>) -> Result<SocketAddr> {
        let mut addr: SocketAddr = self.listen.parse().map_err(|e| {
            HelloError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
        })?;

        if let Some(port) = port_override {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|e| HelloError::BadRequest(format!("PORT must be a valid port: {e}")))?;
            addr.set_port(port);
        }
        Ok(addr)
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_drain_grace_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GreetingSection {
    #[serde(default = "default_message")]
    pub message: String,
}

impl Default for GreetingSection {
    fn default() -> Self {
        Self { message: default_message() }
    }
}

impl GreetingSection {
    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(HelloError::BadRequest("greeting.message must not be empty".into()));
        }
        Ok(())
    }
}

fn default_message() -> String {
    DEFAULT_GREETING.into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsSection {
    /// `"*"` admits any origin.
    #[serde(default = "default_allow_origins")]
    pub allow_origins: Vec<String>,

    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u32,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            allow_origins: default_allow_origins(),
            max_age_secs: default_max_age_secs(),
        }
    }
}

impl CorsSection {
    pub fn validate(&self) -> Result<()> {
        if self.allow_origins.is_empty() {
            return Err(HelloError::BadRequest("cors.allow_origins must not be empty".into()));
        }
        if self.allow_origins.iter().any(|o| o.trim().is_empty()) {
            return Err(HelloError::BadRequest(
                "cors.allow_origins entries must not be blank".into(),
            ));
        }
        Ok(())
    }
}

fn default_allow_origins() -> Vec<String> {
    vec!["*".into()]
}
fn default_max_age_secs() -> u32 {
    86400
}
