//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use hello_core::error::{HelloError, Result};

pub use schema::{CorsSection, GatewayConfig, GatewaySection, GreetingSection};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "hello.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        HelloError::Internal(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| HelloError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve config relative to the working directory. See [`load_in`].
pub fn load(explicit: Option<&str>) -> Result<GatewayConfig> {
    load_in(Path::new("."), explicit)
}

/// Explicit path (`HELLO_CONFIG`) wins; otherwise `<dir>/hello.yaml` when
/// present; otherwise built-in defaults. A relative explicit path is taken
/// relative to `dir`.
pub fn load_in(dir: &Path, explicit: Option<&str>) -> Result<GatewayConfig> {
    let default_file = dir.join(DEFAULT_CONFIG_PATH);
    match explicit {
        Some(path) => load_from_file(dir.join(path)),
        None if default_file.exists() => load_from_file(default_file),
        None => {
            tracing::info!("no config file found, using defaults");
            Ok(GatewayConfig::default())
        }
    }
}
