//! Service config loader (strict parsing).
//!
//! Every field has a default, so a missing file is not an error. The file
//! path comes from `PROMDEMO_CONFIG` (falls back to `promdemo.yaml`), and
//! `PORT` overrides the listen port after parsing.

pub mod schema;

use std::fs;
use std::path::Path;

use promdemo_core::error::{PromDemoError, Result};

pub use schema::{ServerSection, ServiceConfig, SlowApiSection};

pub const CONFIG_ENV: &str = "PROMDEMO_CONFIG";
pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_CONFIG_PATH: &str = "promdemo.yaml";

/// Load config from the environment-selected file (if any) plus `PORT`.
pub fn load() -> Result<ServiceConfig> {
    let explicit = std::env::var(CONFIG_ENV).ok();
    let mut cfg = match explicit.as_deref() {
        Some(path) => load_from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH)?,
        None => {
            tracing::info!("no config file found, using defaults");
            ServiceConfig::default()
        }
    };

    if let Ok(port) = std::env::var(PORT_ENV) {
        apply_port_override(&mut cfg, &port)?;
    }
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PromDemoError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| PromDemoError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Replace the port of `server.listen`, keeping its host.
pub fn apply_port_override(cfg: &mut ServiceConfig, port: &str) -> Result<()> {
    let port: u16 = port
        .trim()
        .parse()
        .map_err(|_| PromDemoError::BadRequest(format!("{PORT_ENV} must be a port number: {port}")))?;
    let mut addr = cfg.server.listen_addr()?;
    addr.set_port(port);
    cfg.server.listen = addr.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_override_keeps_host() {
        let mut cfg = load_from_str("server:\n  listen: \"127.0.0.1:3000\"\n").unwrap();
        apply_port_override(&mut cfg, "8081").unwrap();
        assert_eq!(cfg.server.listen, "127.0.0.1:8081");
    }

    #[test]
    fn port_override_rejects_garbage() {
        let mut cfg = ServiceConfig::default();
        let err = apply_port_override(&mut cfg, "http").unwrap_err();
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
        assert_eq!(cfg.server.listen, "0.0.0.0:3000");
    }
}
