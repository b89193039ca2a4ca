use std::net::SocketAddr;

use serde::Deserialize;
use promdemo_core::error::{PromDemoError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub slow_api: SlowApiSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerSection::default(),
            slow_api: SlowApiSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PromDemoError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.slow_api.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Directory served for paths no route matches.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            static_dir: None,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if let Some(dir) = &self.static_dir {
            if dir.trim().is_empty() {
                return Err(PromDemoError::BadRequest(
                    "server.static_dir must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            PromDemoError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlowApiSection {
    /// Candidate delays; one is picked at random per call.
    #[serde(default = "default_delays_ms")]
    pub delays_ms: Vec<u64>,

    /// Probability in `[0, 1]` that a call fails with 500.
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

impl Default for SlowApiSection {
    fn default() -> Self {
        Self {
            delays_ms: default_delays_ms(),
            failure_rate: default_failure_rate(),
        }
    }
}

impl SlowApiSection {
    pub fn validate(&self) -> Result<()> {
        if self.delays_ms.is_empty() {
            return Err(PromDemoError::BadRequest(
                "slow_api.delays_ms must not be empty".into(),
            ));
        }
        if self.delays_ms.iter().any(|&d| d > 60_000) {
            return Err(PromDemoError::BadRequest(
                "slow_api.delays_ms entries must be at most 60000".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(PromDemoError::BadRequest(
                "slow_api.failure_rate must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}
fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_delays_ms() -> Vec<u64> {
    vec![100, 150, 200, 300, 600, 500, 1000, 1400, 2500]
}
fn default_failure_rate() -> f64 {
    0.1
}
