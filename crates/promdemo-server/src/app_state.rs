//! Shared application state for the promdemo server.
//!
//! Holds the validated config and the metrics registry. The registry is
//! created here once and shared by the middleware and the `/metrics` handler.

use std::sync::Arc;

use promdemo_core::error::Result;

use crate::config::ServiceConfig;
use crate::obs::HttpMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<HttpMetrics>,
}

struct AppStateInner {
    cfg: ServiceConfig,
}

impl AppState {
    /// Build application state with a fresh metrics registry.
    pub fn new(cfg: ServiceConfig) -> Result<Self> {
        Self::with_metrics(cfg, Arc::new(HttpMetrics::new()))
    }

    /// Build application state around an existing registry.
    pub fn with_metrics(cfg: ServiceConfig, metrics: Arc<HttpMetrics>) -> Result<Self> {
        cfg.validate()?;

        if let Some(dir) = &cfg.server.static_dir {
            if !std::path::Path::new(dir).is_dir() {
                tracing::warn!(static_dir = %dir, "static_dir does not exist; unmatched paths will 404");
            }
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics,
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<HttpMetrics> {
        Arc::clone(&self.metrics)
    }
}
