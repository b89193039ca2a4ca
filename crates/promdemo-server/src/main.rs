//! promdemo server
//!
//! Demo REST endpoints instrumented with request latency histograms and
//! counters, exported at `/metrics`.

use promdemo_core::error::{PromDemoError, Result};
use tracing_subscriber::{fmt, EnvFilter};

use promdemo_server::{api, app_state, config, obs, router};

#[tokio::main]
async fn main() {
    obs::process::mark_process_start();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "promdemo-server exited");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PromDemoError::Internal(format!("failed to bind {listen}: {e}")))?;

    tracing::info!(%listen, "promdemo-server starting");
    for endpoint in api::ENDPOINTS {
        tracing::info!(%endpoint, "serving");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PromDemoError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler failed; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
