//! Deliberately slow endpoint with random latency and random failures.

use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

use promdemo_core::error::{PromDemoError, Result};

use crate::app_state::AppState;
use crate::config::SlowApiSection;

/// Sleep for one of the configured delays; fail with `failure_rate`.
///
/// Returns the delay that was applied, in milliseconds.
pub async fn heavy_task(cfg: &SlowApiSection) -> Result<u64> {
    // ThreadRng is !Send; draw everything before the await.
    let (delay_ms, fail) = {
        let mut rng = rand::thread_rng();
        let delay = cfg.delays_ms.choose(&mut rng).copied().unwrap_or(0);
        let rate = if cfg.failure_rate.is_nan() { 0.0 } else { cfg.failure_rate.clamp(0.0, 1.0) };
        (delay, rng.gen_bool(rate))
    };

    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    if fail {
        return Err(PromDemoError::Internal(format!(
            "heavy task failed after {delay_ms}ms"
        )));
    }
    Ok(delay_ms)
}

pub async fn slow_api(State(state): State<AppState>) -> Response {
    match heavy_task(&state.cfg().slow_api).await {
        Ok(ms) => Json(json!({
            "status": "Success",
            "message": format!("Heavy task is completed in {ms}ms"),
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "slow api failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "Error", "Error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn picks_a_configured_delay() {
        let cfg = SlowApiSection { delays_ms: vec![1, 2], failure_rate: 0.0 };
        let ms = heavy_task(&cfg).await.unwrap();
        assert!(ms == 1 || ms == 2);
    }

    #[tokio::test]
    async fn always_fails_at_rate_one() {
        let cfg = SlowApiSection { delays_ms: vec![1], failure_rate: 1.0 };
        let err = heavy_task(&cfg).await.unwrap_err();
        assert_eq!(err.client_code().as_str(), "INTERNAL");
    }
}
