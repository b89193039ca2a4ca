//! HTTP mapping for `PromDemoError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use promdemo_core::error::{ClientCode, PromDemoError};

/// Handler error; renders the JSON error bodies clients already depend on.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub PromDemoError);

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(PromDemoError::BadRequest(msg.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = StatusCode::from_u16(code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match (code, self.0) {
            (ClientCode::BadRequest, PromDemoError::BadRequest(msg)) => json!({ "error": msg }),
            (ClientCode::NotFound, PromDemoError::NotFound(msg)) => json!({
                "error": "Route not found",
                "message": msg,
            }),
            (_, err) => {
                tracing::error!(error = %err, "request failed");
                json!({
                    "error": "Something went wrong!",
                    "message": err.to_string(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
