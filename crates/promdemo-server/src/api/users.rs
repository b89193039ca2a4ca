//! In-memory user endpoints. Nothing is stored.

use axum::{
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{error::ApiError, now_rfc3339};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub name: &'static str,
    pub email: &'static str,
}

const USERS: [User; 2] = [
    User { id: 1, name: "John Doe", email: "john@example.com" },
    User { id: 2, name: "Jane Smith", email: "jane@example.com" },
];

#[derive(Debug, Default, Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

pub async fn list_users() -> impl IntoResponse {
    Json(USERS)
}

pub async fn create_user(req: Request) -> Result<impl IntoResponse, ApiError> {
    let input = parse_create_user(req).await?;

    let (Some(name), Some(email)) = (non_empty(input.name), non_empty(input.email)) else {
        return Err(ApiError::bad_request("Name and email are required"));
    };

    let user = CreatedUser {
        id: chrono::Utc::now().timestamp_millis(),
        name,
        email,
        created_at: now_rfc3339(),
    };
    tracing::info!(user_id = user.id, "user created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": user,
        })),
    ))
}

/// Accepts JSON or urlencoded form bodies; anything else counts as empty.
async fn parse_create_user(req: Request) -> Result<CreateUser, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        let Json(body) = Json::<CreateUser>::from_request(req, &())
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {}", e.body_text())))?;
        Ok(body)
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(body) = Form::<CreateUser>::from_request(req, &())
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid form body: {}", e.body_text())))?;
        Ok(body)
    } else {
        Ok(CreateUser::default())
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}
