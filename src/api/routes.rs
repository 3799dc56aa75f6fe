//! API route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::server::SharedState;
use crate::auth::models::{ErrorBody, LoginRequest, LoginResponse};
use crate::auth::token;

// Health check

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// Auth routes

/// Check credentials and hand back the profile plus a session token.
/// Nothing is stored server-side and no cookie is set.
pub async fn login(
    State(state): State<SharedState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    let Some((email, password)) = req.credentials() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Email and password are required")),
        )
            .into_response();
    };

    match state.credentials.authenticate(email, password) {
        Ok(user) => {
            tracing::info!("User {} logged in ({})", user.email, user.role);
            let token = token::issue(&user);
            (StatusCode::OK, Json(LoginResponse { user, token })).into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed for {}", email);
            e.into_response()
        }
    }
}
