//! Error types for forgedesk

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use thiserror::Error;

use crate::auth::models::ErrorBody;

#[derive(Error, Debug)]
pub enum Error {
    /// Email/password pair matched no credential record.
    #[error("Invalid email or password")]
    Authentication,

    #[error("Malformed session token: {0}")]
    MalformedToken(String),

    /// A protected path was requested without any session evidence.
    /// Carries the login route the caller should be sent to.
    #[error("No session for protected path, redirect to {0}")]
    MissingSession(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'forgedesk init' first.")]
    ConfigNotFound,

    #[error("Duplicate user email in seed data: {0}")]
    DuplicateUser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::MissingSession(login_path) => {
                return Redirect::temporary(login_path).into_response();
            }
            Error::Authentication => StatusCode::UNAUTHORIZED,
            Error::MalformedToken(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
