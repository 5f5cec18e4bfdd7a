// ============================
// userdir-lib/src/error.rs
// ============================
//! Central error type + Axum integration.
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error taxonomy with error codes and HTTP mapping.
///
/// Registry errors carry the exact category reason; error paths never
/// leave partial registry state behind.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid password")]
    InvalidPassword,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("user not found")]
    UserNotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPassword
            | AppError::UsernameTaken
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidPassword => "VAL_001",
            AppError::UsernameTaken => "VAL_002",
            AppError::UserNotFound => "NF_001",
            AppError::Unauthorized => "AUTH_001",
            AppError::Forbidden => "AUTH_002",
            AppError::InvalidInput(_) => "VAL_003",
            AppError::Internal(_) => "INT_001",
            AppError::Json(_) => "JSON_001",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        });

        // Basic-auth challenge on 401 so generic clients re-prompt.
        if status == StatusCode::UNAUTHORIZED {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Basic")],
                axum::Json(body),
            )
                .into_response();
        }

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
