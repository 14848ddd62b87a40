// HTTP API Error Types
use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages.
/// Every failure path surfaces through here as the stable
/// `{success: false, error: <status>, message}` envelope; nothing is
/// recovered silently.
#[derive(Debug)]
pub enum ApiError {
    // 401 Unauthorized - any guard failure
    Auth(AuthError),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity - malformed or untypable request body
    Unprocessable(String),

    // 500 Internal Server Error - persistence failure, not retried
    Storage(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message. Guard failures render as
    /// `"<code>: <description>"`.
    pub fn message(&self) -> String {
        match self {
            ApiError::Auth(err) => err.to_string(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::Unprocessable(msg) => msg.clone(),
            ApiError::Storage(msg) => msg.clone(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.status_code().as_u16(),
            "message": self.message(),
        })
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(format!("no drink with id {}", id)),
            StoreError::Sqlx(e) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("database error: {}", e);
                ApiError::Storage("an error occurred while processing your request".to_string())
            }
            StoreError::Recipe(e) => {
                tracing::error!("stored recipe failed to decode: {}", e);
                ApiError::Storage("an error occurred while processing your request".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
