//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::jwt::CredentialError;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed body, invalid enumeration value, or invalid id format
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing, invalid or expired token, or bad login credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Username already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Todo absent or owned by someone else
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence, hashing or signing failure
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            // Duplicate usernames are reported as a plain 400 on the wire
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Every store failure is internal by default
///
/// Handlers that expect a unique-index violation, such as registration,
/// match `DatabaseError::Duplicate` themselves before converting.
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidToken => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_error_status_codes() {
        let cases = [
            (ApiError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Conflict("taken".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                ApiError::Internal("db down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = render(err).await;
            assert_eq!(status, expected);
        }
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (_, body) = render(ApiError::Internal("connection refused".into())).await;
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[test]
    fn test_unexpected_duplicate_key_is_internal() {
        let err = ApiError::from(DatabaseError::Duplicate("E11000".into()));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_invalid_token_maps_to_unauthorized() {
        let err = ApiError::from(CredentialError::InvalidToken);
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
