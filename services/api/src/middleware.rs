//! Authentication middleware for bearer token validation

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use mongodb::bson::oid::ObjectId;
use tracing::warn;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Authenticated caller, bound into the request extensions
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: String,
}

impl AuthUser {
    /// The caller's id as a document-store identifier
    pub fn object_id(&self) -> ApiResult<ObjectId> {
        ObjectId::parse_str(&self.id)
            .map_err(|_| ApiError::BadRequest("Invalid user ID".to_string()))
    }
}

/// Authentication middleware
///
/// Rejects the request with 401 unless it carries a valid bearer token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !req.headers().contains_key(AUTHORIZATION) {
        return Err(ApiError::Unauthorized(
            "Authorization header required".to_string(),
        ));
    }

    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    let user_id = state
        .jwt_service
        .validate_token(bearer.token())
        .map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(AuthUser { id: user_id });

    Ok(next.run(req).await)
}
