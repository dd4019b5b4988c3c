use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::routes::AppState;
use crate::shared::error::AppError;

/// Header used by the admin frontend in addition to `Authorization: Bearer`
pub const TOKEN_HEADER: &str = "token";

/// Middleware that requires valid JWT authentication
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = req.headers();
    let token = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .or_else(|| headers.get(TOKEN_HEADER).and_then(|h| h.to_str().ok()))
        .ok_or(AppError::Unauthorized)?;

    let claims = super::jwt::validate_token(&state.jwt_secret, token).map_err(|e| {
        tracing::debug!("Token rejected: {:#}", e);
        AppError::Unauthorized
    })?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
