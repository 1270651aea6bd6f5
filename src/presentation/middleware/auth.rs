//! Authentication Middleware
//!
//! JWT validation middleware for protected routes.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated employee extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Token subject
    pub email: String,
}

/// Bearer token from the `Authorization` header, if well formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|Authorization(bearer)| bearer.token().to_string())
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !request.headers().contains_key(AUTHORIZATION) {
        return Err(AppError::Unauthorized("Missing authorization header".into()));
    }

    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()))?;

    let claims = state.tokens.verify(&token)?;

    // Insert authenticated employee into request extensions
    request
        .extensions_mut()
        .insert(AuthUser { email: claims.sub });

    Ok(next.run(request).await)
}
