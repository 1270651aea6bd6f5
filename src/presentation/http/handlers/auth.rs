//! Authentication Handlers

use axum::{extract::State, Json};

use crate::application::dto::{LoginRequest, LoginResponse, MessageResponse};
use crate::application::services::{AuthService, AuthServiceImpl};
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let auth_service = AuthServiceImpl::new(state.repos.employees.clone(), state.tokens.clone());

    let result = auth_service.login(&body.email, &body.password).await?;

    Ok(Json(LoginResponse::from(result)))
}

/// Logout. Tokens are not tracked server side; the client discards its token.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}
