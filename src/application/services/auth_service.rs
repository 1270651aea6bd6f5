//! Authentication Service
//!
//! Handles employee login and JWT token management. Tokens are stateless:
//! logout has nothing to revoke server-side.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::EmployeeRepository;
use crate::shared::password::{verify_password, PasswordError};

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate an employee by email and password
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub employee_number: String,
    pub employee_name: String,
    pub email: String,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (employee email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Signs and verifies HS256 access tokens.
///
/// Shared by the login service, the auth middleware and the audit
/// middleware, which reads the caller identity on its own.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_minutes: i64,
}

impl TokenIssuer {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            expiry_minutes: settings.expiry_minutes,
        }
    }

    /// Issue a token for `subject`
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.expiry_minutes)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Decode and validate a token
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }
}

/// AuthService implementation
pub struct AuthServiceImpl<E>
where
    E: EmployeeRepository + ?Sized,
{
    employee_repo: Arc<E>,
    tokens: TokenIssuer,
}

impl<E> AuthServiceImpl<E>
where
    E: EmployeeRepository + ?Sized,
{
    pub fn new(employee_repo: Arc<E>, tokens: TokenIssuer) -> Self {
        Self {
            employee_repo,
            tokens,
        }
    }
}

#[async_trait]
impl<E> AuthService for AuthServiceImpl<E>
where
    E: EmployeeRepository + ?Sized + 'static,
{
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let employee = self
            .employee_repo
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        match verify_password(password, &employee.password_hash) {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::InvalidCredentials),
            Err(PasswordError::InvalidHash(reason)) => {
                tracing::warn!(
                    employee_number = %employee.employee_number,
                    %reason,
                    "Stored password is not a valid hash"
                );
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::Internal(e.to_string())),
        }

        let token = self.tokens.issue(&employee.email)?;
        tracing::info!(employee_number = %employee.employee_number, "Employee logged in");

        Ok(LoginResult {
            token,
            employee_number: employee.employee_number,
            employee_name: employee.employee_name,
            email: employee.email,
        })
    }
}
