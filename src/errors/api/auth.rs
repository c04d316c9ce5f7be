use crate::errors::internal::{CredentialError, InternalError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid email or password
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// Email address is not syntactically valid
    #[oai(status = 400)]
    InvalidEmail(Json<AuthErrorResponse>),

    /// Password validation failed
    #[oai(status = 400)]
    PasswordValidationFailed(Json<AuthErrorResponse>),

    /// Email already registered
    #[oai(status = 400)]
    DuplicateEmail(Json<AuthErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<AuthErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<AuthErrorResponse>),

    /// Invalid refresh token
    #[oai(status = 401)]
    InvalidRefreshToken(Json<AuthErrorResponse>),

    /// Refresh token has expired
    #[oai(status = 401)]
    ExpiredRefreshToken(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    fn build(error: &str, message: impl Into<String>, status_code: u16) -> Json<AuthErrorResponse> {
        Json(AuthErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status_code,
        })
    }

    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Self::build(
            "invalid_credentials",
            "Invalid email or password",
            401,
        ))
    }

    pub fn password_validation_failed(message: String) -> Self {
        AuthError::PasswordValidationFailed(Self::build("password_validation_failed", message, 400))
    }

    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(Self::build(
            "duplicate_email",
            "An account with this email already exists",
            400,
        ))
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Self::build("invalid_token", "Invalid or malformed JWT", 401))
    }

    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Self::build("expired_token", "JWT has expired", 401))
    }

    pub fn invalid_refresh_token() -> Self {
        AuthError::InvalidRefreshToken(Self::build(
            "invalid_refresh_token",
            "Invalid refresh token",
            401,
        ))
    }

    pub fn expired_refresh_token() -> Self {
        AuthError::ExpiredRefreshToken(Self::build(
            "expired_refresh_token",
            "Refresh token has expired",
            401,
        ))
    }

    /// Convert InternalError to AuthError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::InvalidEmail(email)) => {
                tracing::debug!("Rejected malformed email: {}", email);
                AuthError::InvalidEmail(Self::build(
                    "invalid_email",
                    "Please enter a valid email address",
                    400,
                ))
            }
            InternalError::Credential(CredentialError::PasswordValidationFailed(message)) => {
                tracing::debug!("Password validation failed: {}", message);
                Self::password_validation_failed(message.clone())
            }
            InternalError::Credential(CredentialError::DuplicateEmail(email)) => {
                tracing::warn!("Duplicate registration attempt: {}", email);
                Self::duplicate_email()
            }
            InternalError::Credential(CredentialError::InvalidToken { token_type, reason }) => {
                tracing::debug!("Invalid token: {} - {}", token_type, reason);
                if token_type == "refresh_token" {
                    Self::invalid_refresh_token()
                } else {
                    Self::invalid_token()
                }
            }
            InternalError::Credential(CredentialError::ExpiredToken(token_type)) => {
                tracing::debug!("Expired token: {}", token_type);
                if token_type == "refresh_token" {
                    Self::expired_refresh_token()
                } else {
                    Self::expired_token()
                }
            }
            InternalError::Credential(CredentialError::UserNotFound(user_id)) => {
                // Token refers to an account that no longer exists
                tracing::warn!("Token subject not found: {}", user_id);
                Self::invalid_token()
            }
            _ => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        AuthError::InternalError(Self::build("internal_error", "An internal error occurred", 500))
    }

    fn body(&self) -> &AuthErrorResponse {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::InvalidEmail(json)
            | AuthError::PasswordValidationFailed(json)
            | AuthError::DuplicateEmail(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json)
            | AuthError::InvalidRefreshToken(json)
            | AuthError::ExpiredRefreshToken(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
