use crate::errors::internal::{CredentialError, InternalError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for admin endpoints
#[derive(Object, Debug)]
pub struct AdminErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Admin operation error types
#[derive(ApiResponse, Debug)]
pub enum AdminError {
    /// Missing, invalid or expired session
    #[oai(status = 401)]
    Unauthorized(Json<AdminErrorResponse>),

    /// Admin role required
    #[oai(status = 403)]
    AdminRequired(Json<AdminErrorResponse>),

    /// Cannot modify your own role
    #[oai(status = 403)]
    SelfModificationDenied(Json<AdminErrorResponse>),

    /// User not found
    #[oai(status = 404)]
    UserNotFound(Json<AdminErrorResponse>),

    /// Unknown role name
    #[oai(status = 400)]
    InvalidRole(Json<AdminErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AdminErrorResponse>),
}

impl AdminError {
    fn build(error: &str, message: impl Into<String>, status_code: u16) -> Json<AdminErrorResponse> {
        Json(AdminErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status_code,
        })
    }

    pub fn admin_required() -> Self {
        AdminError::AdminRequired(Self::build("admin_required", "Admin role required", 403))
    }

    pub fn invalid_role(reason: String) -> Self {
        AdminError::InvalidRole(Self::build("invalid_role", reason, 400))
    }

    /// Convert InternalError to AdminError
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Credential(CredentialError::AdminRequired) => {
                tracing::warn!("Admin endpoint called without admin role");
                Self::admin_required()
            }
            InternalError::Credential(CredentialError::SelfModificationDenied) => {
                AdminError::SelfModificationDenied(Self::build(
                    "self_modification_denied",
                    "You cannot change your own role",
                    403,
                ))
            }
            InternalError::Credential(CredentialError::UserNotFound(user_id)) => {
                AdminError::UserNotFound(Self::build(
                    "user_not_found",
                    format!("User '{}' not found", user_id),
                    404,
                ))
            }
            InternalError::Credential(
                CredentialError::InvalidToken { .. } | CredentialError::ExpiredToken(_),
            ) => {
                tracing::debug!("Rejected admin request: {}", err);
                AdminError::Unauthorized(Self::build(
                    "unauthorized",
                    "A valid session is required",
                    401,
                ))
            }
            _ => {
                tracing::error!("Unexpected error in admin operation: {}", err);
                AdminError::InternalError(Self::build(
                    "internal_error",
                    "An internal error occurred",
                    500,
                ))
            }
        }
    }

    fn body(&self) -> &AdminErrorResponse {
        match self {
            AdminError::Unauthorized(json)
            | AdminError::AdminRequired(json)
            | AdminError::SelfModificationDenied(json)
            | AdminError::UserNotFound(json)
            | AdminError::InvalidRole(json)
            | AdminError::InternalError(json) => &json.0,
        }
    }

    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }
}

impl From<InternalError> for AdminError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
