use crate::errors::internal::{CredentialError, InternalError, ItemError, StorageError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for item endpoints
#[derive(Object, Debug)]
pub struct ItemErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// A single report field that failed validation
#[derive(Object, Debug, Clone, PartialEq)]
pub struct FieldErrorResponse {
    /// Form field name
    pub field: String,

    /// What is wrong with it
    pub message: String,
}

/// Report validation failure, one entry per failing field
#[derive(Object, Debug)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    pub fields: Vec<FieldErrorResponse>,
}

#[derive(ApiResponse, Debug)]
pub enum ItemApiError {
    /// Report failed validation
    #[oai(status = 400)]
    Validation(Json<ValidationErrorResponse>),

    /// Unknown filter or sort value
    #[oai(status = 400)]
    InvalidFilter(Json<ItemErrorResponse>),

    /// Missing, invalid or expired session
    #[oai(status = 401)]
    Unauthorized(Json<ItemErrorResponse>),

    /// No item with this identifier
    #[oai(status = 404)]
    NotFound(Json<ItemErrorResponse>),

    /// Uploaded image exceeds the size limit
    #[oai(status = 413)]
    PayloadTooLarge(Json<ItemErrorResponse>),

    /// Uploaded image type is not accepted
    #[oai(status = 415)]
    UnsupportedMediaType(Json<ItemErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ItemErrorResponse>),
}

impl ItemApiError {
    fn build(error: &str, message: impl Into<String>, status_code: u16) -> Json<ItemErrorResponse> {
        Json(ItemErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status_code,
        })
    }

    pub fn not_found(id: &str) -> Self {
        ItemApiError::NotFound(Self::build(
            "not_found",
            format!("No item with id '{}'", id),
            404,
        ))
    }

    pub fn unauthorized() -> Self {
        ItemApiError::Unauthorized(Self::build(
            "unauthorized",
            "A valid session is required",
            401,
        ))
    }

    /// Convert InternalError to ItemApiError
    ///
    /// Validation details are returned to the client; infrastructure
    /// details are logged and replaced by a generic message.
    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Item(ItemError::NotFound(id)) => {
                tracing::debug!("Item not found: {}", id);
                Self::not_found(&id)
            }
            InternalError::Item(ItemError::Validation(violations)) => {
                tracing::debug!("Report rejected with {} violation(s)", violations.len());
                let fields = violations
                    .into_iter()
                    .map(|v| FieldErrorResponse {
                        field: v.field,
                        message: v.message,
                    })
                    .collect();
                ItemApiError::Validation(Json(ValidationErrorResponse {
                    error: "validation_failed".to_string(),
                    message: "Some fields need attention".to_string(),
                    status_code: 400,
                    fields,
                }))
            }
            InternalError::Item(ItemError::InvalidFilter { parameter, reason }) => {
                tracing::debug!("Invalid {} filter: {}", parameter, reason);
                ItemApiError::InvalidFilter(Self::build(
                    "invalid_filter",
                    format!("Invalid {}: {}", parameter, reason),
                    400,
                ))
            }
            InternalError::Storage(StorageError::TooLarge { size, max }) => {
                tracing::debug!("Rejected {} byte image", size);
                ItemApiError::PayloadTooLarge(Self::build(
                    "image_too_large",
                    format!("Images may be at most {} MB", max / (1024 * 1024)),
                    413,
                ))
            }
            InternalError::Storage(StorageError::Empty) => ItemApiError::UnsupportedMediaType(
                Self::build("empty_image", "Image body is empty", 415),
            ),
            InternalError::Storage(StorageError::UnsupportedType(ext)) => {
                ItemApiError::UnsupportedMediaType(Self::build(
                    "unsupported_image_type",
                    format!("Images of type '{}' are not accepted", ext),
                    415,
                ))
            }
            InternalError::Credential(
                CredentialError::InvalidToken { .. }
                | CredentialError::ExpiredToken(_)
                | CredentialError::UserNotFound(_),
            ) => {
                tracing::debug!("Rejected item request: {}", err);
                Self::unauthorized()
            }
            other => {
                tracing::error!("Unexpected error in item operation: {}", other);
                ItemApiError::InternalError(Self::build(
                    "internal_error",
                    "An internal error occurred",
                    500,
                ))
            }
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ItemApiError::Validation(json) => json.0.status_code,
            ItemApiError::InvalidFilter(json)
            | ItemApiError::Unauthorized(json)
            | ItemApiError::NotFound(json)
            | ItemApiError::PayloadTooLarge(json)
            | ItemApiError::UnsupportedMediaType(json)
            | ItemApiError::InternalError(json) => json.0.status_code,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ItemApiError::Validation(json) => json.0.message.clone(),
            ItemApiError::InvalidFilter(json)
            | ItemApiError::Unauthorized(json)
            | ItemApiError::NotFound(json)
            | ItemApiError::PayloadTooLarge(json)
            | ItemApiError::UnsupportedMediaType(json)
            | ItemApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for ItemApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ItemApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
