use std::fmt;

use thiserror::Error;

/// One failed rule on the report form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Report is invalid: {} field(s) failed validation", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Invalid {parameter} filter: {reason}")]
    InvalidFilter { parameter: String, reason: String },
}

impl ItemError {
    pub fn invalid_filter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFilter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}
