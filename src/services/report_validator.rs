use chrono::NaiveDate;

use crate::errors::InternalError;
use crate::errors::internal::{FieldViolation, ItemError};
use crate::types::internal::item::{ItemStatus, NewItem, ReportForm};

/// Validates report form input before anything is stored
///
/// Every rule is checked and all failures are returned together so the
/// form can mark each offending field at once.
pub struct ReportValidator {
    min_name: usize,
    min_location: usize,
    min_description: usize,
    min_contact_name: usize,
}

impl Default for ReportValidator {
    fn default() -> Self {
        Self {
            min_name: 2,
            min_location: 5,
            min_description: 10,
            min_contact_name: 2,
        }
    }
}

impl ReportValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw form and produce an insertable item
    ///
    /// # Returns
    /// * `Ok(NewItem)` - Trimmed, typed report
    /// * `Err(InternalError::Item(ItemError::Validation))` - One violation per failing field
    pub fn validate(&self, form: ReportForm) -> Result<NewItem, InternalError> {
        let mut violations = Vec::new();

        let status = match form.status.parse::<ItemStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                violations.push(FieldViolation::new("status", "Choose either lost or found"));
                None
            }
        };

        self.check_min(&mut violations, "name", "Item name", &form.name, self.min_name);

        if form.category.trim().is_empty() {
            violations.push(FieldViolation::new("category", "Select a category"));
        }

        let occurred_on = form.occurred_on.trim();
        if NaiveDate::parse_from_str(occurred_on, "%Y-%m-%d").is_err() {
            violations.push(FieldViolation::new(
                "occurred_on",
                "Date must be formatted as YYYY-MM-DD",
            ));
        }

        self.check_min(&mut violations, "location", "Location", &form.location, self.min_location);
        self.check_min(
            &mut violations,
            "description",
            "Description",
            &form.description,
            self.min_description,
        );
        self.check_min(
            &mut violations,
            "contact_name",
            "Contact name",
            &form.contact_name,
            self.min_contact_name,
        );

        if !is_valid_email(&form.contact_email) {
            violations.push(FieldViolation::new(
                "contact_email",
                "Please enter a valid email address",
            ));
        }

        match status {
            Some(status) if violations.is_empty() => Ok(NewItem {
                status,
                name: form.name.trim().to_string(),
                category: form.category.trim().to_string(),
                location: form.location.trim().to_string(),
                occurred_on: occurred_on.to_string(),
                occurred_time: non_blank(form.occurred_time),
                image_url: non_blank(form.image_url),
                description: form.description.trim().to_string(),
                contact_name: form.contact_name.trim().to_string(),
                contact_email: form.contact_email.trim().to_string(),
                contact_phone: non_blank(form.contact_phone),
            }),
            _ => Err(ItemError::Validation(violations).into()),
        }
    }

    fn check_min(
        &self,
        violations: &mut Vec<FieldViolation>,
        field: &str,
        label: &str,
        value: &str,
        min: usize,
    ) {
        if value.trim().chars().count() < min {
            violations.push(FieldViolation::new(
                field,
                format!("{} must be at least {} characters", label, min),
            ));
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain, no whitespace
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
