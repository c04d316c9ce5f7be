use crate::errors::internal::CredentialError;

/// Password policy applied at registration
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self {
            min_length: 6,
            max_length: 128,
        }
    }
}

impl PasswordValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a password against the length rules
    pub fn validate(&self, password: &str) -> Result<(), CredentialError> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(CredentialError::PasswordValidationFailed(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        if length > self.max_length {
            return Err(CredentialError::PasswordValidationFailed(format!(
                "Password must be at most {} characters",
                self.max_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        let result = PasswordValidator::new().validate("12345");
        assert!(matches!(
            result,
            Err(CredentialError::PasswordValidationFailed(msg)) if msg.contains("at least 6")
        ));
    }

    #[test]
    fn test_six_characters_accepted() {
        assert!(PasswordValidator::new().validate("123456").is_ok());
    }

    #[test]
    fn test_overlong_password_rejected() {
        assert!(PasswordValidator::new().validate(&"x".repeat(129)).is_err());
    }
}
