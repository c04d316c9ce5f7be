use std::fmt;
use std::sync::Arc;

use crate::config::errors::SecretError;
use crate::config::{EnvironmentProvider, SecretConfig, SecretType, SystemEnvironment};

/// Centralized manager for application secrets
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: String,
    refresh_token_secret: String,
}

impl SecretManager {
    /// Initialize the SecretManager from the process environment
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or fails validation
    pub fn init() -> Result<Self, SecretError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret(env_provider.as_ref(), &Self::jwt_config())?;
        let password_pepper = Self::load_secret(env_provider.as_ref(), &Self::pepper_config())?;
        let refresh_token_secret =
            Self::load_secret(env_provider.as_ref(), &Self::refresh_token_config())?;

        Ok(Self {
            jwt_secret,
            password_pepper,
            refresh_token_secret,
        })
    }

    fn jwt_config() -> SecretConfig {
        SecretConfig::env("JWT_SECRET").required(true).min_length(32)
    }

    fn pepper_config() -> SecretConfig {
        SecretConfig::env("PASSWORD_PEPPER").required(true).min_length(16)
    }

    fn refresh_token_config() -> SecretConfig {
        SecretConfig::env("REFRESH_TOKEN_SECRET")
            .required(true)
            .min_length(32)
    }

    /// Get the JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Get the pepper for password hashing
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    /// Get the key used to hash refresh tokens
    pub fn refresh_token_secret(&self) -> &str {
        &self.refresh_token_secret
    }

    /// Load a secret based on its configuration
    pub(crate) fn load_secret(
        env_provider: &(dyn EnvironmentProvider + Send + Sync),
        config: &SecretConfig,
    ) -> Result<String, SecretError> {
        let value = match &config.secret_type {
            SecretType::EnvVar { name } => match env_provider.get_var(name) {
                Some(v) => v,
                None if !config.required => return Ok(String::new()),
                None => return Err(SecretError::missing(name)),
            },
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(SecretError::invalid_length(
                    config.secret_type.name(),
                    min_len,
                    value.len(),
                ));
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 3 }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const JWT: &str = "this-is-a-valid-jwt-secret-with-32-characters";
    const PEPPER: &str = "valid-pepper-16ch";
    const REFRESH: &str = "this-is-a-valid-refresh-secret-32-chars";

    fn env(vars: &[(&str, &str)]) -> Arc<MockEnvironment> {
        Arc::new(MockEnvironment::empty().with_vars(vars))
    }

    #[test]
    fn test_successful_initialization_with_valid_secrets() {
        let manager = SecretManager::from_env_provider(env(&[
            ("JWT_SECRET", JWT),
            ("PASSWORD_PEPPER", PEPPER),
            ("REFRESH_TOKEN_SECRET", REFRESH),
        ]))
        .unwrap();

        assert_eq!(manager.jwt_secret(), JWT);
        assert_eq!(manager.password_pepper(), PEPPER);
        assert_eq!(manager.refresh_token_secret(), REFRESH);
    }

    #[test]
    fn test_missing_secret_is_named() {
        let result = SecretManager::from_env_provider(env(&[
            ("JWT_SECRET", JWT),
            ("REFRESH_TOKEN_SECRET", REFRESH),
        ]));

        match result {
            Err(SecretError::Missing { secret_name }) => assert_eq!(secret_name, "PASSWORD_PEPPER"),
            other => panic!("Expected Missing error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_jwt_secret_is_rejected() {
        let result = SecretManager::from_env_provider(env(&[
            ("JWT_SECRET", "too-short"),
            ("PASSWORD_PEPPER", PEPPER),
            ("REFRESH_TOKEN_SECRET", REFRESH),
        ]));

        match result {
            Err(SecretError::InvalidLength { secret_name, expected, actual }) => {
                assert_eq!(secret_name, "JWT_SECRET");
                assert_eq!(expected, 32);
                assert_eq!(actual, 9);
            }
            other => panic!("Expected InvalidLength error, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_and_display_do_not_leak_secrets() {
        let manager = SecretManager::from_env_provider(env(&[
            ("JWT_SECRET", JWT),
            ("PASSWORD_PEPPER", PEPPER),
            ("REFRESH_TOKEN_SECRET", REFRESH),
        ]))
        .unwrap();

        let debug = format!("{:?}", manager);
        let display = format!("{}", manager);
        for secret in [JWT, PEPPER, REFRESH] {
            assert!(!debug.contains(secret));
            assert!(!display.contains(secret));
        }
    }
}
