use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::errors::ApplicationError;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

/// Configuration specification with environment override → default priority
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub env_override: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            min_length: None,
            max_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }

    /// Load a setting value with source tracking
    ///
    /// The environment variable wins when present; otherwise the default is
    /// used. Both are validated against the same rules.
    pub fn load_setting_with_source(&self) -> Result<ConfigValue, ApplicationError> {
        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value, env_var)?;

                return Ok(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable {
                        name: env_var.clone(),
                    },
                });
            }
        }

        if let Some(default) = &self.default_value {
            self.validate_value(default, self.setting_name())?;

            return Ok(ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            });
        }

        if self.required {
            return Err(ApplicationError::InvalidSetting {
                setting_name: self.setting_name().to_string(),
                reason: "Required setting has no value from any source".to_string(),
            });
        }

        Ok(ConfigValue {
            value: String::new(),
            source: ConfigValueSource::Default,
        })
    }

    /// Shorthand for `load_setting_with_source().value`
    pub fn load(&self) -> Result<String, ApplicationError> {
        Ok(self.load_setting_with_source()?.value)
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str, setting_name: &str) -> Result<(), ApplicationError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at least {} characters long", min_len),
                });
            }
        }

        if let Some(max_len) = self.max_length {
            if value.len() > max_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at most {} characters long", max_len),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason,
            })?;
        }

        Ok(())
    }
}

/// Type parsing utilities for configuration values
impl ConfigSpec {
    /// Parse a port number from string with validation
    ///
    /// Validates that the port is in the valid range (1-65535).
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ApplicationError> {
        let port = value.trim().parse::<u16>()
            .map_err(|e| ApplicationError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!("Expected port number (1-65535), got '{}': {}", value, e),
            })?;

        if port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Port number must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }

    pub fn parse_unsigned(value: &str, setting_name: &str) -> Result<u64, ApplicationError> {
        value.trim().parse::<u64>()
            .map_err(|e| ApplicationError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!("Expected non-negative integer, got '{}': {}", value, e),
            })
    }

    /// Validate an integer is within the specified range
    pub fn validate_integer_range(value: &str, min: i64, max: i64) -> Result<(), String> {
        let parsed = value.trim().parse::<i64>()
            .map_err(|_| format!("Expected integer between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Value {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate a port number is within the specified range
    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let parsed = value.parse::<u16>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Port {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate an absolute http(s) URL without a trailing path requirement
    pub fn validate_http_url(value: &str) -> Result<(), String> {
        let rest = value
            .strip_prefix("http://")
            .or_else(|| value.strip_prefix("https://"))
            .ok_or_else(|| "URL must start with http:// or https://".to_string())?;

        if rest.is_empty() || rest.starts_with('/') {
            return Err("URL must include a host".to_string());
        }
        if rest.chars().any(char::is_whitespace) {
            return Err("URL cannot contain whitespace".to_string());
        }

        Ok(())
    }

    /// Validate an IPv4 address format (4 dot-separated integers 0-255)
    pub fn validate_ipv4_address(value: &str) -> Result<(), String> {
        let parts: Vec<&str> = value.split('.').collect();

        if parts.len() != 4 {
            return Err(format!("IPv4 address must have exactly 4 parts separated by dots, got {}", parts.len()));
        }

        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err(format!("IPv4 address part {} cannot be empty", i + 1));
            }

            if part.len() > 1 && part.starts_with('0') {
                return Err(format!("IPv4 address part {} cannot have leading zeros: '{}'", i + 1, part));
            }

            let octet = part.parse::<u16>()
                .map_err(|_| format!("IPv4 address part {} must be a number: '{}'", i + 1, part))?;

            if octet > 255 {
                return Err(format!("IPv4 address part {} must be between 0-255, got {}", i + 1, octet));
            }
        }

        Ok(())
    }

    /// Validate a host address (IPv4, IPv6, or hostname)
    ///
    /// - IPv4 addresses get strict octet validation
    /// - Anything containing a colon is treated as IPv6 and only loosely checked
    /// - Hostnames must not contain whitespace
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if value.contains(':') {
            if value.starts_with('[') && value.ends_with(']') {
                let ipv6_part = &value[1..value.len() - 1];
                if ipv6_part.is_empty() || !ipv6_part.contains(':') {
                    return Err("Invalid IPv6 address format".to_string());
                }
            }
            return Ok(());
        }

        if value == "[]" {
            return Err("Invalid IPv6 address format".to_string());
        }

        if value.contains('.') {
            let parts: Vec<&str> = value.split('.').collect();
            if parts.len() == 4 && parts.iter().all(|part| part.chars().all(|c| c.is_ascii_digit())) {
                return Self::validate_ipv4_address(value);
            }
        }

        if value.contains(' ') || value.contains('\t') || value.contains('\n') {
            return Err("Host address cannot contain whitespace characters".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn env(vars: &[(&str, &str)]) -> Arc<MockEnvironment> {
        Arc::new(MockEnvironment::empty().with_vars(vars))
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(ConfigSpec::parse_port("8080", "PORT").unwrap(), 8080);
        assert_eq!(ConfigSpec::parse_port(" 443 ", "PORT").unwrap(), 443);
        assert!(ConfigSpec::parse_port("0", "PORT").is_err());
        assert!(ConfigSpec::parse_port("65536", "PORT").is_err());
        assert!(ConfigSpec::parse_port("http", "PORT").is_err());
    }

    #[test]
    fn test_range_validators() {
        assert!(ConfigSpec::validate_integer_range("50", 1, 200).is_ok());
        assert!(ConfigSpec::validate_integer_range("0", 1, 200).is_err());
        assert!(ConfigSpec::validate_integer_range("201", 1, 200).is_err());
        assert!(ConfigSpec::validate_port_range("3000", 1, 65535).is_ok());
        assert!(ConfigSpec::validate_port_range("abc", 1, 65535).is_err());
    }

    #[test]
    fn test_validate_http_url() {
        assert!(ConfigSpec::validate_http_url("http://localhost:3000").is_ok());
        assert!(ConfigSpec::validate_http_url("https://lostfound.example").is_ok());
        assert!(ConfigSpec::validate_http_url("ftp://lostfound.example").is_err());
        assert!(ConfigSpec::validate_http_url("https://").is_err());
        assert!(ConfigSpec::validate_http_url("http://bad host").is_err());
    }

    #[test]
    fn test_validate_ipv4_address() {
        assert!(ConfigSpec::validate_ipv4_address("127.0.0.1").is_ok());
        assert!(ConfigSpec::validate_ipv4_address("0.0.0.0").is_ok());
        assert!(ConfigSpec::validate_ipv4_address("256.0.0.1").is_err());
        assert!(ConfigSpec::validate_ipv4_address("01.0.0.1").is_err());
        assert!(ConfigSpec::validate_ipv4_address("1.2.3").is_err());
    }

    #[test]
    fn test_validate_host_address() {
        assert!(ConfigSpec::validate_host_address("localhost").is_ok());
        assert!(ConfigSpec::validate_host_address("::1").is_ok());
        assert!(ConfigSpec::validate_host_address("[::1]").is_ok());
        assert!(ConfigSpec::validate_host_address("").is_err());
        assert!(ConfigSpec::validate_host_address("999.1.1.1").is_err());
        assert!(ConfigSpec::validate_host_address("my host").is_err());
    }

    #[test]
    fn test_load_setting_with_source_env_override() {
        let spec = ConfigSpec::new(env(&[("TEST_SETTING", "env_value")]))
            .env_override("TEST_SETTING")
            .default_value("default_value");

        let result = spec.load_setting_with_source().unwrap();

        assert_eq!(result.value, "env_value");
        assert_eq!(
            result.source,
            ConfigValueSource::EnvironmentVariable {
                name: "TEST_SETTING".to_string()
            }
        );
    }

    #[test]
    fn test_load_setting_with_source_default() {
        let spec = ConfigSpec::new(env(&[]))
            .env_override("TEST_SETTING_DEFAULT")
            .default_value("default_value");

        let result = spec.load_setting_with_source().unwrap();

        assert_eq!(result.value, "default_value");
        assert_eq!(result.source, ConfigValueSource::Default);
    }

    #[test]
    fn test_load_setting_with_source_validation() {
        let spec = ConfigSpec::new(env(&[("TEST_SETTING_VALIDATION", "short")]))
            .env_override("TEST_SETTING_VALIDATION")
            .min_length(10);

        match spec.load_setting_with_source().unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "TEST_SETTING_VALIDATION");
                assert!(reason.contains("at least 10 characters"));
            }
            other => panic!("Expected InvalidSetting error, got {:?}", other),
        }
    }

    #[test]
    fn test_required_setting_without_value_fails() {
        let spec = ConfigSpec::new(env(&[]))
            .env_override("MISSING_SETTING")
            .required(true);

        assert!(matches!(
            spec.load_setting_with_source(),
            Err(ApplicationError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_optional_setting_without_value_is_empty() {
        let spec = ConfigSpec::new(env(&[])).env_override("OPTIONAL_SETTING");
        assert_eq!(spec.load().unwrap(), "");
    }
}
