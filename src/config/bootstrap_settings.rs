use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;

/// Bootstrap settings for infrastructure configuration
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    public_base_url: String,
    image_dir: PathBuf,
    items_page_size: u64,
}

impl BootstrapSettings {
    /// Load bootstrap settings from environment variables using ConfigSpec
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://lostfound.db?mode=rwc")
            .min_length(1)
            .load()?;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load()?;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535))
            .load()?;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let public_base_url = ConfigSpec::new(env_provider.clone())
            .env_override("PUBLIC_BASE_URL")
            .validator(ConfigSpec::validate_http_url)
            .load()?;
        let public_base_url = if public_base_url.is_empty() {
            format!("http://localhost:{}", server_port)
        } else {
            public_base_url.trim_end_matches('/').to_string()
        };

        let image_dir = ConfigSpec::new(env_provider.clone())
            .env_override("IMAGE_DIR")
            .default_value("uploads/images")
            .min_length(1)
            .load()?;

        let page_size_value = ConfigSpec::new(env_provider)
            .env_override("ITEMS_PAGE_SIZE")
            .default_value("50")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, 200))
            .load()?;
        let items_page_size = ConfigSpec::parse_unsigned(&page_size_value, "ITEMS_PAGE_SIZE")?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            public_base_url,
            image_dir: PathBuf::from(image_dir),
            items_page_size,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Base URL used to build public image links, without trailing slash
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn image_dir(&self) -> &PathBuf {
        &self.image_dir
    }

    /// Default number of items fetched upstream of the search pipeline
    pub fn items_page_size(&self) -> u64 {
        self.items_page_size
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("public_base_url", &self.public_base_url)
            .field("image_dir", &self.image_dir)
            .field("items_page_size", &self.items_page_size)
            .finish()
    }
}
