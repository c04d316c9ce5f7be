// Common test utilities for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use lostfound_backend::app_data::AppData;
use lostfound_backend::config::{
    BootstrapSettings, EnvironmentProvider, SecretManager, migrate_database,
};
use sea_orm::{Database, DatabaseConnection};

/// Environment provider backed by a fixed map
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Secrets plus a private image directory
    pub fn standard() -> Self {
        let image_dir = std::env::temp_dir().join(format!("lostfound-it-{}", uuid::Uuid::new_v4()));
        let image_dir = image_dir.to_string_lossy().to_string();

        Self::new(&[
            ("PUBLIC_BASE_URL", "http://it.local"),
            ("IMAGE_DIR", &image_dir),
            ("JWT_SECRET", "integration-jwt-secret-at-least-32-chars"),
            ("PASSWORD_PEPPER", "integration-pepper-16"),
            ("REFRESH_TOKEN_SECRET", "integration-refresh-secret-32-chars!"),
        ])
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Creates an in-memory database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates AppData over a fresh in-memory database
pub async fn setup_test_app() -> Arc<AppData> {
    let env = Arc::new(TestEnvironment::standard());
    let settings =
        BootstrapSettings::from_env_provider(env.clone()).expect("Failed to load settings");
    let secrets = SecretManager::from_env_provider(env).expect("Failed to load secrets");

    Arc::new(AppData::new(setup_test_db().await, &settings, secrets))
}
