// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use crate::app_data::AppData;
use crate::config::{BootstrapSettings, MockEnvironment, SecretManager};
use crate::seed::{sample_created_at, sample_items};
use crate::types::internal::auth::Role;
use crate::types::internal::item::ItemRecord;
use crate::types::internal::session::Session;

/// Creates an in-memory database with every migration applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Environment used by every test AppData
///
/// Images go to a fresh directory under the system temp dir so tests never
/// share files.
pub fn test_environment() -> MockEnvironment {
    let image_dir = std::env::temp_dir().join(format!("lostfound-test-{}", Uuid::new_v4()));

    MockEnvironment::empty().with_vars(&[
        ("DATABASE_URL", "sqlite::memory:"),
        ("PUBLIC_BASE_URL", "http://test.local"),
        ("IMAGE_DIR", &image_dir.to_string_lossy()),
        ("JWT_SECRET", "test-secret-key-minimum-32-characters-long"),
        ("PASSWORD_PEPPER", "test-pepper-for-unit-tests"),
        ("REFRESH_TOKEN_SECRET", "test-refresh-secret-minimum-32-chars"),
    ])
}

/// Creates a full AppData over a fresh in-memory database
pub async fn setup_test_app() -> Arc<AppData> {
    let env = Arc::new(test_environment());
    let settings = BootstrapSettings::from_env_provider(env.clone())
        .expect("Failed to load test settings");
    let secret_manager =
        SecretManager::from_env_provider(env).expect("Failed to load test secrets");

    let db = setup_test_db().await;
    Arc::new(AppData::new(db, &settings, secret_manager))
}

/// Inserts the sample listings with their fixed creation times
pub async fn insert_samples(app_data: &AppData) -> Vec<ItemRecord> {
    let mut records = Vec::new();
    for (index, item) in sample_items().into_iter().enumerate() {
        let record = app_data
            .item_store
            .insert(item, None, sample_created_at(index))
            .await
            .expect("Failed to insert sample item");
        records.push(record);
    }
    records
}

/// An active session for a plain user, valid for fifteen minutes
pub fn test_session(user_id: &str) -> Session {
    Session {
        user_id: user_id.to_string(),
        email: format!("{}@example.com", user_id),
        role: Role::User,
        expires_at: Utc::now().timestamp() + 900,
    }
}
