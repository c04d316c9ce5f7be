use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{BootstrapSettings, SecretManager};
use crate::errors::InternalError;
use crate::services::{ImageStorage, ItemFeed, LocalImageStorage, SessionHub, TokenService};
use crate::stores::{CredentialStore, ItemStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ secret_manager (Arc<SecretManager>)
///   ├─ credential_store / item_store
///   ├─ token_service, image_storage
///   └─ item_feed, session_hub (broadcast senders)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   ├─ AuthCoordinator::new(app_data)
///   ├─ ItemCoordinator::new(app_data)
///   └─ AdminCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub secret_manager: Arc<SecretManager>,
    pub credential_store: Arc<CredentialStore>,
    pub item_store: Arc<ItemStore>,
    pub token_service: Arc<TokenService>,
    pub image_storage: Arc<dyn ImageStorage>,
    pub item_feed: ItemFeed,
    pub session_hub: SessionHub,
    pub items_page_size: u64,
}

impl AppData {
    /// Initialize all application data, loading secrets from the environment
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when secret manager initialization fails
    pub fn init(db: DatabaseConnection, settings: &BootstrapSettings) -> Result<Self, InternalError> {
        tracing::debug!("Initializing secret manager...");
        let secret_manager = SecretManager::init().map_err(|e| {
            InternalError::parse("secret_manager", format!("Secret manager init failed: {}", e))
        })?;

        Ok(Self::new(db, settings, secret_manager))
    }

    /// Build application data from already-loaded settings and secrets
    pub fn new(
        db: DatabaseConnection,
        settings: &BootstrapSettings,
        secret_manager: SecretManager,
    ) -> Self {
        tracing::info!("Initializing AppData...");
        let secret_manager = Arc::new(secret_manager);

        let credential_store = Arc::new(CredentialStore::new(
            db.clone(),
            secret_manager.password_pepper().to_string(),
        ));
        let item_store = Arc::new(ItemStore::new(db.clone()));

        let token_service = Arc::new(TokenService::new(
            secret_manager.jwt_secret().to_string(),
            secret_manager.refresh_token_secret().to_string(),
        ));

        let image_storage: Arc<dyn ImageStorage> = Arc::new(LocalImageStorage::new(
            settings.image_dir().clone(),
            settings.public_base_url(),
        ));

        tracing::info!("AppData initialization complete");

        Self {
            db,
            secret_manager,
            credential_store,
            item_store,
            token_service,
            image_storage,
            item_feed: ItemFeed::default(),
            session_hub: SessionHub::default(),
            items_page_size: settings.items_page_size(),
        }
    }
}
