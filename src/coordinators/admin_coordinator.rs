use std::sync::Arc;

use chrono::Utc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::stores::{CredentialStore, ItemStore};
use crate::types::internal::admin::AdminOverview;
use crate::types::internal::auth::{Role, UserRecord};
use crate::types::internal::session::Session;

/// Window counted as "recent" on the overview
const RECENT_WINDOW_SECS: i64 = 7 * 24 * 60 * 60;

/// Admin coordinator that orchestrates the dashboard and role management
pub struct AdminCoordinator {
    credential_store: Arc<CredentialStore>,
    item_store: Arc<ItemStore>,
}

impl AdminCoordinator {
    /// Create AdminCoordinator from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: app_data.credential_store.clone(),
            item_store: app_data.item_store.clone(),
        }
    }

    /// Confirm the caller is an admin right now
    ///
    /// The stored role is checked rather than the token claim, so a demotion
    /// takes effect before the caller's token expires.
    async fn require_admin(&self, session: &Session) -> Result<UserRecord, InternalError> {
        if !session.is_active() {
            return Err(CredentialError::ExpiredToken("jwt".to_string()).into());
        }

        let user = self.credential_store.get_user_by_id(&session.user_id).await?;
        if user.role != Role::Admin {
            tracing::warn!(user_id = %session.user_id, "Non-admin requested an admin operation");
            return Err(CredentialError::AdminRequired.into());
        }

        Ok(user)
    }

    /// Orchestrate the dashboard counts
    ///
    /// # Authorization
    /// Requires the admin role
    pub async fn overview(&self, session: &Session) -> Result<AdminOverview, InternalError> {
        self.require_admin(session).await?;

        let since = Utc::now().timestamp() - RECENT_WINDOW_SECS;

        Ok(AdminOverview {
            total_users: self.credential_store.count_users().await?,
            total_items: self.item_store.count_all().await?,
            recent_items: self.item_store.count_created_since(since).await?,
        })
    }

    /// Change another user's role
    ///
    /// Coordinates the sequence of operations:
    /// 1. Check authorization (requires admin)
    /// 2. Prevent self-modification
    /// 3. Update the stored role
    pub async fn assign_role(
        &self,
        session: &Session,
        target_user_id: &str,
        role: Role,
    ) -> Result<UserRecord, InternalError> {
        let admin = self.require_admin(session).await?;

        if admin.id == target_user_id {
            return Err(CredentialError::SelfModificationDenied.into());
        }

        let updated = self.credential_store.set_role(target_user_id, role).await?;
        tracing::info!(
            admin_id = %admin.id,
            target_user_id = %updated.id,
            role = %role,
            "Role changed"
        );

        Ok(updated)
    }

    /// Promote an account by email without a session (CLI bootstrap)
    pub async fn grant_admin_by_email(&self, email: &str) -> Result<UserRecord, InternalError> {
        let user = self.credential_store.get_user_by_email(email).await?;
        let updated = self.credential_store.set_role(&user.id, Role::Admin).await?;
        tracing::info!(user_id = %updated.id, "Admin role granted from CLI");
        Ok(updated)
    }
}
