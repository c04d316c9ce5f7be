use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::AdminCoordinator;
use crate::errors::InternalError;
use crate::types::internal::auth::UserRecord;

/// Promote the account registered under `email` to admin
///
/// Used to bootstrap the first admin, since role changes over HTTP
/// already require one.
pub async fn grant_admin(app_data: Arc<AppData>, email: &str) -> Result<UserRecord, InternalError> {
    AdminCoordinator::new(app_data).grant_admin_by_email(email).await
}
