use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::ItemError;
use crate::types::db::item::{self, ActiveModel, Entity as Item};
use crate::types::internal::item::{ItemRecord, ItemStatus, NewItem};

/// Hard ceiling on a single fetch, whatever the caller asks for
pub const MAX_PAGE_SIZE: u64 = 200;

/// ItemStore reads and inserts lost/found reports
pub struct ItemStore {
    db: DatabaseConnection,
}

fn to_records(models: Vec<item::Model>) -> Result<Vec<ItemRecord>, InternalError> {
    models.into_iter().map(ItemRecord::try_from).collect()
}

impl ItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a validated report
    ///
    /// # Arguments
    /// * `item` - The validated report
    /// * `user_id` - Reporter, if known
    /// * `created_at` - Unix timestamp used for recency ordering
    ///
    /// # Returns
    /// * `Ok(ItemRecord)` - The stored record with its generated id
    pub async fn insert(
        &self,
        item: NewItem,
        user_id: Option<String>,
        created_at: i64,
    ) -> Result<ItemRecord, InternalError> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            status: Set(item.status.as_str().to_string()),
            name: Set(item.name),
            category: Set(item.category),
            location: Set(item.location),
            occurred_on: Set(item.occurred_on),
            occurred_time: Set(item.occurred_time),
            image_url: Set(item.image_url),
            description: Set(item.description),
            user_id: Set(user_id),
            contact_name: Set(item.contact_name),
            contact_email: Set(item.contact_email),
            contact_phone: Set(item.contact_phone),
            created_at: Set(created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_item", e))?;

        tracing::info!(item_id = %model.id, status = %model.status, "Item reported");
        ItemRecord::try_from(model)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<ItemRecord, InternalError> {
        let model = Item::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_item_by_id", e))?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))?;

        ItemRecord::try_from(model)
    }

    /// Newest reports first, optionally restricted to one status
    ///
    /// `limit` is clamped to `1..=MAX_PAGE_SIZE`.
    pub async fn list_recent(
        &self,
        status: Option<ItemStatus>,
        limit: u64,
    ) -> Result<Vec<ItemRecord>, InternalError> {
        let mut query = Item::find();
        if let Some(status) = status {
            query = query.filter(item::Column::Status.eq(status.as_str()));
        }

        let models = query
            .order_by_desc(item::Column::CreatedAt)
            .limit(limit.clamp(1, MAX_PAGE_SIZE))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_recent_items", e))?;

        to_records(models)
    }

    /// Reports filed by one user, newest first
    pub async fn list_by_user(
        &self,
        user_id: &str,
        status: Option<ItemStatus>,
    ) -> Result<Vec<ItemRecord>, InternalError> {
        let mut query = Item::find().filter(item::Column::UserId.eq(user_id));
        if let Some(status) = status {
            query = query.filter(item::Column::Status.eq(status.as_str()));
        }

        let models = query
            .order_by_desc(item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_items_by_user", e))?;

        to_records(models)
    }

    pub async fn count_all(&self) -> Result<u64, InternalError> {
        Item::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_items", e))
    }

    /// Items with `created_at >= since`
    pub async fn count_created_since(&self, since: i64) -> Result<u64, InternalError> {
        Item::find()
            .filter(item::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_recent_items", e))
    }
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore").field("db", &"<connection>").finish()
    }
}
