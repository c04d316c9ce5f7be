use std::sync::Arc;

use chrono::Utc;
use futures::Stream;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::services::search;
use crate::services::{ImageStorage, ItemFeed, ReportValidator};
use crate::stores::ItemStore;
use crate::stores::item_store::MAX_PAGE_SIZE;
use crate::types::internal::item::{ItemRecord, ItemStatus, ReportForm};
use crate::types::internal::search::{SearchQuery, SearchResults, SearchState};
use crate::types::internal::session::Session;

/// Item coordinator that orchestrates browsing, searching and reporting
pub struct ItemCoordinator {
    item_store: Arc<ItemStore>,
    image_storage: Arc<dyn ImageStorage>,
    item_feed: ItemFeed,
    validator: ReportValidator,
    page_size: u64,
}

fn require_active(session: &Session) -> Result<(), InternalError> {
    if session.is_active() {
        Ok(())
    } else {
        Err(CredentialError::ExpiredToken("jwt".to_string()).into())
    }
}

impl ItemCoordinator {
    /// Create ItemCoordinator from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            item_store: app_data.item_store.clone(),
            image_storage: app_data.image_storage.clone(),
            item_feed: app_data.item_feed.clone(),
            validator: ReportValidator::new(),
            page_size: app_data.items_page_size,
        }
    }

    fn page_limit(&self, limit: Option<u64>) -> u64 {
        limit.unwrap_or(self.page_size).clamp(1, MAX_PAGE_SIZE)
    }

    /// One page of the newest items
    pub async fn list(
        &self,
        status: Option<ItemStatus>,
        limit: Option<u64>,
    ) -> Result<Vec<ItemRecord>, InternalError> {
        self.item_store
            .list_recent(status, self.page_limit(limit))
            .await
    }

    /// Run a search over one page of recent items
    ///
    /// `None` means no search has been issued yet; nothing is fetched.
    pub async fn search(
        &self,
        query: Option<SearchQuery>,
        limit: Option<u64>,
    ) -> Result<(SearchState, SearchResults), InternalError> {
        let Some(query) = query else {
            return Ok((SearchState::NotSearched, SearchResults::default()));
        };

        let page = self
            .item_store
            .list_recent(query.status.as_status(), self.page_limit(limit))
            .await?;
        let results = search::run(&page, &query);

        tracing::debug!(
            fetched = page.len(),
            matched = results.count,
            sort = query.sort.as_str(),
            "Search completed"
        );

        Ok((SearchState::of(Some(&results)), results))
    }

    pub async fn get(&self, id: &str) -> Result<ItemRecord, InternalError> {
        self.item_store.get_by_id(id).await
    }

    /// The caller's own reports, newest first
    pub async fn mine(
        &self,
        session: &Session,
        status: Option<ItemStatus>,
    ) -> Result<Vec<ItemRecord>, InternalError> {
        require_active(session)?;
        self.item_store.list_by_user(&session.user_id, status).await
    }

    /// Validate, insert and announce a new report
    ///
    /// Nothing is stored when validation fails.
    pub async fn report(&self, session: &Session, form: ReportForm) -> Result<ItemRecord, InternalError> {
        require_active(session)?;
        let item = self.validator.validate(form)?;

        let record = self
            .item_store
            .insert(item, Some(session.user_id.clone()), Utc::now().timestamp())
            .await?;

        self.item_feed.publish(record.clone());
        Ok(record)
    }

    /// Store an uploaded image and return its public URL
    pub async fn upload_image(
        &self,
        session: &Session,
        bytes: Vec<u8>,
        extension: &str,
    ) -> Result<String, InternalError> {
        require_active(session)?;
        self.image_storage.store(bytes, extension).await
    }

    /// Stream of inserted items from now on
    pub fn subscribe(&self) -> impl Stream<Item = ItemRecord> + Send + 'static {
        self.item_feed.stream()
    }
}
