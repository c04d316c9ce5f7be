use std::sync::Arc;

use futures::StreamExt;
use futures::stream::BoxStream;
use poem_openapi::{
    ApiResponse, OpenApi, Tags,
    param::{Path, Query},
    payload::{Binary, EventStream, Json},
};

use crate::api::auth::BearerAuth;
use crate::coordinators::{AuthCoordinator, ItemCoordinator};
use crate::errors::ItemApiError;
use crate::errors::internal::ItemError;
use crate::types::dto::items::{
    CreateItemRequest, ImageUploadResponse, ItemEvent, ItemListResponse, ItemResponse,
    SearchResponse,
};
use crate::types::internal::item::{ItemRecord, ItemStatus};
use crate::types::internal::search::{CategoryFilter, SearchQuery, SortKey, StatusFilter};
use crate::types::internal::session::Session;

/// API tags for item endpoints
#[derive(Tags)]
enum ItemTags {
    /// Browse, search and report lost or found items
    Items,
    /// Image uploads for reports
    Images,
}

#[derive(ApiResponse)]
enum CreateItemResponse {
    /// The stored report
    #[oai(status = 201)]
    Created(Json<ItemResponse>),
}

fn parse_status(status: Option<&str>) -> Result<Option<ItemStatus>, ItemApiError> {
    match status {
        None => Ok(None),
        Some(raw) => raw
            .parse::<StatusFilter>()
            .map(|filter| filter.as_status())
            .map_err(|e| ItemApiError::from_internal_error(ItemError::invalid_filter("status", e).into())),
    }
}

fn item_list(records: Vec<ItemRecord>) -> ItemListResponse {
    let items: Vec<ItemResponse> = records.into_iter().map(ItemResponse::from).collect();
    ItemListResponse {
        count: items.len() as u64,
        items,
    }
}

/// Raw search parameters as they arrive on the query string
#[derive(Debug, Default)]
struct SearchParams {
    q: Option<String>,
    status: Option<String>,
    category: Option<String>,
    location: Option<String>,
    date: Option<String>,
    sort: Option<String>,
}

impl SearchParams {
    /// `Ok(None)` when no parameter was supplied at all
    fn into_query(self) -> Result<Option<SearchQuery>, ItemError> {
        let any_present = self.q.is_some()
            || self.status.is_some()
            || self.category.is_some()
            || self.location.is_some()
            || self.date.is_some()
            || self.sort.is_some();
        if !any_present {
            return Ok(None);
        }

        let mut query = SearchQuery::default();
        if let Some(q) = self.q {
            query = query.text(q);
        }
        if let Some(status) = self.status {
            let filter = status
                .parse::<StatusFilter>()
                .map_err(|e| ItemError::invalid_filter("status", e))?;
            query = query.status(filter);
        }
        if let Some(category) = self.category {
            query = query.category(CategoryFilter::from(category.as_str()));
        }
        if let Some(location) = self.location {
            query = query.location(location);
        }
        if let Some(date) = self.date {
            query = query.date(date);
        }
        if let Some(sort) = self.sort {
            let key = sort
                .parse::<SortKey>()
                .map_err(|e| ItemError::invalid_filter("sort", e))?;
            query = query.sort(key);
        }

        Ok(Some(query))
    }
}

/// Item API endpoints
pub struct ItemsApi {
    auth: Arc<AuthCoordinator>,
    coordinator: Arc<ItemCoordinator>,
}

impl ItemsApi {
    pub fn new(auth: Arc<AuthCoordinator>, coordinator: Arc<ItemCoordinator>) -> Self {
        Self { auth, coordinator }
    }

    fn session(&self, auth: &BearerAuth) -> Result<Session, ItemApiError> {
        Ok(self.auth.authenticate(&auth.0.token)?)
    }
}

#[OpenApi]
impl ItemsApi {
    /// Newest items first, optionally restricted to lost or found
    #[oai(path = "/items", method = "get", tag = "ItemTags::Items")]
    async fn list(
        &self,
        status: Query<Option<String>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<ItemListResponse>, ItemApiError> {
        let status = parse_status(status.0.as_deref())?;
        let records = self.coordinator.list(status, limit.0).await?;
        Ok(Json(item_list(records)))
    }

    /// Search, filter and sort the most recent items
    ///
    /// With no parameters at all the state is `not_searched`.
    #[oai(path = "/items/search", method = "get", tag = "ItemTags::Items")]
    async fn search(
        &self,
        q: Query<Option<String>>,
        status: Query<Option<String>>,
        category: Query<Option<String>>,
        location: Query<Option<String>>,
        date: Query<Option<String>>,
        sort: Query<Option<String>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<SearchResponse>, ItemApiError> {
        let params = SearchParams {
            q: q.0,
            status: status.0,
            category: category.0,
            location: location.0,
            date: date.0,
            sort: sort.0,
        };
        let query = params
            .into_query()
            .map_err(|e| ItemApiError::from_internal_error(e.into()))?;

        let (state, results) = self.coordinator.search(query, limit.0).await?;

        Ok(Json(SearchResponse {
            state: state.as_str().to_string(),
            count: results.count as u64,
            items: results.items.into_iter().map(ItemResponse::from).collect(),
        }))
    }

    /// Reports created by the caller
    #[oai(path = "/items/mine", method = "get", tag = "ItemTags::Items")]
    async fn mine(
        &self,
        auth: BearerAuth,
        status: Query<Option<String>>,
    ) -> Result<Json<ItemListResponse>, ItemApiError> {
        let session = self.session(&auth)?;
        let status = parse_status(status.0.as_deref())?;
        let records = self.coordinator.mine(&session, status).await?;
        Ok(Json(item_list(records)))
    }

    /// Live feed of newly reported items (server-sent events)
    #[oai(path = "/items/events", method = "get", tag = "ItemTags::Items")]
    async fn events(&self) -> EventStream<BoxStream<'static, ItemEvent>> {
        EventStream::new(self.coordinator.subscribe().map(ItemEvent::inserted).boxed())
    }

    /// Fetch one item
    #[oai(path = "/items/:id", method = "get", tag = "ItemTags::Items")]
    async fn get(&self, id: Path<String>) -> Result<Json<ItemResponse>, ItemApiError> {
        let record = self.coordinator.get(&id.0).await?;
        Ok(Json(record.into()))
    }

    /// Report a lost or found item
    #[oai(path = "/items", method = "post", tag = "ItemTags::Items")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateItemRequest>,
    ) -> Result<CreateItemResponse, ItemApiError> {
        let session = self.session(&auth)?;
        let record = self.coordinator.report(&session, body.0.into()).await?;
        Ok(CreateItemResponse::Created(Json(record.into())))
    }

    /// Upload an image and receive its public URL
    #[oai(path = "/images", method = "post", tag = "ItemTags::Images")]
    async fn upload_image(
        &self,
        auth: BearerAuth,
        extension: Query<String>,
        body: Binary<Vec<u8>>,
    ) -> Result<Json<ImageUploadResponse>, ItemApiError> {
        let session = self.session(&auth)?;
        let url = self
            .coordinator
            .upload_image(&session, body.0, &extension.0)
            .await?;
        Ok(Json(ImageUploadResponse { url }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_data::AppData;
    use crate::test::utils::{insert_samples, setup_test_app};
    use poem_openapi::auth::Bearer;

    async fn setup_api() -> (Arc<AppData>, ItemsApi) {
        let app_data = setup_test_app().await;
        insert_samples(&app_data).await;
        let api = ItemsApi::new(
            Arc::new(AuthCoordinator::new(app_data.clone())),
            Arc::new(ItemCoordinator::new(app_data.clone())),
        );
        (app_data, api)
    }

    async fn signed_in(app_data: &Arc<AppData>) -> BearerAuth {
        let tokens = AuthCoordinator::new(app_data.clone())
            .register("reporter@example.com", "secret1", None)
            .await
            .unwrap();
        BearerAuth(Bearer {
            token: tokens.access_token,
        })
    }

    fn report_request() -> CreateItemRequest {
        CreateItemRequest {
            status: "found".to_string(),
            name: "Red Umbrella".to_string(),
            category: "accessories".to_string(),
            occurred_on: "2023-05-07".to_string(),
            occurred_time: Some("14:30".to_string()),
            location: "City Hall, Lobby".to_string(),
            description: "Red folding umbrella left on the bench by the entrance.".to_string(),
            image_url: None,
            contact_name: "Sam".to_string(),
            contact_email: "sam@example.com".to_string(),
            contact_phone: None,
        }
    }

    async fn search(api: &ItemsApi, params: SearchParams) -> Result<Json<SearchResponse>, ItemApiError> {
        api.search(
            Query(params.q),
            Query(params.status),
            Query(params.category),
            Query(params.location),
            Query(params.date),
            Query(params.sort),
            Query(None),
        )
        .await
    }

    #[tokio::test]
    async fn test_search_without_parameters_is_not_searched() {
        let (_app_data, api) = setup_api().await;

        let response = search(&api, SearchParams::default()).await.unwrap();

        assert_eq!(response.state, "not_searched");
        assert_eq!(response.count, 0);
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_still_issues_a_search() {
        let (_app_data, api) = setup_api().await;

        let response = search(
            &api,
            SearchParams {
                q: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(response.state, "results");
        assert_eq!(response.count, 8);
        assert_eq!(response.items[0].name, "iPhone 13 Pro");
    }

    #[tokio::test]
    async fn test_search_by_location_and_oldest_first() {
        let (_app_data, api) = setup_api().await;

        let response = search(
            &api,
            SearchParams {
                location: Some("station".to_string()),
                sort: Some("oldest".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let names: Vec<&str> = response.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Blue Backpack", "Diamond Engagement Ring", "Black Wallet"]
        );
    }

    #[tokio::test]
    async fn test_unknown_sort_is_rejected() {
        let (_app_data, api) = setup_api().await;

        let result = search(
            &api,
            SearchParams {
                sort: Some("sideways".to_string()),
                ..Default::default()
            },
        )
        .await;

        match result {
            Err(ItemApiError::InvalidFilter(json)) => assert_eq!(json.0.status_code, 400),
            other => panic!("Expected InvalidFilter, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let (_app_data, api) = setup_api().await;

        let response = api
            .list(Query(Some("found".to_string())), Query(None))
            .await
            .unwrap();

        assert_eq!(response.count, 3);
        assert!(response.items.iter().all(|i| i.status == "found"));
    }

    #[tokio::test]
    async fn test_get_missing_item_is_404() {
        let (_app_data, api) = setup_api().await;

        let result = api.get(Path("missing".to_string())).await;

        match result {
            Err(ItemApiError::NotFound(json)) => assert_eq!(json.0.error, "not_found"),
            other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_create_requires_a_session() {
        let (_app_data, api) = setup_api().await;
        let anonymous = BearerAuth(Bearer {
            token: "nope".to_string(),
        });

        let result = api.create(anonymous, Json(report_request())).await;

        assert!(matches!(result, Err(ItemApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_create_returns_201_and_shows_in_mine() {
        let (app_data, api) = setup_api().await;
        let auth = signed_in(&app_data).await;

        let CreateItemResponse::Created(created) = api
            .create(
                BearerAuth(Bearer {
                    token: auth.0.token.clone(),
                }),
                Json(report_request()),
            )
            .await
            .unwrap();
        assert_eq!(created.name, "Red Umbrella");
        assert_eq!(created.status, "found");

        let mine = api.mine(auth, Query(None)).await.unwrap();
        assert_eq!(mine.count, 1);
        assert_eq!(mine.items[0].id, created.id);
    }

    #[tokio::test]
    async fn test_create_reports_every_invalid_field() {
        let (app_data, api) = setup_api().await;
        let auth = signed_in(&app_data).await;
        let request = CreateItemRequest {
            name: "X".to_string(),
            contact_email: "not-an-email".to_string(),
            ..report_request()
        };

        let result = api.create(auth, Json(request)).await;

        match result {
            Err(ItemApiError::Validation(json)) => {
                let fields: Vec<&str> = json.0.fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "contact_email"]);
            }
            other => panic!("Expected Validation, got {:?}", other.map(|_| ())),
        }
        assert_eq!(app_data.item_store.count_all().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let (app_data, api) = setup_api().await;
        let auth = signed_in(&app_data).await;

        let result = api
            .upload_image(auth, Query("exe".to_string()), Binary(vec![1, 2, 3]))
            .await;

        assert!(matches!(result, Err(ItemApiError::UnsupportedMediaType(_))));
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let (app_data, api) = setup_api().await;
        let auth = signed_in(&app_data).await;

        let response = api
            .upload_image(auth, Query("PNG".to_string()), Binary(vec![0x89, 0x50, 0x4e, 0x47]))
            .await
            .unwrap();

        assert!(response.url.starts_with("http://test.local/images/"));
        assert!(response.url.ends_with(".png"));
    }
}
