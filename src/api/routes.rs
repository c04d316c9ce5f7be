use std::sync::Arc;

use poem::{Endpoint, EndpointExt, Route, endpoint::StaticFilesEndpoint};
use poem_openapi::OpenApiService;

use crate::api::upload_limit::ImageUploadLimit;
use crate::api::{AdminApi, AuthApi, HealthApi, ItemsApi};
use crate::app_data::AppData;
use crate::config::BootstrapSettings;
use crate::coordinators::{AdminCoordinator, AuthCoordinator, ItemCoordinator};
use crate::services::image_storage::MAX_IMAGE_BYTES;

/// Path of the image upload operation once nested under `/api`
pub const IMAGE_UPLOAD_PATH: &str = "/api/images";

/// Builds the full HTTP application
///
/// API under /api, Swagger UI under /swagger, uploaded files under /images.
pub fn build_routes(app_data: Arc<AppData>, settings: &BootstrapSettings) -> impl Endpoint + use<> {
    let auth = Arc::new(AuthCoordinator::new(app_data.clone()));
    let items = Arc::new(ItemCoordinator::new(app_data.clone()));
    let admin = Arc::new(AdminCoordinator::new(app_data));

    let apis = (
        HealthApi,
        AuthApi::new(auth.clone()),
        ItemsApi::new(auth.clone(), items),
        AdminApi::new(auth, admin),
    );

    let api_service = OpenApiService::new(apis, "Lost & Found API", env!("CARGO_PKG_VERSION"))
        .server(format!("{}/api", settings.public_base_url()));

    // Generate Swagger UI from OpenAPI service
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .nest("/images", StaticFilesEndpoint::new(settings.image_dir()))
        .with(ImageUploadLimit::new(IMAGE_UPLOAD_PATH, MAX_IMAGE_BYTES))
}
