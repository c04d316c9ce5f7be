// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod health;
pub mod items;
pub mod routes;
pub mod upload_limit;

pub use admin::AdminApi;
pub use auth::{AuthApi, BearerAuth};
pub use health::HealthApi;
pub use items::ItemsApi;
pub use routes::build_routes;
pub use upload_limit::ImageUploadLimit;
