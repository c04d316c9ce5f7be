// Database entities - SeaORM models
pub mod item;
pub mod refresh_token;
pub mod user;
