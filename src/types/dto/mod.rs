// Request and response models exposed through the OpenAPI surface
pub mod admin;
pub mod auth;
pub mod common;
pub mod items;
