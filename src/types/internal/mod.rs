// Internal domain types - never serialized over the API directly
pub mod admin;
pub mod auth;
pub mod item;
pub mod search;
pub mod session;
