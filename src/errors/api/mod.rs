// API-facing error types
pub mod admin;
pub mod auth;
pub mod items;

// Re-exports for convenience
pub use admin::AdminError;
pub use auth::AuthError;
pub use items::ItemApiError;

#[cfg(test)]
mod admin_test;
#[cfg(test)]
mod items_test;
