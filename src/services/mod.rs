// Services layer - Business logic without persistence
pub mod crypto;
pub mod image_storage;
pub mod item_feed;
pub mod password_validator;
pub mod report_validator;
pub mod search;
pub mod session_hub;
pub mod token_service;

pub use image_storage::{ImageStorage, LocalImageStorage};
pub use item_feed::ItemFeed;
pub use password_validator::PasswordValidator;
pub use report_validator::ReportValidator;
pub use session_hub::SessionHub;
pub use token_service::TokenService;
