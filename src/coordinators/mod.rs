// Coordinators layer - Workflow orchestration
//
// Coordinators compose store and service operations for specific API
// endpoints. They decide the sequence of operations; the rules themselves
// live in services and stores.

pub mod admin_coordinator;
pub mod auth_coordinator;
pub mod item_coordinator;

pub use admin_coordinator::AdminCoordinator;
pub use auth_coordinator::{AuthCoordinator, IssuedTokens};
pub use item_coordinator::ItemCoordinator;
