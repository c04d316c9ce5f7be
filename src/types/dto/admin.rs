use poem_openapi::Object;

/// Aggregate counts for the admin dashboard
#[derive(Object, Debug)]
pub struct OverviewResponse {
    /// Number of registered users
    pub total_users: u64,

    /// Number of reported items
    pub total_items: u64,

    /// Items reported in the last 7 days
    pub recent_items: u64,
}

/// Request to change a user's role
#[derive(Object, Debug)]
pub struct AssignRoleRequest {
    /// The user ID to change
    pub target_user_id: String,

    /// New role, "user" or "admin"
    pub role: String,
}

/// Response after changing a role
#[derive(Object, Debug)]
pub struct AssignRoleResponse {
    /// Whether the operation was successful
    pub success: bool,
    
    /// Human-readable message describing the result
    pub message: String,
}
