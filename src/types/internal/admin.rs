/// Counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminOverview {
    pub total_users: u64,
    pub total_items: u64,
    /// Items created within the recent window (7 days)
    pub recent_items: u64,
}
