use poem_openapi::Object;

use crate::types::internal::item::{ItemRecord, ReportForm};

/// Request model for reporting a lost or found item
#[derive(Object, Debug, Clone)]
pub struct CreateItemRequest {
    /// "lost" or "found"
    pub status: String,

    /// Short name of the item (at least 2 characters)
    pub name: String,

    /// Category, e.g. "electronics" or "keys"
    pub category: String,

    /// Date the item was lost or found (YYYY-MM-DD)
    pub occurred_on: String,

    /// Optional time of day
    pub occurred_time: Option<String>,

    /// Where it was lost or found (at least 5 characters)
    pub location: String,

    /// Description (at least 10 characters)
    pub description: String,

    /// URL returned by the image upload endpoint
    pub image_url: Option<String>,

    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

impl From<CreateItemRequest> for ReportForm {
    fn from(req: CreateItemRequest) -> Self {
        Self {
            status: req.status,
            name: req.name,
            category: req.category,
            occurred_on: req.occurred_on,
            occurred_time: req.occurred_time,
            location: req.location,
            description: req.description,
            image_url: req.image_url,
            contact_name: req.contact_name,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
        }
    }
}

/// Response model representing an item
#[derive(Object, Debug, Clone, PartialEq)]
pub struct ItemResponse {
    /// Unique identifier for the item
    pub id: String,
    pub status: String,
    pub name: String,
    pub category: String,
    pub location: String,

    /// Date the item was lost or found
    pub occurred_on: String,
    pub occurred_time: Option<String>,
    pub image_url: Option<String>,
    pub description: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,

    /// Timestamp when the item was reported (ISO 8601 format)
    pub created_at: String,
}

impl From<ItemRecord> for ItemResponse {
    fn from(record: ItemRecord) -> Self {
        let created_at = chrono::DateTime::from_timestamp(record.created_at, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();

        Self {
            id: record.id,
            status: record.status.as_str().to_string(),
            name: record.name,
            category: record.category,
            location: record.location,
            occurred_on: record.occurred_on,
            occurred_time: record.occurred_time,
            image_url: record.image_url,
            description: record.description,
            contact_name: record.contact_name,
            contact_email: record.contact_email,
            contact_phone: record.contact_phone,
            created_at,
        }
    }
}

/// A page of items, newest first
#[derive(Object, Debug)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
    pub count: u64,
}

/// Outcome of a search
#[derive(Object, Debug)]
pub struct SearchResponse {
    /// "not_searched", "no_results" or "results"
    pub state: String,

    /// Number of matching items
    pub count: u64,

    /// Matching items in the requested order
    pub items: Vec<ItemResponse>,
}

/// Server-sent change notification
#[derive(Object, Debug, Clone)]
pub struct ItemEvent {
    /// Always "inserted"
    pub kind: String,
    pub item: ItemResponse,
}

impl ItemEvent {
    pub fn inserted(record: ItemRecord) -> Self {
        Self {
            kind: "inserted".to_string(),
            item: record.into(),
        }
    }
}

/// Where an uploaded image can be fetched from
#[derive(Object, Debug)]
pub struct ImageUploadResponse {
    /// Public URL to place in the report's image_url
    pub url: String,
}
