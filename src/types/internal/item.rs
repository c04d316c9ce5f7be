use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::types::db;

/// Categories offered by the report form. Storage accepts any string.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "electronics",
    "keys",
    "clothing",
    "jewelry",
    "pets",
    "documents",
    "bags",
    "accessories",
    "other",
];

/// Whether an item was lost or found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Lost,
    Found,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Lost => "lost",
            ItemStatus::Found => "found",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lost" => Ok(ItemStatus::Lost),
            "found" => Ok(ItemStatus::Found),
            other => Err(format!("expected 'lost' or 'found', got '{}'", other)),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lost-or-found report as read back from the item store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub status: ItemStatus,
    pub name: String,
    pub category: String,
    pub location: String,
    pub occurred_on: String,
    pub occurred_time: Option<String>,
    pub image_url: Option<String>,
    pub description: String,
    pub user_id: Option<String>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub created_at: i64,
}

impl TryFrom<db::item::Model> for ItemRecord {
    type Error = InternalError;

    fn try_from(model: db::item::Model) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse::<ItemStatus>()
            .map_err(|e| InternalError::parse("item_status", e))?;

        Ok(Self {
            id: model.id,
            status,
            name: model.name,
            category: model.category,
            location: model.location,
            occurred_on: model.occurred_on,
            occurred_time: model.occurred_time,
            image_url: model.image_url,
            description: model.description,
            user_id: model.user_id,
            contact_name: model.contact_name,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            created_at: model.created_at,
        })
    }
}

/// Raw report form input, before validation
#[derive(Debug, Clone, Default)]
pub struct ReportForm {
    pub status: String,
    pub name: String,
    pub category: String,
    pub occurred_on: String,
    pub occurred_time: Option<String>,
    pub location: String,
    pub description: String,
    pub image_url: Option<String>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

/// A validated report, ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub status: ItemStatus,
    pub name: String,
    pub category: String,
    pub location: String,
    pub occurred_on: String,
    pub occurred_time: Option<String>,
    pub image_url: Option<String>,
    pub description: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
}
