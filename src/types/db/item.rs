use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub status: String,
    pub name: String,
    pub category: String,
    pub location: String,
    /// Calendar date of the loss or find, stored as `YYYY-MM-DD`
    pub occurred_on: String,
    pub occurred_time: Option<String>,
    pub image_url: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub user_id: Option<String>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
