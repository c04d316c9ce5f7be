use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Items reference their reporter loosely: anonymous rows from imports keep a NULL user_id
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Items::Status).string().not_null())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::Category).string().not_null())
                    .col(ColumnDef::new(Items::Location).string().not_null())
                    .col(ColumnDef::new(Items::OccurredOn).string().not_null())
                    .col(ColumnDef::new(Items::OccurredTime).string().null())
                    .col(ColumnDef::new(Items::ImageUrl).string().null())
                    .col(ColumnDef::new(Items::Description).text().not_null())
                    .col(ColumnDef::new(Items::UserId).string().null())
                    .col(ColumnDef::new(Items::ContactName).string().not_null())
                    .col(ColumnDef::new(Items::ContactEmail).string().not_null())
                    .col(ColumnDef::new(Items::ContactPhone).string().null())
                    .col(ColumnDef::new(Items::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_status_created_at")
                    .table(Items::Table)
                    .col(Items::Status)
                    .col(Items::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_user_id")
                    .table(Items::Table)
                    .col(Items::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    Status,
    Name,
    Category,
    Location,
    OccurredOn,
    OccurredTime,
    ImageUrl,
    Description,
    UserId,
    ContactName,
    ContactEmail,
    ContactPhone,
    CreatedAt,
}
