//! Initial schema: lures, lure_views and admins.
//!
//! `lure_views.lure_id` is nullable with ON DELETE SET NULL so captured
//! views outlive the lure that produced them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lures::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lures::Path).string().not_null())
                    .col(ColumnDef::new(Lures::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(Lures::TextContent).text().null())
                    .col(ColumnDef::new(Lures::ImageContent).text().null())
                    .col(
                        ColumnDef::new(Lures::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lures_path")
                    .table(Lures::Table)
                    .col(Lures::Path)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LureViews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LureViews::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LureViews::LureId).string_len(36).null())
                    .col(ColumnDef::new(LureViews::Ip).string_len(45).not_null())
                    .col(ColumnDef::new(LureViews::UserAgent).text().not_null())
                    .col(ColumnDef::new(LureViews::Location).string().null())
                    .col(ColumnDef::new(LureViews::Photo).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lure_views_lure_id")
                            .from(LureViews::Table, LureViews::LureId)
                            .to(Lures::Table, Lures::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lure_views_lure_id")
                    .table(LureViews::Table)
                    .col(LureViews::LureId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Admins::Name).string().not_null())
                    .col(ColumnDef::new(Admins::Email).string().not_null())
                    .col(ColumnDef::new(Admins::Password).string().not_null())
                    .col(
                        ColumnDef::new(Admins::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admins_email")
                    .table(Admins::Table)
                    .col(Admins::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_admins_email").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_lure_views_lure_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LureViews::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_lures_path").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lures::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Lures {
    Table,
    Id,
    Path,
    Kind,
    TextContent,
    ImageContent,
    CreatedAt,
}

#[derive(DeriveIden)]
enum LureViews {
    Table,
    Id,
    LureId,
    Ip,
    UserAgent,
    Location,
    Photo,
}

#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
    Name,
    Email,
    Password,
    UpdatedAt,
}
