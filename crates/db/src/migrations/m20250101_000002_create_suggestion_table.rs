//! Create suggestion table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Suggestion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Suggestion::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Suggestion::SuggesterName)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Suggestion::Title).string_len(512).not_null())
                    .col(
                        ColumnDef::new(Suggestion::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: created_at (first-suggester lookup scans in log order)
        manager
            .create_index(
                Index::create()
                    .name("idx_suggestion_created_at")
                    .table(Suggestion::Table)
                    .col(Suggestion::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Suggestion::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Suggestion {
    Table,
    Id,
    SuggesterName,
    Title,
    CreatedAt,
}
