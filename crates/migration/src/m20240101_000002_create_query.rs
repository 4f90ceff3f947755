//! Create `query` table: append-only (name, age) records, duplicates allowed.
//!
//! The surrogate `id` exists for the ORM only; nothing reads it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Query::Table)
                    .if_not_exists()
                    .col(pk_auto(Query::Id))
                    .col(text(Query::Name).not_null())
                    .col(integer(Query::Age).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Query::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Query { Table, Id, Name, Age }
