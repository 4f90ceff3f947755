//! Create `counter` table.
//!
//! Holds at most one row: `id` is a primary key and the application only ever
//! writes id 1, so a second row cannot appear even under concurrent first writes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Counter::Table)
                    .if_not_exists()
                    .col(small_integer(Counter::Id).primary_key())
                    .col(integer(Counter::C).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Counter::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Counter { Table, Id, C }
