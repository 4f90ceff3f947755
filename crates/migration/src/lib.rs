//! Migrator creating the two flat tables the services read and write.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_counter;
mod m20240101_000002_create_query;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_counter::Migration),
            Box::new(m20240101_000002_create_query::Migration),
        ]
    }
}
