use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use models::query;

use crate::errors::StoreError;
use crate::records::repository::{Record, RecordStore};

pub struct SeaOrmRecordStore {
    pub db: DatabaseConnection,
}

impl SeaOrmRecordStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl RecordStore for SeaOrmRecordStore {
    async fn read_random(&self) -> Result<Record, StoreError> {
        let row = query::Entity::find()
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound("record"))?;
        Ok(Record { name: row.name, age: row.age })
    }

    async fn insert(&self, name: &str, age: i32) -> Result<(), StoreError> {
        let am = query::ActiveModel {
            name: Set(name.to_string()),
            age: Set(age),
            ..Default::default()
        };
        am.insert(&self.db).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        query::Entity::delete_many().exec(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{db_lock, get_db};
    use std::collections::HashSet;

    #[tokio::test]
    async fn append_then_read_back() -> anyhow::Result<()> {
        let Some(db) = get_db("append_then_read_back").await else { return Ok(()) };
        let _guard = db_lock().await;
        let store = SeaOrmRecordStore::new(db);

        store.clear().await?;
        assert!(store.read_random().await.unwrap_err().is_not_found());
        store.insert("Ann", 30).await?;
        assert_eq!(store.read_random().await?, Record::new("Ann", 30));
        Ok(())
    }

    #[tokio::test]
    async fn duplicates_and_clear() -> anyhow::Result<()> {
        let Some(db) = get_db("duplicates_and_clear").await else { return Ok(()) };
        let _guard = db_lock().await;
        let store = SeaOrmRecordStore::new(db);

        store.clear().await?;
        store.insert("Guest", 0).await?;
        store.insert("Guest", 0).await?;
        store.insert("Bob", 41).await?;
        let mut seen = HashSet::new();
        for _ in 0..60 {
            seen.insert(store.read_random().await?.name);
        }
        assert_eq!(seen.len(), 2);

        store.clear().await?;
        store.clear().await?;
        assert!(store.read_random().await.unwrap_err().is_not_found());
        Ok(())
    }
}
