use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    QueryFilter, Set, Statement,
};

use models::counter::{self, SINGLETON_ID};

use crate::counter::repository::CounterStore;
use crate::errors::StoreError;

// Row lock on the conflicting key serializes concurrent increments.
const INCREMENT_SQL: &str = "INSERT INTO counter (id, c) VALUES ($1, 1) \
     ON CONFLICT (id) DO UPDATE SET c = counter.c + 1 RETURNING c";

/// Postgres-backed counter. Every operation targets row `SINGLETON_ID`.
pub struct SeaOrmCounterStore {
    pub db: DatabaseConnection,
}

impl SeaOrmCounterStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CounterStore for SeaOrmCounterStore {
    async fn read_value(&self) -> Result<i32, StoreError> {
        counter::Entity::find_by_id(SINGLETON_ID)
            .one(&self.db)
            .await?
            .map(|row| row.c)
            .ok_or(StoreError::NotFound("counter"))
    }

    async fn insert_value(&self, value: i32) -> Result<(), StoreError> {
        let am = counter::ActiveModel { id: Set(SINGLETON_ID), c: Set(value) };
        am.insert(&self.db).await?;
        Ok(())
    }

    async fn set_value(&self, value: i32) -> Result<(), StoreError> {
        let res = counter::Entity::update_many()
            .col_expr(counter::Column::C, Expr::value(value))
            .filter(counter::Column::Id.eq(SINGLETON_ID))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound("counter"));
        }
        Ok(())
    }

    async fn increment(&self) -> Result<i32, StoreError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            INCREMENT_SQL,
            [SINGLETON_ID.into()],
        );
        let row = self
            .db
            .query_one(stmt)
            .await?
            .ok_or_else(|| StoreError::Query("increment returned no row".into()))?;
        Ok(row.try_get::<i32>("", "c")?)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        counter::Entity::delete_many().exec(&self.db).await?;
        Ok(())
    }
}
