use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use configs::{AppConfig, DatabaseConfig, ServiceKind};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::{counter::SeaOrmCounterStore, records::SeaOrmRecordStore};
use tracing::info;

use crate::routes::{
    counter::{self, CounterState},
    records::{self, RecordState},
};

/// Open the database pool. Failure here is fatal for the process.
async fn open_store(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = models::db::connect_with_config(cfg)
        .await
        .context("cannot open database connection")?;
    if cfg.auto_migrate {
        migration::Migrator::up(&db, None).await.context("schema bootstrap failed")?;
        info!(event = "schema_ready", "counter and query tables ensured");
    }
    Ok(db)
}

/// Bind `addr` and serve `app` until the listener fails.
pub async fn serve(kind: ServiceKind, addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!(service = kind.name(), %addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Counter service entry: store, handlers, listener.
pub async fn run_counter(cfg: AppConfig, addr: SocketAddr) -> anyhow::Result<()> {
    let db = open_store(&cfg.database).await?;
    let state = CounterState::new(Arc::new(SeaOrmCounterStore::new(db)), cfg.reads.on_failure);
    info!(on_read_failure = ?cfg.reads.on_failure, "counter handlers ready");
    serve(ServiceKind::Counter, addr, counter::build_router(state)).await
}

/// Record service entry: store, handlers, listener.
pub async fn run_records(cfg: AppConfig, addr: SocketAddr) -> anyhow::Result<()> {
    let db = open_store(&cfg.database).await?;
    let state = RecordState::new(Arc::new(SeaOrmRecordStore::new(db)));
    serve(ServiceKind::Records, addr, records::build_router(state)).await
}
