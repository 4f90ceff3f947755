#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use tokio::sync::{Mutex, MutexGuard, OnceCell};

// Ensure migrations run only once across the entire test process.
// Holds the reason the database is unusable, if any.
static MIGRATED: OnceCell<Result<(), String>> = OnceCell::const_new();

// Tests share the two tables; hold this while touching them
static DB_LOCK: Mutex<()> = Mutex::const_new(());

fn explicit_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

fn test_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig::default();
    if let Some(url) = explicit_url() {
        cfg.url = url;
    }
    cfg.max_connections = 20;
    cfg.connect_timeout_secs = 3;
    cfg.acquire_timeout_secs = 10;
    cfg
}

/// Report a database test that cannot run. An explicitly configured
/// `DATABASE_URL` must be reachable, so that case panics instead of skipping.
fn unavailable(test: &str, reason: &str, explicit: bool) -> Option<DatabaseConnection> {
    if explicit {
        panic!("{test}: DATABASE_URL is set but unusable: {reason}");
    }
    eprintln!("SKIPPED {test}: {reason}");
    None
}

async fn migrate_once() -> Result<(), String> {
    let db = connect_with_config(&test_config())
        .await
        .map_err(|e| format!("cannot connect to db: {e}"))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| format!("migrate up failed: {e}"))
}

/// A migrated connection for `test`.
///
/// Returns `None` (and prints a `SKIPPED <test>` line) when `SKIP_DB_TESTS` is set
/// or the default local database is unreachable. Panics when `DATABASE_URL` is set
/// and the database behind it cannot be used.
pub async fn get_db(test: &str) -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return unavailable(test, "SKIP_DB_TESTS is set", false);
    }
    let explicit = explicit_url().is_some();
    if let Err(reason) = MIGRATED.get_or_init(migrate_once).await {
        return unavailable(test, reason, explicit);
    }

    // Return a fresh connection for the current test's runtime
    match connect_with_config(&test_config()).await {
        Ok(db) => Some(db),
        Err(e) => unavailable(test, &format!("cannot connect to db: {e}"), explicit),
    }
}

pub async fn db_lock() -> MutexGuard<'static, ()> {
    DB_LOCK.lock().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_default_database_skips() {
        assert!(unavailable("some_test", "cannot connect to db", false).is_none());
    }

    #[test]
    #[should_panic(expected = "DATABASE_URL is set but unusable")]
    fn unreachable_explicit_database_fails() {
        unavailable("some_test", "cannot connect to db", true);
    }
}
