use std::sync::Arc;
use std::time::Duration;

use log::debug;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{KeyValueStore, Storage};

mod kv_repo;
mod migrate;

/// Preference store kept in the `kv_entries` table of one `SQLite` file.
///
/// Only bookmarks and the theme live here, so the pool stays small.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const MAX_CONNECTIONS: u32 = 2;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

impl SqliteRepository {
    /// Open the preference database at `database_url`.
    ///
    /// Every connection runs in WAL mode with a busy timeout so a second
    /// `mcq` process reading the same file waits instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the file cannot be opened or a pragma is
    /// rejected.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA journal_mode = WAL;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        debug!("[DB] Connected to {database_url}");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Bring `kv_entries` up to the current schema version.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if a migration statement fails.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Open and migrate the preference database, exposing it as `kv`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the database cannot be opened or
    /// migrated.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        let kv: Arc<dyn KeyValueStore> = Arc::new(repo);
        Ok(Self { kv })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_can_back_a_shared_kv_store() {
        fn assert_kv_store<T: KeyValueStore + Clone + 'static>() {}
        assert_kv_store::<SqliteRepository>();
    }

    #[tokio::test]
    async fn migrate_creates_the_kv_table() {
        let repo = SqliteRepository::connect("sqlite:file:memdb_kv_schema?mode=memory&cache=shared")
            .await
            .unwrap();
        repo.migrate().await.unwrap();

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(repo.pool())
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|(name,)| name.as_str()).collect();

        assert_eq!(names, vec!["kv_entries", "schema_migrations"]);
    }
}
