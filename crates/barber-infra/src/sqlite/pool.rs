//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time, so every booking transaction is
//! serialized through the single-connection writer pool. Reads fan out over
//! a separate read-only pool.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: up to 8 read-only connections.
/// - `writer`: one connection for INSERT/UPDATE/DELETE and transactions.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open both pools and run the embedded migrations on the writer.
    ///
    /// Both pools use WAL journal mode, foreign key enforcement, and a
    /// 5-second busy timeout.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        // The reader is read-only, so the schema must exist before it opens.
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(read_opts)
            .await?;

        tracing::debug!(url = %database_url, "database pool ready");
        Ok(Self { reader, writer })
    }

    /// Run a trivial query on the reader pool.
    pub async fn ping(&self) -> Result<(), barber_types::error::RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.reader)
            .await
            .map_err(query_error)?;
        Ok(())
    }
}

/// Database URL for the given data directory.
///
/// `BARBER_DATABASE_URL` wins when set; otherwise `{data_dir}/barber.db`.
pub fn default_database_url(data_dir: &Path) -> String {
    if let Ok(url) = std::env::var("BARBER_DATABASE_URL") {
        return url;
    }
    format!("sqlite://{}?mode=rwc", data_dir.join("barber.db").display())
}

/// Map a sqlx error to a repository error, treating constraint violations
/// (unique keys, restricted foreign keys) as conflicts.
pub(crate) fn map_write_error(
    e: sqlx::Error,
    conflict: impl FnOnce() -> String,
) -> barber_types::error::RepositoryError {
    use barber_types::error::RepositoryError;

    if let sqlx::Error::Database(ref db_err) = e {
        let message = db_err.message();
        if message.contains("UNIQUE") || message.contains("FOREIGN KEY") {
            return RepositoryError::Conflict(conflict());
        }
    }
    RepositoryError::Query(e.to_string())
}

pub(crate) fn query_error(e: sqlx::Error) -> barber_types::error::RepositoryError {
    barber_types::error::RepositoryError::Query(e.to_string())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> DatabasePool {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    // Leak tempdir so it lives for the test
    std::mem::forget(dir);
    DatabasePool::new(&url).await.unwrap()
}
