//! SQLite connection provider.
//!
//! # Responsibility
//! - Open file or shared in-memory SQLite connections on demand.
//! - Configure connection pragmas required by the DAO layer.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - A shared in-memory database lives as long as its provider.

use super::config::validate_db_name;
use super::{ConnectionProvider, DbConfig, DbLocation, DbResult};
use log::{debug, error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
enum Target {
    File(PathBuf),
    SharedMemory(String),
}

/// Connection provider backed by SQLite.
pub struct SqliteConnectionProvider {
    target: Target,
    // Keeps a shared in-memory database alive between acquisitions.
    _anchor: Option<Mutex<Connection>>,
}

impl SqliteConnectionProvider {
    /// Builds a provider and opens one connection up front to fail fast.
    ///
    /// # Side effects
    /// - Creates the database file when it does not exist.
    /// - Emits `db_open` logging events with duration and status.
    pub fn new(config: &DbConfig) -> DbResult<Self> {
        match &config.location {
            DbLocation::File(path) => Self::open_file(path.clone()),
            DbLocation::Memory => Self::open_shared_memory(&config.name),
        }
    }

    pub fn open_file(path: impl Into<PathBuf>) -> DbResult<Self> {
        let provider = Self {
            target: Target::File(path.into()),
            _anchor: None,
        };
        drop(provider.open_logged("file")?);
        Ok(provider)
    }

    /// Opens a named in-memory database visible to every connection this
    /// provider hands out.
    ///
    /// Uses the `memdb` VFS so concurrent connections take ordinary database
    /// locks and wait out conflicts through the busy timeout.
    pub fn open_shared_memory(name: &str) -> DbResult<Self> {
        let name = validate_db_name(name)?;
        let mut provider = Self {
            target: Target::SharedMemory(format!("file:/{name}?vfs=memdb")),
            _anchor: None,
        };
        let anchor = provider.open_logged("memory")?;
        provider._anchor = Some(Mutex::new(anchor));
        Ok(provider)
    }

    fn open_logged(&self, mode: &str) -> DbResult<Connection> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start mode={mode}");

        match self.open_configured() {
            Ok(conn) => {
                info!(
                    "event=db_open module=db status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(conn)
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn open_configured(&self) -> DbResult<Connection> {
        let conn = match &self.target {
            Target::File(path) => Connection::open(path)?,
            Target::SharedMemory(uri) => Connection::open_with_flags(
                uri,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?,
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

impl ConnectionProvider for SqliteConnectionProvider {
    fn acquire_connection(&self) -> DbResult<Connection> {
        let conn = self.open_configured().inspect_err(|err| {
            error!("event=db_acquire module=db status=error error={err}");
        })?;
        debug!("event=db_acquire module=db status=ok");
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteConnectionProvider;
    use crate::db::ConnectionProvider;

    #[test]
    fn acquired_connections_enforce_foreign_keys() {
        let provider = SqliteConnectionProvider::open_shared_memory("open_rs_foreign_keys").unwrap();
        let conn = provider.acquire_connection().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn shared_memory_rejects_names_that_alter_the_uri() {
        for name in ["cinema?mode=ro", "cinema#x", "a&vfs=unix", "../cinema", ""] {
            assert!(
                SqliteConnectionProvider::open_shared_memory(name).is_err(),
                "name `{name}` should be rejected"
            );
        }
    }

    #[test]
    fn provider_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteConnectionProvider>();
    }
}
