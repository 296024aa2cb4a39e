//! SQLite storage bootstrap for the cinema catalogue.
//!
//! # Responsibility
//! - Hand out configured connections through `ConnectionProvider`.
//! - Load bundled SQL resources and create the catalogue schema.
//!
//! # Invariants
//! - Every acquired connection has `foreign_keys=ON`.
//! - DAO calls must not run before `init_schema` has succeeded once.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod config;
mod open;
pub mod resource;
pub mod schema;

pub use config::{DbConfig, DbLocation, DEFAULT_DB_NAME};
pub use open::SqliteConnectionProvider;
pub use schema::{init_schema, init_schema_with};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    InvalidConfig(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::InvalidConfig(message) => write!(f, "invalid database config: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Source of short-lived database connections.
///
/// Each DAO call acquires one connection and drops it before returning.
/// Implementations shared across threads must be `Sync` themselves.
pub trait ConnectionProvider {
    fn acquire_connection(&self) -> DbResult<Connection>;
}
