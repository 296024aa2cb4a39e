//! Database location settings loaded from the environment.
//!
//! # Invariants
//! - `name` is never empty.
//! - Relative file paths are resolved by SQLite against the process cwd.

use super::{DbError, DbResult};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_NAME: &str = "cinema_db";

const ENV_DB_NAME: &str = "CINEMA_DB_NAME";
const ENV_DB_PATH: &str = "CINEMA_DB_PATH";
const ENV_DB_MEMORY: &str = "CINEMA_DB_MEMORY";

/// Where the catalogue database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// On-disk database file.
    File(PathBuf),
    /// Named in-memory database shared by every connection of one provider.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub name: String,
    pub location: DbLocation,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::in_memory(DEFAULT_DB_NAME)
    }
}

impl DbConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            name: DEFAULT_DB_NAME.to_string(),
            location: DbLocation::File(path.into()),
        }
    }

    pub fn in_memory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: DbLocation::Memory,
        }
    }

    /// Loads settings from process environment, reading `.env` first if present.
    ///
    /// - `CINEMA_DB_NAME` defaults to `cinema_db`.
    /// - `CINEMA_DB_MEMORY=true` selects an in-memory database.
    /// - Otherwise `CINEMA_DB_PATH` is used, defaulting to `<name>.db`.
    pub fn from_env() -> DbResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> DbResult<Self> {
        let name = lookup(ENV_DB_NAME)
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
        if name.is_empty() {
            return Err(DbError::InvalidConfig(format!("{ENV_DB_NAME} cannot be empty")));
        }
        validate_db_name(&name)?;

        let in_memory = match lookup(ENV_DB_MEMORY) {
            Some(value) => parse_flag(ENV_DB_MEMORY, &value)?,
            None => false,
        };
        if in_memory {
            return Ok(Self::in_memory(name));
        }

        let path = lookup(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{name}.db")));
        Ok(Self {
            name,
            location: DbLocation::File(path),
        })
    }
}

/// Accepts names made of ASCII letters, digits, `_`, `-` and `.`.
///
/// The name ends up inside a SQLite URI, where `?`, `#`, `&` or `/` would
/// change which database is opened.
pub(crate) fn validate_db_name(name: &str) -> DbResult<&str> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    if !valid {
        return Err(DbError::InvalidConfig(format!(
            "database name `{name}` may only contain ASCII letters, digits, `_`, `-` and `.`"
        )));
    }
    Ok(name)
}

fn parse_flag(key: &str, value: &str) -> DbResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(DbError::InvalidConfig(format!(
            "{key} must be a boolean flag, got `{other}`"
        ))),
    }
}
