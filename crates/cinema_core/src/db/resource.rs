//! Text resources used by the storage bootstrap.
//!
//! # Responsibility
//! - Resolve logical resource paths such as
//!   `db/migration/db_initialization.sql` to their text content.
//!
//! # Invariants
//! - Resource paths are relative and never escape the loader root.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Logical path of the catalogue DDL script.
pub const SCHEMA_SCRIPT_PATH: &str = "db/migration/db_initialization.sql";

const BUNDLED: &[(&str, &str)] = &[(
    SCHEMA_SCRIPT_PATH,
    include_str!("sql/db_initialization.sql"),
)];

#[derive(Debug)]
pub enum ResourceError {
    NotFound(String),
    InvalidPath(String),
    Io { path: String, source: io::Error },
}

impl Display for ResourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "resource not found: {path}"),
            Self::InvalidPath(path) => write!(f, "invalid resource path: {path}"),
            Self::Io { path, source } => write!(f, "cannot read resource {path}: {source}"),
        }
    }
}

impl Error for ResourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) | Self::InvalidPath(_) => None,
        }
    }
}

/// Reads whole text resources by logical path.
pub trait ResourceLoader {
    fn read_text_resource(&self, path: &str) -> Result<String, ResourceError>;
}

/// Resources compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

impl ResourceLoader for BundledResources {
    fn read_text_resource(&self, path: &str) -> Result<String, ResourceError> {
        BUNDLED
            .iter()
            .find(|(bundled_path, _)| *bundled_path == path)
            .map(|(_, content)| (*content).to_string())
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }
}

/// Resources read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirResources {
    root: PathBuf,
}

impl DirResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLoader for DirResources {
    fn read_text_resource(&self, path: &str) -> Result<String, ResourceError> {
        let relative = Path::new(path);
        let escapes_root = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)));
        if path.is_empty() || escapes_root {
            return Err(ResourceError::InvalidPath(path.to_string()));
        }

        let full_path = self.root.join(relative);
        std::fs::read_to_string(&full_path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ResourceError::NotFound(path.to_string()),
            _ => ResourceError::Io {
                path: path.to_string(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BundledResources, DirResources, ResourceError, ResourceLoader, SCHEMA_SCRIPT_PATH};

    #[test]
    fn bundled_schema_script_creates_all_tables() {
        let script = BundledResources.read_text_resource(SCHEMA_SCRIPT_PATH).unwrap();
        for table in ["actor", "movie", "actor_movie"] {
            assert!(script.contains(&format!("CREATE TABLE IF NOT EXISTS {table} (")));
        }
    }

    #[test]
    fn bundled_unknown_path_is_not_found() {
        let err = BundledResources.read_text_resource("db/missing.sql").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(path) if path == "db/missing.sql"));
    }

    #[test]
    fn dir_loader_rejects_parent_components() {
        let loader = DirResources::new(std::env::temp_dir());
        let err = loader.read_text_resource("../etc/passwd").unwrap_err();
        assert!(matches!(err, ResourceError::InvalidPath(_)));
    }
}
