//! Data-access layer for a small actor/movie catalogue.
//! Both DAOs run plain SQL over SQLite connections handed out by a
//! `ConnectionProvider`.

pub mod dao;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;

pub use dao::actor_dao::{verify_actor_id, ActorDao, SqliteActorDao};
pub use dao::movie_dao::{verify_movie_id, MovieDao, SqliteMovieDao};
pub use db::resource::{BundledResources, DirResources, ResourceError, ResourceLoader};
pub use db::{
    init_schema, init_schema_with, ConnectionProvider, DbConfig, DbError, DbLocation, DbResult,
    SqliteConnectionProvider,
};
pub use error::{DaoError, DaoResult};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::actor::{Actor, ActorId, ActorValidationError};
pub use model::movie::{Movie, MovieId, MovieValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
