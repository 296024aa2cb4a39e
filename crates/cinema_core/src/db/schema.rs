//! Catalogue schema initializer.
//!
//! # Responsibility
//! - Read the DDL script and run it as one batch.
//!
//! # Invariants
//! - The bundled script only uses `IF NOT EXISTS`, so repeated runs are safe.
//! - No retry; callers run this once at startup.

use super::resource::{BundledResources, ResourceLoader, SCHEMA_SCRIPT_PATH};
use super::ConnectionProvider;
use crate::error::{DaoError, DaoResult};
use log::{error, info};
use std::time::Instant;

/// Creates `actor`, `movie` and `actor_movie` using the bundled script.
pub fn init_schema<P>(provider: &P) -> DaoResult<()>
where
    P: ConnectionProvider + ?Sized,
{
    init_schema_with(provider, &BundledResources, SCHEMA_SCRIPT_PATH)
}

/// Runs the SQL script at `path`, resolved through `loader`.
///
/// # Errors
/// - Resource lookup or read failures, with the path in the message.
/// - Connection or statement failures while executing the batch.
pub fn init_schema_with<P, L>(provider: &P, loader: &L, path: &str) -> DaoResult<()>
where
    P: ConnectionProvider + ?Sized,
    L: ResourceLoader + ?Sized,
{
    let started_at = Instant::now();
    info!("event=schema_init module=db status=start path={path}");

    let result = run_script(provider, loader, path);
    match &result {
        Ok(()) => info!(
            "event=schema_init module=db status=ok path={path} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=schema_init module=db status=error path={path} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}

fn run_script<P, L>(provider: &P, loader: &L, path: &str) -> DaoResult<()>
where
    P: ConnectionProvider + ?Sized,
    L: ResourceLoader + ?Sized,
{
    let script = loader
        .read_text_resource(path)
        .map_err(|err| DaoError::with_source(format!("Couldn't read resource {path}"), err))?;

    let conn = provider.acquire_connection().map_err(|err| {
        DaoError::with_source(format!("Couldn't initialize schema from {path}"), err)
    })?;
    conn.execute_batch(&script).map_err(|err| {
        DaoError::with_source(format!("Couldn't initialize schema from {path}"), err)
    })
}
