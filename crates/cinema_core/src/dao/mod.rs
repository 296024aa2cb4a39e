//! Data access objects for actors and movies.
//!
//! # Responsibility
//! - Keep SQL statements and row mapping behind per-entity contracts.
//! - Check link references in application code before inserting.
//!
//! # Invariants
//! - Every DAO call acquires its own connection and drops it on all paths.
//! - Business-rule failures propagate unchanged; storage failures are
//!   wrapped with the operation and key arguments.

use crate::error::{DaoError, DaoResult};
use rusqlite::Connection;

pub mod actor_dao;
pub mod movie_dao;

const NOTHING_CHANGED: &str = "Nothing has been changed";

fn ensure_changed(changed: usize) -> DaoResult<()> {
    if changed == 0 {
        return Err(DaoError::new(NOTHING_CHANGED));
    }
    Ok(())
}

/// Reads the rowid assigned by the last successful insert on `conn`.
fn generated_id(conn: &Connection, entity: &str) -> DaoResult<i64> {
    match conn.last_insert_rowid() {
        0 => Err(DaoError::new(format!("Can not obtain {entity} ID"))),
        id => Ok(id),
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_changed, generated_id};
    use rusqlite::Connection;

    #[test]
    fn zero_changed_rows_is_an_error() {
        let err = ensure_changed(0).unwrap_err();
        assert_eq!(err.to_string(), "Nothing has been changed");
        assert!(ensure_changed(1).is_ok());
    }

    #[test]
    fn generated_id_requires_a_prior_insert() {
        let conn = Connection::open_in_memory().unwrap();
        let err = generated_id(&conn, "movie").unwrap_err();
        assert_eq!(err.to_string(), "Can not obtain movie ID");

        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY); INSERT INTO t DEFAULT VALUES;")
            .unwrap();
        assert_eq!(generated_id(&conn, "movie").unwrap(), 1);
    }
}
