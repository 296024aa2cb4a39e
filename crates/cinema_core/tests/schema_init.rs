use cinema_core::{
    init_schema, init_schema_with, ConnectionProvider, DbConfig, DirResources, ResourceError,
    SqliteConnectionProvider,
};
use rusqlite::Connection;
use std::error::Error;

#[test]
fn init_creates_catalogue_tables() {
    let dir = tempfile::tempdir().unwrap();
    let provider = SqliteConnectionProvider::open_file(dir.path().join("cinema.db")).unwrap();

    init_schema(&provider).unwrap();

    let conn = provider.acquire_connection().unwrap();
    assert_table_exists(&conn, "actor");
    assert_table_exists(&conn, "movie");
    assert_table_exists(&conn, "actor_movie");
}

#[test]
fn init_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cinema.db");

    let provider = SqliteConnectionProvider::new(&DbConfig::file(&path)).unwrap();
    init_schema(&provider).unwrap();
    drop(provider);

    let provider = SqliteConnectionProvider::new(&DbConfig::file(&path)).unwrap();
    init_schema(&provider).unwrap();
    assert_table_exists(&provider.acquire_connection().unwrap(), "movie");
}

#[test]
fn init_with_missing_resource_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let provider = SqliteConnectionProvider::open_file(dir.path().join("cinema.db")).unwrap();
    let loader = DirResources::new(dir.path().join("resources"));

    let err = init_schema_with(&provider, &loader, "db/migration/missing.sql").unwrap_err();

    assert_eq!(
        err.to_string(),
        "Couldn't read resource db/migration/missing.sql"
    );
    let cause = err
        .source()
        .and_then(|cause| cause.downcast_ref::<ResourceError>())
        .unwrap();
    assert!(matches!(cause, ResourceError::NotFound(path) if path == "db/migration/missing.sql"));
}

#[test]
fn init_runs_script_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    let script_dir = dir.path().join("resources/db/migration");
    std::fs::create_dir_all(&script_dir).unwrap();
    std::fs::write(
        script_dir.join("extra.sql"),
        "CREATE TABLE IF NOT EXISTS studio (id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
    )
    .unwrap();

    let provider = SqliteConnectionProvider::open_file(dir.path().join("cinema.db")).unwrap();
    let loader = DirResources::new(dir.path().join("resources"));
    init_schema_with(&provider, &loader, "db/migration/extra.sql").unwrap();

    assert_table_exists(&provider.acquire_connection().unwrap(), "studio");
}

#[test]
fn init_with_broken_script_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.sql"), "CREATE TABLEE actor;").unwrap();

    let provider = SqliteConnectionProvider::open_file(dir.path().join("cinema.db")).unwrap();
    let loader = DirResources::new(dir.path());
    let err = init_schema_with(&provider, &loader, "broken.sql").unwrap_err();

    assert_eq!(err.to_string(), "Couldn't initialize schema from broken.sql");
    assert!(err.source().is_some());
}

#[test]
fn storage_rejects_link_rows_without_parents() {
    let dir = tempfile::tempdir().unwrap();
    let provider = SqliteConnectionProvider::open_file(dir.path().join("cinema.db")).unwrap();
    init_schema(&provider).unwrap();

    let conn = provider.acquire_connection().unwrap();
    let result = conn.execute(
        "INSERT INTO actor_movie (actor_id, movie_id) VALUES (?1, ?2);",
        [1_i64, 2_i64],
    );
    assert!(result.is_err());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
