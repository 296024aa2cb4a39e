//! Movie DAO contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and query `Movie` rows by id, name, actor, or in full.
//!
//! # Invariants
//! - `find_by_name` fails on zero matches; `find_all` and
//!   `find_by_actor_first_and_last_name` return an empty list instead.
//! - List results keep the order rows come back from storage.

use super::{ensure_changed, generated_id};
use crate::db::ConnectionProvider;
use crate::error::{DaoError, DaoResult};
use crate::model::movie::{Movie, MovieId};
use log::info;
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;

const INSERT_MOVIE_SQL: &str =
    "INSERT INTO movie (name, duration, release_date) VALUES (?1, ?2, ?3);";

const MOVIE_SELECT_SQL: &str = "SELECT
    id,
    name,
    duration,
    release_date
FROM movie";

const SELECT_MOVIES_BY_ACTOR_NAME_SQL: &str = "SELECT DISTINCT
    m.id AS id,
    m.name AS name,
    m.duration AS duration,
    m.release_date AS release_date
FROM movie m
INNER JOIN actor_movie am ON am.movie_id = m.id
INNER JOIN actor a ON a.id = am.actor_id
WHERE a.first_name = ?1
  AND a.last_name = ?2;";

type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Persistence operations for movies.
pub trait MovieDao {
    /// Inserts a new movie and assigns its generated id.
    fn save(&self, movie: &mut Movie) -> DaoResult<()>;
    /// Loads one movie, failing when the id is unknown.
    fn find_by_id(&self, id: MovieId) -> DaoResult<Movie>;
    /// Returns every movie with exactly this name; fails when there is none.
    fn find_by_name(&self, name: &str) -> DaoResult<Vec<Movie>>;
    fn find_all(&self) -> DaoResult<Vec<Movie>>;
    /// Returns movies linked to any actor with both names.
    fn find_by_actor_first_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> DaoResult<Vec<Movie>>;
}

/// SQLite-backed movie DAO.
pub struct SqliteMovieDao<'p, P: ?Sized> {
    provider: &'p P,
}

impl<'p, P: ConnectionProvider + ?Sized> SqliteMovieDao<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    fn connection(&self, context: impl FnOnce() -> String) -> DaoResult<Connection> {
        self.provider
            .acquire_connection()
            .map_err(|err| DaoError::with_source(context(), err))
    }
}

impl<P: ConnectionProvider + ?Sized> MovieDao for SqliteMovieDao<'_, P> {
    fn save(&self, movie: &mut Movie) -> DaoResult<()> {
        let id = insert_movie(self.provider, movie)?;
        movie.id = Some(id);

        info!("event=movie_save module=dao status=ok movie_id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: MovieId) -> DaoResult<Movie> {
        let conn = self.connection(|| find_by_id_context(id))?;
        find_movie_by_id(&conn, id)
    }

    fn find_by_name(&self, name: &str) -> DaoResult<Vec<Movie>> {
        let context = || format!("Error finding movies by name {name}");
        let conn = self.connection(context)?;
        let movies = query_movies(
            &conn,
            &format!("{MOVIE_SELECT_SQL} WHERE name = ?1;"),
            [name],
            context,
        )?;

        if movies.is_empty() {
            return Err(DaoError::new(format!(
                "Movie with name = {name} does not exist"
            )));
        }
        Ok(movies)
    }

    fn find_all(&self) -> DaoResult<Vec<Movie>> {
        let context = || "Error finding all movies".to_string();
        let conn = self.connection(context)?;
        query_movies(&conn, &format!("{MOVIE_SELECT_SQL};"), [], context)
    }

    fn find_by_actor_first_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> DaoResult<Vec<Movie>> {
        let context = || format!("Error finding movies by actor {first_name} {last_name}");
        let conn = self.connection(context)?;
        query_movies(
            &conn,
            SELECT_MOVIES_BY_ACTOR_NAME_SQL,
            params![first_name, last_name],
            context,
        )
    }
}

/// Checks that `id` is present and names a stored movie.
///
/// Returns the verified id. A missing id gets its own message, distinct from
/// the not-found message for an unknown id.
pub fn verify_movie_id(id: Option<MovieId>, conn: &Connection) -> DaoResult<MovieId> {
    let id = id.ok_or_else(|| DaoError::new("Cannot find a movie without ID"))?;
    find_movie_by_id(conn, id)?;
    Ok(id)
}

fn insert_movie<P>(provider: &P, movie: &Movie) -> DaoResult<MovieId>
where
    P: ConnectionProvider + ?Sized,
{
    if movie.id.is_some() {
        return Err(DaoError::new(format!(
            "Couldn't save movie {movie}: movie is already saved"
        )));
    }
    movie.validate().map_err(|err| save_failed(movie, err))?;

    let conn = provider
        .acquire_connection()
        .map_err(|err| save_failed(movie, err))?;
    let changed = conn
        .execute(
            INSERT_MOVIE_SQL,
            params![movie.name.as_str(), movie.duration, movie.release_date],
        )
        .map_err(|err| save_failed(movie, err))?;
    ensure_changed(changed)?;
    generated_id(&conn, "movie")
}

fn find_movie_by_id(conn: &Connection, id: MovieId) -> DaoResult<Movie> {
    let movies = query_movies(
        conn,
        &format!("{MOVIE_SELECT_SQL} WHERE id = ?1;"),
        [id],
        || find_by_id_context(id),
    )?;

    movies
        .into_iter()
        .next()
        .ok_or_else(|| DaoError::new(format!("Movie with id = {id} does not exist")))
}

fn query_movies<A, C>(conn: &Connection, sql: &str, args: A, context: C) -> DaoResult<Vec<Movie>>
where
    A: Params,
    C: Fn() -> String,
{
    let wrap = |err: rusqlite::Error| DaoError::with_source(context(), err);

    let mut stmt = conn.prepare(sql).map_err(wrap)?;
    let mut rows = stmt.query(args).map_err(wrap)?;
    let mut movies = Vec::new();

    while let Some(row) = rows.next().map_err(wrap)? {
        movies.push(parse_movie_row(row).map_err(|err| {
            DaoError::with_source("Couldn't parse row to create movie instance", err)
        })?);
    }

    Ok(movies)
}

fn parse_movie_row(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        duration: row.get("duration")?,
        release_date: row.get("release_date")?,
    })
}

fn find_by_id_context(id: MovieId) -> String {
    format!("Couldn't find movie with id {id}")
}

fn save_failed(movie: &Movie, cause: impl Into<Cause>) -> DaoError {
    DaoError::with_source(format!("Couldn't save movie {movie}"), cause)
}
