//! Actor DAO contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and load `Actor` rows.
//! - Create `actor_movie` link rows after both references are verified.
//!
//! # Invariants
//! - `save` writes the generated id back into the caller's actor.
//! - Linking checks the actor before the movie, so a missing actor is the
//!   error reported when both references are bad.

use super::movie_dao::verify_movie_id;
use super::{ensure_changed, generated_id};
use crate::db::ConnectionProvider;
use crate::error::{DaoError, DaoResult};
use crate::model::actor::{Actor, ActorId};
use crate::model::fmt_id;
use crate::model::movie::MovieId;
use log::info;
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::error::Error;

const INSERT_ACTOR_SQL: &str =
    "INSERT INTO actor (first_name, last_name, birthday) VALUES (?1, ?2, ?3);";

const SELECT_ACTOR_BY_ID_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    birthday
FROM actor
WHERE id = ?1;";

const INSERT_ACTOR_MOVIE_LINK_SQL: &str =
    "INSERT INTO actor_movie (actor_id, movie_id) VALUES (?1, ?2);";

type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Persistence operations for actors.
pub trait ActorDao {
    /// Inserts a new actor and assigns its generated id.
    fn save(&self, actor: &mut Actor) -> DaoResult<()>;
    /// Loads one actor, failing when the id is unknown.
    fn find_by_id(&self, id: ActorId) -> DaoResult<Actor>;
    /// Links an existing actor to an existing movie.
    fn link_actor_to_movie_by_id(
        &self,
        actor_id: Option<ActorId>,
        movie_id: Option<MovieId>,
    ) -> DaoResult<()>;
}

/// SQLite-backed actor DAO.
pub struct SqliteActorDao<'p, P: ?Sized> {
    provider: &'p P,
}

impl<'p, P: ConnectionProvider + ?Sized> SqliteActorDao<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }
}

impl<P: ConnectionProvider + ?Sized> ActorDao for SqliteActorDao<'_, P> {
    fn save(&self, actor: &mut Actor) -> DaoResult<()> {
        let id = insert_actor(self.provider, actor)?;
        actor.id = Some(id);

        info!("event=actor_save module=dao status=ok actor_id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: ActorId) -> DaoResult<Actor> {
        let conn = self
            .provider
            .acquire_connection()
            .map_err(|err| find_failed(id, err))?;
        find_actor_by_id(&conn, id)
    }

    fn link_actor_to_movie_by_id(
        &self,
        actor_id: Option<ActorId>,
        movie_id: Option<MovieId>,
    ) -> DaoResult<()> {
        let link_failed = |cause: Cause| {
            DaoError::with_source(
                format!(
                    "Couldn't link actor {} to movie {}",
                    fmt_id(actor_id),
                    fmt_id(movie_id)
                ),
                cause,
            )
        };

        let mut conn = self
            .provider
            .acquire_connection()
            .map_err(|err| link_failed(err.into()))?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|err| link_failed(err.into()))?;

        let actor_id = verify_actor_id(actor_id, &tx)?;
        let movie_id = verify_movie_id(movie_id, &tx)?;

        let changed = tx
            .execute(INSERT_ACTOR_MOVIE_LINK_SQL, params![actor_id, movie_id])
            .map_err(|err| link_failed(err.into()))?;
        ensure_changed(changed)?;
        tx.commit().map_err(|err| link_failed(err.into()))?;

        info!("event=actor_movie_link module=dao status=ok actor_id={actor_id} movie_id={movie_id}");
        Ok(())
    }
}

/// Checks that `id` is present and names a stored actor.
///
/// Returns the verified id. Runs on the caller's connection so it can take
/// part in an open transaction.
pub fn verify_actor_id(id: Option<ActorId>, conn: &Connection) -> DaoResult<ActorId> {
    let id = id.ok_or_else(|| DaoError::new("Cannot find an actor without ID"))?;
    find_actor_by_id(conn, id)?;
    Ok(id)
}

fn insert_actor<P>(provider: &P, actor: &Actor) -> DaoResult<ActorId>
where
    P: ConnectionProvider + ?Sized,
{
    if actor.id.is_some() {
        return Err(DaoError::new(format!(
            "Couldn't save actor {actor}: actor is already saved"
        )));
    }
    actor.validate().map_err(|err| save_failed(actor, err))?;

    let conn = provider
        .acquire_connection()
        .map_err(|err| save_failed(actor, err))?;
    let changed = conn
        .execute(
            INSERT_ACTOR_SQL,
            params![
                actor.first_name.as_str(),
                actor.last_name.as_str(),
                actor.birthday,
            ],
        )
        .map_err(|err| save_failed(actor, err))?;
    ensure_changed(changed)?;
    generated_id(&conn, "actor")
}

fn find_actor_by_id(conn: &Connection, id: ActorId) -> DaoResult<Actor> {
    let mut stmt = conn
        .prepare(SELECT_ACTOR_BY_ID_SQL)
        .map_err(|err| find_failed(id, err))?;
    let mut rows = stmt.query([id]).map_err(|err| find_failed(id, err))?;

    match rows.next().map_err(|err| find_failed(id, err))? {
        Some(row) => parse_actor_row(row).map_err(|err| {
            DaoError::with_source("Couldn't parse row to create actor instance", err)
        }),
        None => Err(DaoError::new(format!("Actor with id = {id} does not exist"))),
    }
}

fn parse_actor_row(row: &Row<'_>) -> rusqlite::Result<Actor> {
    Ok(Actor {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        birthday: row.get("birthday")?,
    })
}

fn save_failed(actor: &Actor, cause: impl Into<Cause>) -> DaoError {
    DaoError::with_source(format!("Couldn't save actor {actor}"), cause)
}

fn find_failed(id: ActorId, cause: impl Into<Cause>) -> DaoError {
    DaoError::with_source(format!("Couldn't find actor with id {id}"), cause)
}
