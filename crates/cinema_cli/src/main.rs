//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire configuration, logging, and the schema initializer the way a
//!   caller process would.
//! - Run one save/link/query round trip and print the outcome.

use chrono::NaiveDate;
use cinema_core::{
    init_logging, init_schema, Actor, ActorDao, DbConfig, LogSettings, Movie, MovieDao,
    SqliteActorDao, SqliteConnectionProvider, SqliteMovieDao,
};
use log::info;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cinema_cli error: {err}");
            let mut cause = err.source();
            while let Some(inner) = cause {
                eprintln!("  caused by: {inner}");
                cause = inner.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = DbConfig::from_env()?;
    if let Some(settings) = LogSettings::from_env()? {
        init_logging(&settings)?;
    }
    println!("cinema_core version={}", cinema_core::core_version());

    let provider = SqliteConnectionProvider::new(&config)?;
    init_schema(&provider)?;
    info!("event=cli_start module=cli status=ok db_name={}", config.name);

    let actors = SqliteActorDao::new(&provider);
    let movies = SqliteMovieDao::new(&provider);

    let mut jared_leto = Actor::new("Jared", "Leto", ymd(1981, 6, 22)?);
    let mut fight_club = Movie::new("Fight Club", 200_000, ymd(1996, 3, 22)?);
    actors.save(&mut jared_leto)?;
    movies.save(&mut fight_club)?;
    actors.link_actor_to_movie_by_id(jared_leto.id, fight_club.id)?;

    println!("saved {jared_leto}");
    println!("saved {fight_club}");
    for movie in movies.find_by_actor_first_and_last_name("Jared", "Leto")? {
        println!("linked {movie}");
    }
    println!("catalogue size={}", movies.find_all()?.len());
    Ok(())
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, Box<dyn Error>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("invalid date {year}-{month}-{day}").into())
}
