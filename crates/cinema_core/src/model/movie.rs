//! Movie domain model.
//!
//! # Invariants
//! - `name` is never blank and `duration` is never negative once validated.
//! - Two movies are equal when both `id` and `release_date` are equal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Storage-assigned movie identity.
pub type MovieId = i64;

/// Validation failures for movie writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieValidationError {
    BlankName,
    NegativeDuration(i64),
}

impl Display for MovieValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "movie name must not be blank"),
            Self::NegativeDuration(value) => {
                write!(f, "movie duration must not be negative, got {value}")
            }
        }
    }
}

impl Error for MovieValidationError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: Option<MovieId>,
    pub name: String,
    /// Running time; the catalogue stores it as an opaque integer.
    pub duration: i64,
    pub release_date: NaiveDate,
}

impl Movie {
    /// Creates an unsaved movie.
    pub fn new(name: impl Into<String>, duration: i64, release_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            duration,
            release_date,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(&self) -> Result<(), MovieValidationError> {
        if self.name.trim().is_empty() {
            return Err(MovieValidationError::BlankName);
        }
        if self.duration < 0 {
            return Err(MovieValidationError::NegativeDuration(self.duration));
        }
        Ok(())
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.release_date == other.release_date
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.release_date.hash(state);
    }
}

impl Display for Movie {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Movie(id={}, name={}, duration={}, release_date={})",
            super::fmt_id(self.id),
            self.name,
            self.duration,
            self.release_date
        )
    }
}
