//! Actor domain model.
//!
//! # Responsibility
//! - Define the persisted actor record and its validation rules.
//!
//! # Invariants
//! - `first_name` and `last_name` are never blank once validated.
//! - Two actors are equal when their `id` values are equal; other fields
//!   do not take part in equality.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Storage-assigned actor identity.
pub type ActorId = i64;

/// Validation failures for actor writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorValidationError {
    BlankFirstName,
    BlankLastName,
}

impl Display for ActorValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankFirstName => write!(f, "actor first_name must not be blank"),
            Self::BlankLastName => write!(f, "actor last_name must not be blank"),
        }
    }
}

impl Error for ActorValidationError {}

/// Person appearing in one or more movies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// `None` until the actor has been saved.
    pub id: Option<ActorId>,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
}

impl Actor {
    /// Creates an unsaved actor.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthday: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthday,
        }
    }

    /// Returns whether storage has assigned an identity to this actor.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Checks the fields required by the `actor` table.
    pub fn validate(&self) -> Result<(), ActorValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ActorValidationError::BlankFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(ActorValidationError::BlankLastName);
        }
        Ok(())
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Actor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Actor(id={}, first_name={}, last_name={}, birthday={})",
            super::fmt_id(self.id),
            self.first_name,
            self.last_name,
            self.birthday
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Actor, ActorValidationError};
    use chrono::NaiveDate;

    fn birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(1956, 7, 9).unwrap()
    }

    #[test]
    fn equality_ignores_everything_but_id() {
        let mut left = Actor::new("Tom", "Hanks", birthday());
        let mut right = Actor::new("Brad", "Pitt", birthday());
        left.id = Some(7);
        right.id = Some(7);
        assert_eq!(left, right);

        right.id = Some(8);
        assert_ne!(left, right);
    }

    #[test]
    fn validate_rejects_blank_names() {
        let actor = Actor::new("  ", "Hanks", birthday());
        assert_eq!(actor.validate(), Err(ActorValidationError::BlankFirstName));

        let actor = Actor::new("Tom", "", birthday());
        assert_eq!(actor.validate(), Err(ActorValidationError::BlankLastName));
    }

    #[test]
    fn display_lists_every_field() {
        let actor = Actor::new("Tom", "Hanks", birthday());
        assert_eq!(
            actor.to_string(),
            "Actor(id=none, first_name=Tom, last_name=Hanks, birthday=1956-07-09)"
        );
    }
}
