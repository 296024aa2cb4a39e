//! Domain model for the cinema catalogue.
//!
//! # Responsibility
//! - Define the `Actor` and `Movie` records shared by both DAOs.
//! - Own the validation rules applied before any insert.
//!
//! # Invariants
//! - `id` is `None` until a repository save assigns the generated identity.
//! - Equality is identity-based and implemented explicitly per entity.

pub mod actor;
pub mod movie;

/// Renders an optional identity for messages and `Display` output.
pub(crate) fn fmt_id(id: Option<i64>) -> String {
    id.map_or_else(|| "none".to_string(), |value| value.to_string())
}
