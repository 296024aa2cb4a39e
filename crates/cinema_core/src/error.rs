//! Operation error shared by every DAO call.
//!
//! # Responsibility
//! - Carry one human-readable message per failed operation.
//! - Keep the lower-level cause reachable through `Error::source`.
//!
//! # Invariants
//! - `Display` renders the message only; causes are never inlined.
//! - Not-found messages always contain the key that was looked up.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DaoResult<T> = Result<T, DaoError>;

type BoxedCause = Box<dyn Error + Send + Sync + 'static>;

/// Failure of a single data-access operation.
///
/// Callers tell conditions apart by message, not by variant.
#[derive(Debug)]
pub struct DaoError {
    message: String,
    source: Option<BoxedCause>,
}

impl DaoError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a lower-level failure with operation context.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for DaoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for DaoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::DaoError;
    use std::error::Error;

    #[test]
    fn display_renders_message_without_cause() {
        let cause = std::io::Error::other("disk on fire");
        let err = DaoError::with_source("Couldn't save actor", cause);

        assert_eq!(err.to_string(), "Couldn't save actor");
        assert_eq!(err.source().map(|cause| cause.to_string()).as_deref(), Some("disk on fire"));
    }

    #[test]
    fn plain_error_has_no_source() {
        let err = DaoError::new("Nothing has been changed");
        assert_eq!(err.message(), "Nothing has been changed");
        assert!(err.source().is_none());
    }
}
