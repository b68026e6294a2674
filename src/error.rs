//! Error taxonomy for session-level operations
//!
//! The CSV codec and the markup encoder never fail; they degrade on
//! malformed input. Errors only surface at the session boundary, either as
//! a validation failure (the action is refused, nothing changes) or as an
//! unexpected failure (decode/persistence problems, appended to the
//! durable error log before being reported).

use std::fmt;

use thiserror::Error;

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The action was refused: required text is empty or the session is not
    /// in a state where the action is available. No partial state is left
    /// behind.
    #[error("{0}")]
    Validation(&'static str),

    /// A decode or persistence step failed.
    #[error("{context}: {message}")]
    Unexpected { context: String, message: String },
}

impl Error {
    pub fn unexpected(context: impl Into<String>, source: impl fmt::Display) -> Self {
        Error::Unexpected {
            context: context.into(),
            message: source.to_string(),
        }
    }

    /// True for the refused-action variant.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
