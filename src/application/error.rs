//! Application-level errors (wrap domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Reasons a submitted query could not be evaluated.
///
/// A query that ran and answered "no" is not an error; see
/// [`Verdict::False`](crate::application::Verdict::False).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty query")]
    EmptyInput,

    #[error("Unknown query or syntax error.")]
    UnknownCommand,

    #[error("{command}: {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },

    #[error("Tree is empty")]
    EmptyTree,

    #[error("{0}")]
    Engine(DomainError),
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::EmptyTree => CommandError::EmptyTree,
            other => CommandError::Engine(other),
        }
    }
}

/// Application errors outside of query evaluation.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
