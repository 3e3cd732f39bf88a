//! CLI-level errors (wrap application errors)

use std::io;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line editor: {0}")]
    Readline(#[from] ReadlineError),

    #[error("{failed} of {total} queries could not be evaluated")]
    QueriesFailed { failed: usize, total: usize },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Application(ApplicationError::Config { .. }) => crate::exitcode::CONFIG,
            CliError::Input { .. } => crate::exitcode::NOINPUT,
            CliError::Io(_) | CliError::Readline(_) => crate::exitcode::IOERR,
            CliError::QueriesFailed { .. } => crate::exitcode::DATAERR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_failed_queries_when_mapping_exit_code_then_dataerr() {
        let err = CliError::QueriesFailed { failed: 1, total: 3 };
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(err.to_string(), "1 of 3 queries could not be evaluated");
    }
}
