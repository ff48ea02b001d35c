//! CLI error type.
//!
//! Only infrastructure failures end up here; missing records and rejected
//! mutations are printed to the user and the session continues.

use std::error::Error;
use std::fmt::{Display, Formatter};
use taskdeck_core::db::DbError;
use taskdeck_core::{LoggingError, RepoError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    Io(std::io::Error),
    Db(DbError),
    Repo(RepoError),
    Logging(LoggingError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
            Self::Db(err) => write!(f, "storage unavailable: {err}"),
            Self::Repo(err) => write!(f, "store operation failed: {err}"),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}
