use thiserror::Error;

use crate::config::ConfigError;
use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum GatorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not open database at {url}: {reason}")]
    StoreConnect { url: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("User does not exist: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("The {command} command expects {expected} argument(s), got {got}")]
    InvalidArgCount {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Running command {command} failed")]
    CommandFailed {
        command: String,
        #[source]
        source: Box<GatorError>,
    },
}

pub type Result<T> = std::result::Result<T, GatorError>;
