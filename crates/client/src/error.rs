//! Client error types.
//!
//! Messages are shown to the user as-is.

use movienight_common::MAX_VOTES;
use thiserror::Error;

/// Client result type.
pub type ClientResult<T> = Result<T, ClientError>;

/// A submission refused before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your name first")]
    MissingIdentity,

    #[error("Please assign exactly {} votes (currently {assigned})", MAX_VOTES)]
    WrongVoteCount { assigned: u8 },

    #[error("Please enter at least one movie title")]
    EmptySuggestion,

    #[error("Please enter a movie title")]
    EmptyTitle,

    #[error("No unwatched movie called \"{0}\"")]
    MovieNotFound(String),

    #[error("\"{0}\" has already been watched")]
    AlreadyWatched(String),
}

/// Client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Could not reach the movie store, please try again ({0})")]
    Http(#[from] reqwest::Error),

    #[error("The movie store refused the request: {0}")]
    Rejected(String),

    #[error("The movie store sent data we could not read: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid movie store URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Could not save your session: {0}")]
    Storage(String),
}

impl ClientError {
    /// Whether the error was raised before any network call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
