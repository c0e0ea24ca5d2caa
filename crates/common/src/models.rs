//! Wire models exchanged between the client and the movie store.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum number of votes a voter distributes per submission.
pub const MAX_VOTES: u8 = 3;

/// Reply body the store sends for an accepted submission.
pub const OK_REPLY: &str = "OK";

/// Vote picks: movie title to the number of votes assigned to it.
///
/// Iterates in the order titles were first picked; ballot slots follow it.
pub type Picks = IndexMap<String, u8>;

/// A movie as returned by `GET ?action=movies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub votes: u32,
    /// Name of whoever first suggested the movie.
    #[serde(default)]
    pub suggester: Option<String>,
    /// When the movie was first suggested.
    #[serde(default, alias = "timestamp")]
    pub suggested_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "watchedDate")]
    pub watched_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub marked_by: Option<String>,
}

impl Movie {
    /// Whether the movie has been marked as watched.
    #[must_use]
    pub const fn is_watched(&self) -> bool {
        self.watched_at.is_some()
    }
}

/// Body of a `POST` to the movie store, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StoreRequest {
    /// Cast up to [`MAX_VOTES`] votes.
    Vote { name: String, picks: Picks },
    /// Suggest a single title.
    Suggestion { name: String, suggestion: String },
    /// Mark a movie as watched, optionally on a given date.
    #[serde(rename_all = "camelCase")]
    MarkWatched {
        title: String,
        marked_by: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        watched_date: Option<NaiveDate>,
    },
    /// Clear a movie's watched status.
    UnmarkWatched { title: String },
}

impl StoreRequest {
    /// The `type` discriminator of this request.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Vote { .. } => "vote",
            Self::Suggestion { .. } => "suggestion",
            Self::MarkWatched { .. } => "markWatched",
            Self::UnmarkWatched { .. } => "unmarkWatched",
        }
    }

    /// The movie title the request is about; `None` for votes.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Vote { .. } => None,
            Self::Suggestion { suggestion, .. } => Some(suggestion.as_str()),
            Self::MarkWatched { title, .. } | Self::UnmarkWatched { title } => Some(title.as_str()),
        }
    }

    /// Whether `kind` names one of the known request types.
    #[must_use]
    pub fn is_known_kind(kind: &str) -> bool {
        matches!(kind, "vote" | "suggestion" | "markWatched" | "unmarkWatched")
    }
}
