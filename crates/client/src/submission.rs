//! Submission validation and bookkeeping.
//!
//! The functions here turn user input into [`StoreRequest`]s or refuse it
//! with a [`ValidationError`]; nothing in this module touches the network.

use chrono::NaiveDate;
use movienight_common::{Movie, StoreRequest, title_case, titles_match};
use serde::Serialize;
use tracing::debug;

use crate::{allocation::VoteAllocation, error::ValidationError};

/// Where the current submission is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    InFlight,
    Succeeded,
    Failed,
}

/// What was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionKind {
    Vote,
    Suggestion,
    MarkWatched,
    UnmarkWatched,
}

/// Result of the last finished submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub kind: SubmissionKind,
    pub succeeded: bool,
    /// User-facing message.
    pub message: String,
}

/// Drives [`SubmissionPhase`] through one submission at a time.
#[derive(Debug, Clone, Default)]
pub struct SubmissionTracker {
    phase: SubmissionPhase,
    kind: Option<SubmissionKind>,
    last: Option<SubmissionOutcome>,
}

impl SubmissionTracker {
    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Outcome of the most recent finished submission.
    #[must_use]
    pub const fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.last.as_ref()
    }

    /// Start validating a new submission.
    pub fn begin(&mut self, kind: SubmissionKind) {
        self.acknowledge();
        self.kind = Some(kind);
        self.enter(SubmissionPhase::Validating);
    }

    /// Validation passed; the request is on the wire.
    pub fn send(&mut self) {
        self.enter(SubmissionPhase::InFlight);
    }

    /// Record the result of the submission.
    pub fn finish(&mut self, succeeded: bool, message: impl Into<String>) {
        let Some(kind) = self.kind else {
            return;
        };
        self.enter(if succeeded {
            SubmissionPhase::Succeeded
        } else {
            SubmissionPhase::Failed
        });
        self.last = Some(SubmissionOutcome {
            kind,
            succeeded,
            message: message.into(),
        });
    }

    /// Validation refused the submission; record why and go back to idle.
    ///
    /// Nothing was sent, so the phase never reaches `Failed`.
    pub fn reject(&mut self, message: impl Into<String>) {
        let Some(kind) = self.kind else {
            return;
        };
        self.last = Some(SubmissionOutcome {
            kind,
            succeeded: false,
            message: message.into(),
        });
        self.acknowledge();
    }

    /// Return to idle once the outcome has been shown.
    pub fn acknowledge(&mut self) {
        if self.phase != SubmissionPhase::Idle {
            self.enter(SubmissionPhase::Idle);
        }
        self.kind = None;
    }

    fn enter(&mut self, phase: SubmissionPhase) {
        debug!(from = ?self.phase, to = ?phase, kind = ?self.kind, "Submission phase");
        self.phase = phase;
    }
}

/// Per-candidate result of a batch of suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionReport {
    /// Titles the store accepted, in input order.
    pub accepted: Vec<String>,
    /// Titles that failed, with the reason.
    pub failed: Vec<(String, String)>,
}

impl SuggestionReport {
    /// Whether every candidate was accepted.
    #[must_use]
    pub fn all_accepted(&self) -> bool {
        self.failed.is_empty() && !self.accepted.is_empty()
    }

    /// One-line summary for the user.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Suggested: {}", self.accepted.join(", "))
        } else {
            let failed: Vec<&str> = self.failed.iter().map(|(t, _)| t.as_str()).collect();
            if self.accepted.is_empty() {
                format!("Could not suggest: {}", failed.join(", "))
            } else {
                format!(
                    "Suggested: {}; could not suggest: {}",
                    self.accepted.join(", "),
                    failed.join(", ")
                )
            }
        }
    }
}

fn require_identity(identity: Option<&str>) -> Result<&str, ValidationError> {
    identity
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ValidationError::MissingIdentity)
}

/// Build the vote request; needs a name and exactly three assigned votes.
pub fn prepare_vote(
    identity: Option<&str>,
    allocation: &VoteAllocation,
) -> Result<StoreRequest, ValidationError> {
    let name = require_identity(identity)?;
    if !allocation.is_complete() {
        return Err(ValidationError::WrongVoteCount {
            assigned: allocation.total_assigned(),
        });
    }

    Ok(StoreRequest::Vote {
        name: name.to_string(),
        picks: allocation.picks().clone(),
    })
}

/// Split comma-separated input into title-cased candidates.
///
/// Blank entries are dropped; duplicates are kept.
#[must_use]
pub fn parse_suggestions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .map(title_case)
        .collect()
}

/// One suggestion request per candidate, in input order.
pub fn prepare_suggestions(
    identity: Option<&str>,
    input: &str,
) -> Result<Vec<StoreRequest>, ValidationError> {
    let name = require_identity(identity)?;
    let candidates = parse_suggestions(input);
    if candidates.is_empty() {
        return Err(ValidationError::EmptySuggestion);
    }

    Ok(candidates
        .into_iter()
        .map(|suggestion| StoreRequest::Suggestion {
            name: name.to_string(),
            suggestion,
        })
        .collect())
}

/// Build a mark-watched request for an unwatched movie in `movies`.
///
/// The request carries the stored spelling of the title.
pub fn prepare_mark_watched(
    movies: &[Movie],
    identity: Option<&str>,
    title: &str,
    watched_date: Option<NaiveDate>,
) -> Result<StoreRequest, ValidationError> {
    let marked_by = require_identity(identity)?;
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    let matches: Vec<&Movie> = movies
        .iter()
        .filter(|m| titles_match(&m.title, title))
        .collect();
    let Some(movie) = matches.iter().find(|m| !m.is_watched()) else {
        return Err(if matches.is_empty() {
            ValidationError::MovieNotFound(title.to_string())
        } else {
            ValidationError::AlreadyWatched(title.to_string())
        });
    };

    Ok(StoreRequest::MarkWatched {
        title: movie.title.clone(),
        marked_by: marked_by.to_string(),
        watched_date,
    })
}

/// Build an unmark-watched request.
pub fn prepare_unmark_watched(title: &str) -> Result<StoreRequest, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(StoreRequest::UnmarkWatched {
        title: title.to_string(),
    })
}
