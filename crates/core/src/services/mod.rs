//! Business logic services.

pub mod movie;
pub mod suggestion;
pub mod vote;

pub use movie::{MarkWatchedInput, MovieService};
pub use suggestion::{RecordSuggestionInput, SuggestionOutcome, SuggestionService};
pub use vote::{RecordVoteInput, VoteService};
