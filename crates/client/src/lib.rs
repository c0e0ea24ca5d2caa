//! Client core for movie night.
//!
//! Everything a front end needs short of drawing pixels:
//!
//! - **Allocation**: the local 0–3 vote state machine
//! - **Reconcile**: pure view models over a movie snapshot
//! - **Session**: the persisted display name
//! - **Submission**: validation and request building
//! - **Store**: the movie store seam and its HTTP implementation
//! - **App**: the controller that owns all of the above

pub mod allocation;
pub mod app;
pub mod error;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod submission;

pub use allocation::{ToggleOutcome, VoteAllocation};
pub use app::MovieNight;
pub use error::{ClientError, ClientResult, ValidationError};
pub use reconcile::{Leaderboard, MovieListView, SortMode, VoteCard, WatchedCard};
pub use session::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SessionIdentity};
pub use store::{HttpMovieStore, MovieStore};
pub use submission::{SubmissionKind, SubmissionOutcome, SubmissionPhase, SuggestionReport};
