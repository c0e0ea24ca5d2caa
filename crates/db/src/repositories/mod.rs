//! Repositories wrapping database access per table.

mod movie;
mod suggestion;
mod vote;

pub use movie::MovieRepository;
pub use suggestion::SuggestionRepository;
pub use vote::VoteRepository;
