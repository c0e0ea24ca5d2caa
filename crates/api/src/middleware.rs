//! Shared application state.

use std::sync::Arc;

use movienight_core::{MovieService, SuggestionService, VoteService};
use movienight_db::repositories::{MovieRepository, SuggestionRepository, VoteRepository};
use sea_orm::DatabaseConnection;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Listing and watched status.
    pub movie_service: MovieService,
    /// Ballots.
    pub vote_service: VoteService,
    /// Suggestion log.
    pub suggestion_service: SuggestionService,
}

impl AppState {
    /// Wire repositories and services over one connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let movie_repo = MovieRepository::new(Arc::clone(&db));
        let suggestion_repo = SuggestionRepository::new(Arc::clone(&db));
        let vote_repo = VoteRepository::new(db);

        Self {
            movie_service: MovieService::new(movie_repo.clone(), suggestion_repo.clone()),
            vote_service: VoteService::new(vote_repo, movie_repo.clone()),
            suggestion_service: SuggestionService::new(suggestion_repo, movie_repo),
        }
    }
}
