//! Suggestion service.

use chrono::Utc;
use movienight_common::{AppResult, IdGenerator};
use movienight_db::{
    entities::{movie, suggestion},
    repositories::{MovieRepository, SuggestionRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;

/// Input for recording a suggestion.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordSuggestionInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1, max = 512))]
    pub suggestion: String,
}

/// Result of recording a suggestion.
#[derive(Debug, Clone)]
pub struct SuggestionOutcome {
    pub entry: suggestion::Model,
    /// Set when the suggestion introduced a new movie.
    pub created: Option<movie::Model>,
}

/// Suggestion service for business logic.
#[derive(Clone)]
pub struct SuggestionService {
    suggestion_repo: SuggestionRepository,
    movie_repo: MovieRepository,
    id_gen: IdGenerator,
}

impl SuggestionService {
    /// Create a new suggestion service.
    #[must_use]
    pub const fn new(suggestion_repo: SuggestionRepository, movie_repo: MovieRepository) -> Self {
        Self {
            suggestion_repo,
            movie_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Append a suggestion and create its movie if the title is new.
    pub async fn record_suggestion(
        &self,
        input: RecordSuggestionInput,
    ) -> AppResult<SuggestionOutcome> {
        let input = RecordSuggestionInput {
            name: input.name.trim().to_string(),
            suggestion: input.suggestion.trim().to_string(),
        };
        input.validate()?;

        let now = Utc::now();
        let entry = self
            .suggestion_repo
            .create(suggestion::ActiveModel {
                id: Set(self.id_gen.generate()),
                suggester_name: Set(input.name.clone()),
                title: Set(input.suggestion.clone()),
                created_at: Set(now.into()),
            })
            .await?;

        let created = if self
            .movie_repo
            .find_by_title(&input.suggestion)
            .await?
            .is_some()
        {
            debug!(title = %input.suggestion, "Suggested movie already listed");
            None
        } else {
            let movie = self
                .movie_repo
                .create(movie::ActiveModel {
                    title: Set(input.suggestion.clone()),
                    votes: Set(0),
                    watched_at: Set(None),
                    marked_by: Set(None),
                    created_at: Set(now.into()),
                    ..Default::default()
                })
                .await?;
            info!(id = movie.id, title = %movie.title, "Movie added");
            Some(movie)
        };

        info!(
            suggester = %input.name,
            title = %input.suggestion,
            "Suggestion recorded"
        );
        Ok(SuggestionOutcome { entry, created })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use movienight_common::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn entry(name: &str, title: &str) -> suggestion::Model {
        suggestion::Model {
            id: "01s".to_string(),
            suggester_name: name.to_string(),
            title: title.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn movie_row(id: i32, title: &str) -> movie::Model {
        movie::Model {
            id,
            title: title.to_string(),
            votes: 0,
            watched_at: None,
            marked_by: None,
            created_at: Utc::now().into(),
        }
    }

    fn service(suggestions: MockDatabase, movies: MockDatabase) -> SuggestionService {
        SuggestionService::new(
            SuggestionRepository::new(Arc::new(suggestions.into_connection())),
            MovieRepository::new(Arc::new(movies.into_connection())),
        )
    }

    #[tokio::test]
    async fn test_new_title_creates_movie() {
        let suggestions = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[entry("Ana", "Dune")]]);
        let movies = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movie::Model>::new()])
            .append_query_results([[movie_row(7, "Dune")]]);

        let outcome = service(suggestions, movies)
            .record_suggestion(RecordSuggestionInput {
                name: "Ana".to_string(),
                suggestion: " Dune ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome.entry.title, "Dune");
        assert_eq!(outcome.created.map(|m| m.id), Some(7));
    }

    #[tokio::test]
    async fn test_known_title_only_appends_log() {
        let suggestions = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[entry("Sam", "dune")]]);
        let movies = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[movie_row(7, "Dune")]]);

        let outcome = service(suggestions, movies)
            .record_suggestion(RecordSuggestionInput {
                name: "Sam".to_string(),
                suggestion: "dune".to_string(),
            })
            .await
            .unwrap();

        assert!(outcome.created.is_none());
        assert_eq!(outcome.entry.suggester_name, "Sam");
    }

    #[tokio::test]
    async fn test_blank_suggestion_rejected() {
        let result = service(
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        )
        .record_suggestion(RecordSuggestionInput {
            name: "Ana".to_string(),
            suggestion: "   ".to_string(),
        })
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
