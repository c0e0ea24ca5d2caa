//! Movie service: listing and watched status.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime, Utc};
use movienight_common::{AppResult, Movie, title_key};
use movienight_db::{
    entities::{movie, suggestion},
    repositories::{MovieRepository, SuggestionRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Input for marking a movie as watched.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkWatchedInput {
    #[validate(length(min = 1, max = 512))]
    pub title: String,
    #[validate(length(min = 1, max = 256))]
    pub marked_by: String,
    /// Day the movie was watched; defaults to now.
    pub watched_date: Option<NaiveDate>,
}

/// Movie service for business logic.
#[derive(Clone)]
pub struct MovieService {
    movie_repo: MovieRepository,
    suggestion_repo: SuggestionRepository,
}

impl MovieService {
    /// Create a new movie service.
    #[must_use]
    pub const fn new(movie_repo: MovieRepository, suggestion_repo: SuggestionRepository) -> Self {
        Self {
            movie_repo,
            suggestion_repo,
        }
    }

    /// List every movie with its first suggester attached.
    ///
    /// The suggester of a movie is whoever appears first in the suggestion
    /// log under the same title, compared case-insensitively.
    pub async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        let movies = self.movie_repo.find_all().await?;
        let log = self.suggestion_repo.find_all().await?;

        let mut first_suggestion: HashMap<String, &suggestion::Model> = HashMap::new();
        for entry in &log {
            first_suggestion.entry(title_key(&entry.title)).or_insert(entry);
        }

        Ok(movies
            .into_iter()
            .map(|m| {
                let first = first_suggestion.get(&title_key(&m.title)).copied();
                to_wire(m, first)
            })
            .collect())
    }

    /// Mark a movie as watched.
    pub async fn mark_watched(&self, input: MarkWatchedInput) -> AppResult<movie::Model> {
        input.validate()?;

        let movie = self.movie_repo.get_by_title(&input.title).await?;
        let watched_at = input.watched_date.map_or_else(Utc::now, |date| {
            date.and_time(NaiveTime::MIN).and_utc()
        });

        let mut active: movie::ActiveModel = movie.into();
        active.watched_at = Set(Some(watched_at.into()));
        active.marked_by = Set(Some(input.marked_by.clone()));
        let updated = self.movie_repo.update(active).await?;

        info!(
            title = %updated.title,
            marked_by = %input.marked_by,
            "Movie marked as watched"
        );
        Ok(updated)
    }

    /// Clear a movie's watched status.
    pub async fn unmark_watched(&self, title: &str) -> AppResult<movie::Model> {
        let movie = self.movie_repo.get_by_title(title).await?;

        let mut active: movie::ActiveModel = movie.into();
        active.watched_at = Set(None);
        active.marked_by = Set(None);
        let updated = self.movie_repo.update(active).await?;

        info!(title = %updated.title, "Movie unmarked as watched");
        Ok(updated)
    }
}

fn to_wire(movie: movie::Model, first: Option<&suggestion::Model>) -> Movie {
    Movie {
        id: i64::from(movie.id),
        title: movie.title,
        votes: u32::try_from(movie.votes).unwrap_or(0),
        suggester: first.map(|s| s.suggester_name.clone()),
        suggested_at: first.map(|s| s.created_at.with_timezone(&Utc)),
        watched_at: movie.watched_at.map(|t| t.with_timezone(&Utc)),
        marked_by: movie.marked_by,
    }
}
