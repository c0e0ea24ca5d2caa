//! Movie repository.

use std::sync::Arc;

use crate::entities::{Movie, movie};
use movienight_common::{AppError, AppResult, title_key};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, SqlErr,
    sea_query::{Expr, Func, SimpleExpr},
};

/// Movie repository for database operations.
#[derive(Clone)]
pub struct MovieRepository {
    db: Arc<DatabaseConnection>,
}

/// `lower(title) = lower(?)`
fn title_matches(title: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(movie::Column::Title))).eq(title_key(title))
}

impl MovieRepository {
    /// Create a new movie repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List every movie in insertion order.
    pub async fn find_all(&self) -> AppResult<Vec<movie::Model>> {
        Movie::find()
            .order_by_asc(movie::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a movie by title, ignoring case.
    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<movie::Model>> {
        Movie::find()
            .filter(title_matches(title))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a movie by title, returning error if not found.
    pub async fn get_by_title(&self, title: &str) -> AppResult<movie::Model> {
        self.find_by_title(title)
            .await?
            .ok_or_else(|| AppError::MovieNotFound(title.to_string()))
    }

    /// Create a new movie.
    ///
    /// A title already taken under any casing is a [`AppError::Conflict`].
    pub async fn create(&self, model: movie::ActiveModel) -> AppResult<movie::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("A movie with this title already exists".to_string())
            }
            _ => AppError::Database(e.to_string()),
        })
    }

    /// Update a movie.
    pub async fn update(&self, model: movie::ActiveModel) -> AppResult<movie::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Add `by` to the tally of the movie matching `title`.
    ///
    /// Issued as a single `UPDATE ... SET votes = votes + $1` so concurrent
    /// ballots cannot overwrite each other. Returns the number of rows
    /// touched (0 when no movie has that title).
    pub async fn increment_votes(&self, title: &str, by: i32) -> AppResult<u64> {
        let result = Movie::update_many()
            .col_expr(
                movie::Column::Votes,
                Expr::col(movie::Column::Votes).add(by),
            )
            .filter(title_matches(title))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
