//! Suggestion repository.

use std::sync::Arc;

use crate::entities::{Suggestion, suggestion};
use movienight_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

/// Suggestion repository for database operations.
#[derive(Clone)]
pub struct SuggestionRepository {
    db: Arc<DatabaseConnection>,
}

impl SuggestionRepository {
    /// Create a new suggestion repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List the whole suggestion log, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<suggestion::Model>> {
        Suggestion::find()
            .order_by_asc(suggestion::Column::CreatedAt)
            .order_by_asc(suggestion::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Append a suggestion to the log.
    pub async fn create(&self, model: suggestion::ActiveModel) -> AppResult<suggestion::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
