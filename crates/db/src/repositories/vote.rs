//! Vote repository.

use std::sync::Arc;

use crate::entities::vote;
use movienight_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection};

/// Vote repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append a ballot to the log.
    pub async fn create(&self, model: vote::ActiveModel) -> AppResult<vote::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Set};

    #[tokio::test]
    async fn test_create_ballot() {
        let ballot = vote::Model {
            id: "01v".to_string(),
            voter_name: "Ana".to_string(),
            pick1: Some("Dune".to_string()),
            pick2: Some("Dune".to_string()),
            pick3: Some("Arrival".to_string()),
            created_at: Utc::now().into(),
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[ballot.clone()]])
                .into_connection(),
        );
        let repo = VoteRepository::new(db);

        let created = repo
            .create(vote::ActiveModel {
                id: Set(ballot.id.clone()),
                voter_name: Set(ballot.voter_name.clone()),
                pick1: Set(ballot.pick1.clone()),
                pick2: Set(ballot.pick2.clone()),
                pick3: Set(ballot.pick3.clone()),
                created_at: Set(ballot.created_at),
            })
            .await
            .unwrap();
        assert_eq!(created.picks(), vec!["Dune", "Dune", "Arrival"]);
    }
}
