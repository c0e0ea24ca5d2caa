//! Vote service.

use chrono::Utc;
use movienight_common::{AppError, AppResult, IdGenerator, MAX_VOTES, Picks};
use movienight_db::{
    entities::vote,
    repositories::{MovieRepository, VoteRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

/// Input for recording a ballot.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordVoteInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    pub picks: Picks,
}

/// Vote service for business logic.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: VoteRepository,
    movie_repo: MovieRepository,
    id_gen: IdGenerator,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(vote_repo: VoteRepository, movie_repo: MovieRepository) -> Self {
        Self {
            vote_repo,
            movie_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record a ballot and add its picks to the movie tallies.
    ///
    /// Titles with no matching movie are logged and skipped; the ballot
    /// itself is still kept.
    pub async fn record_vote(&self, input: RecordVoteInput) -> AppResult<vote::Model> {
        let input = RecordVoteInput {
            name: input.name.trim().to_string(),
            picks: input.picks,
        };
        input.validate()?;
        let slots = expand_picks(&input.picks)?;

        let model = vote::ActiveModel {
            id: Set(self.id_gen.generate()),
            voter_name: Set(input.name.clone()),
            pick1: Set(slots.first().cloned()),
            pick2: Set(slots.get(1).cloned()),
            pick3: Set(slots.get(2).cloned()),
            created_at: Set(Utc::now().into()),
        };
        let ballot = self.vote_repo.create(model).await?;

        for (title, count) in &input.picks {
            let touched = self
                .movie_repo
                .increment_votes(title, i32::from(*count))
                .await?;
            if touched == 0 {
                warn!(title = %title, "Vote for unknown movie skipped");
            }
        }

        info!(
            voter = %input.name,
            picks = slots.len(),
            "Vote recorded"
        );
        Ok(ballot)
    }
}

/// One slot per assigned vote, in the order the titles were picked.
fn expand_picks(picks: &Picks) -> AppResult<Vec<String>> {
    if picks.is_empty() {
        return Err(AppError::Validation("No picks provided".to_string()));
    }

    let mut total: u32 = 0;
    for (title, count) in picks {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Pick title is empty".to_string()));
        }
        if *count == 0 {
            return Err(AppError::Validation(format!(
                "Pick for {title} has no votes"
            )));
        }
        total += u32::from(*count);
    }
    if total > u32::from(MAX_VOTES) {
        return Err(AppError::Validation(format!(
            "At most {MAX_VOTES} votes allowed, got {total}"
        )));
    }

    Ok(picks
        .iter()
        .flat_map(|(title, count)| std::iter::repeat_n(title.clone(), usize::from(*count)))
        .collect())
}
