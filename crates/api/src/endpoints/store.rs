//! Query-and-append endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use movienight_common::{AppError, AppResult, StoreRequest};
use movienight_core::{MarkWatchedInput, RecordSuggestionInput, RecordVoteInput};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{middleware::AppState, response::StoreReply};

/// Query string of a `GET`.
#[derive(Debug, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
}

/// List movies for `action=movies` or `action=leaderboard`.
async fn query(State(state): State<AppState>, Query(params): Query<ActionQuery>) -> Response {
    match params.action.as_deref() {
        Some("movies" | "leaderboard") => match state.movie_service.list_movies().await {
            Ok(movies) => Json(movies).into_response(),
            Err(err) => StoreReply::Error(err).into_response(),
        },
        other => {
            debug!(action = ?other, "Unrecognised action");
            StoreReply::NoAction.into_response()
        }
    }
}

/// Apply a vote, suggestion, or watched-status change.
///
/// The body is parsed as JSON whatever its content type, so browsers can
/// post it as `text/plain` without a preflight.
async fn submit(State(state): State<AppState>, body: String) -> StoreReply {
    apply(&state, &body).await.unwrap_or_else(StoreReply::Error)
}

async fn apply(state: &AppState, body: &str) -> AppResult<StoreReply> {
    let value: Value = serde_json::from_str(body)?;
    let known = value
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(StoreRequest::is_known_kind);
    if !known {
        return Ok(StoreReply::InvalidType);
    }

    // Parsed from the raw text: `Value` maps are sorted and would lose pick order.
    let request: StoreRequest = serde_json::from_str(body)?;
    debug!(kind = request.kind(), title = ?request.title(), "Store request received");

    match request {
        StoreRequest::Vote { name, picks } => {
            state
                .vote_service
                .record_vote(RecordVoteInput { name, picks })
                .await?;
        }
        StoreRequest::Suggestion { name, suggestion } => {
            state
                .suggestion_service
                .record_suggestion(RecordSuggestionInput { name, suggestion })
                .await?;
        }
        StoreRequest::MarkWatched {
            title,
            marked_by,
            watched_date,
        } => {
            state
                .movie_service
                .mark_watched(MarkWatchedInput {
                    title,
                    marked_by,
                    watched_date,
                })
                .await?;
        }
        StoreRequest::UnmarkWatched { title } => {
            if title.trim().is_empty() {
                return Err(AppError::Validation("Title is required".to_string()));
            }
            state.movie_service.unmark_watched(&title).await?;
        }
    }

    Ok(StoreReply::Ok)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(query).post(submit))
}
