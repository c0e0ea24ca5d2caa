//! Application controller.
//!
//! [`MovieNight`] owns the movie snapshot, the vote allocation, the session
//! and the submission state. Front ends call its methods on user events and
//! render from [`MovieNight::view`] and [`MovieNight::leaderboard`].

use chrono::NaiveDate;
use movienight_common::{Movie, StoreRequest};
use tracing::{debug, info, warn};

use crate::{
    allocation::{ToggleOutcome, VoteAllocation},
    error::{ClientResult, ValidationError},
    reconcile::{self, Leaderboard, MovieListView, SortMode},
    session::{KeyValueStore, SessionIdentity},
    store::MovieStore,
    submission::{
        self, SubmissionKind, SubmissionOutcome, SubmissionPhase, SubmissionTracker,
        SuggestionReport,
    },
};

/// Movie night application state.
pub struct MovieNight<S, K> {
    store: S,
    session: SessionIdentity<K>,
    movies: Vec<Movie>,
    allocation: VoteAllocation,
    sort_mode: SortMode,
    submission: SubmissionTracker,
}

impl<S: MovieStore, K: KeyValueStore> MovieNight<S, K> {
    /// Restore the session and load the first snapshot.
    ///
    /// A failed first fetch is logged and leaves the snapshot empty.
    pub async fn start(store: S, storage: K) -> ClientResult<Self> {
        let session = SessionIdentity::load(storage).await?;
        let mut app = Self {
            store,
            session,
            movies: Vec::new(),
            allocation: VoteAllocation::new(),
            sort_mode: SortMode::default(),
            submission: SubmissionTracker::default(),
        };
        if let Err(e) = app.refresh().await {
            warn!(error = %e, "Initial movie fetch failed");
        }
        Ok(app)
    }

    /// Replace the snapshot with fresh data from the store.
    ///
    /// Votes on movies that are no longer up for voting are dropped.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.movies = self.store.fetch_movies().await?;
        let movies = &self.movies;
        let dropped = self
            .allocation
            .retain(|title| movies.iter().any(|m| !m.is_watched() && m.title == title));
        if dropped > 0 {
            info!(dropped, "Released votes on movies no longer up for voting");
        }
        debug!(count = self.movies.len(), "Movie snapshot refreshed");
        Ok(())
    }

    /// The current snapshot.
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Cycle the votes on an unwatched movie in the snapshot.
    ///
    /// Titles that are not up for voting are rejected.
    pub fn toggle(&mut self, title: &str) -> ToggleOutcome {
        let votable = self
            .movies
            .iter()
            .any(|m| !m.is_watched() && m.title == title);
        if !votable {
            debug!(title = %title, "Toggle on a movie that is not up for voting");
            return ToggleOutcome::Rejected;
        }
        self.allocation.toggle(title)
    }

    /// The local vote allocation.
    #[must_use]
    pub const fn allocation(&self) -> &VoteAllocation {
        &self.allocation
    }

    /// Current sort mode of the voting cards.
    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Change the sort mode of the voting cards.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// The voting page.
    #[must_use]
    pub fn view(&self) -> MovieListView {
        reconcile::view(&self.movies, &self.allocation, self.sort_mode)
    }

    /// The leaderboard.
    #[must_use]
    pub fn leaderboard(&self) -> Leaderboard {
        reconcile::leaderboard(&self.movies)
    }

    /// The signed-in name, if any.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.session.name()
    }

    /// Save the display name.
    pub async fn set_user_name(&mut self, name: &str) -> ClientResult<()> {
        self.session.set_name(name).await
    }

    /// Forget the display name.
    pub async fn clear_user_name(&mut self) -> ClientResult<()> {
        self.session.clear().await
    }

    /// Where the current submission is.
    #[must_use]
    pub const fn phase(&self) -> SubmissionPhase {
        self.submission.phase()
    }

    /// Outcome of the last finished submission.
    #[must_use]
    pub const fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.submission.last_outcome()
    }

    /// Dismiss the last outcome and return to idle.
    pub fn acknowledge(&mut self) {
        self.submission.acknowledge();
    }

    /// Submit the allocated votes.
    ///
    /// On success the allocation is cleared before the snapshot is refetched.
    pub async fn submit_votes(&mut self) -> ClientResult<()> {
        self.submission.begin(SubmissionKind::Vote);
        let request = match submission::prepare_vote(self.session.name(), &self.allocation) {
            Ok(request) => request,
            Err(e) => {
                self.submission.reject(e.to_string());
                return Err(e.into());
            }
        };

        self.submission.send();
        if let Err(e) = self.store.submit(&request).await {
            self.submission.finish(false, e.to_string());
            return Err(e);
        }

        self.allocation.reset();
        self.submission.finish(true, "Votes submitted");
        info!("Votes submitted");
        self.refresh_after_submit().await;
        Ok(())
    }

    /// Suggest one or more comma-separated titles.
    ///
    /// Each title is sent on its own, in order. Failures do not stop later
    /// titles or undo earlier ones; the report lists both.
    pub async fn submit_suggestions(&mut self, input: &str) -> ClientResult<SuggestionReport> {
        self.submission.begin(SubmissionKind::Suggestion);
        let requests = match submission::prepare_suggestions(self.session.name(), input) {
            Ok(requests) => requests,
            Err(e) => {
                self.submission.reject(e.to_string());
                return Err(e.into());
            }
        };

        self.submission.send();
        let mut report = SuggestionReport::default();
        for request in &requests {
            let title = request.title().unwrap_or_default().to_string();
            match self.store.submit(request).await {
                Ok(()) => report.accepted.push(title),
                Err(e) => {
                    warn!(title = %title, error = %e, "Suggestion failed");
                    report.failed.push((title, e.to_string()));
                }
            }
        }

        self.submission.finish(report.all_accepted(), report.summary());
        if !report.accepted.is_empty() {
            self.refresh_after_submit().await;
        }
        Ok(report)
    }

    /// Mark a movie in the snapshot as watched, today or on `date`.
    pub async fn mark_watched(&mut self, title: &str, date: Option<NaiveDate>) -> ClientResult<()> {
        self.submission.begin(SubmissionKind::MarkWatched);
        let prepared =
            submission::prepare_mark_watched(&self.movies, self.session.name(), title, date);
        self.send_prepared(prepared, "Marked as watched").await
    }

    /// Put a watched movie back up for voting.
    pub async fn unmark_watched(&mut self, title: &str) -> ClientResult<()> {
        self.submission.begin(SubmissionKind::UnmarkWatched);
        let prepared = submission::prepare_unmark_watched(title);
        self.send_prepared(prepared, "Unmarked as watched").await
    }

    async fn send_prepared(
        &mut self,
        prepared: Result<StoreRequest, ValidationError>,
        success: &str,
    ) -> ClientResult<()> {
        let request = match prepared {
            Ok(request) => request,
            Err(e) => {
                self.submission.reject(e.to_string());
                return Err(e.into());
            }
        };

        self.submission.send();
        if let Err(e) = self.store.submit(&request).await {
            self.submission.finish(false, e.to_string());
            return Err(e);
        }

        self.submission.finish(true, success);
        self.refresh_after_submit().await;
        Ok(())
    }

    /// A failed refetch keeps the old snapshot; the submission still counts.
    async fn refresh_after_submit(&mut self) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Refetch after submission failed; keeping previous movies");
        }
    }
}
