//! View models over a movie snapshot.
//!
//! Everything here is a pure function of the movies, the local allocation
//! and the sort mode. Displayed titles are title-cased; `title` fields keep
//! the stored spelling for matching.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use icu_collator::{Collator, CollatorOptions, Strength};
use movienight_common::{Movie, title_case, title_key};
use serde::Serialize;
use tracing::warn;

use crate::allocation::VoteAllocation;

/// Number of movies on the podium.
pub const TOP_MOVIES: usize = 3;

/// Order of the voting cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// By title in collation order, ignoring case.
    #[default]
    Alphabetical,
    /// Newest suggestion first; movies never suggested go last.
    Chronological,
}

/// A movie that can still be voted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteCard {
    pub display_title: String,
    pub title: String,
    pub count: u8,
    pub selected: bool,
    pub suggester: Option<String>,
    pub suggested_at: Option<DateTime<Utc>>,
}

/// A movie that has been watched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedCard {
    pub display_title: String,
    pub title: String,
    pub watched_at: DateTime<Utc>,
    pub marked_by: Option<String>,
}

/// A leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMovie {
    pub display_title: String,
    pub title: String,
    pub votes: u32,
}

/// Unwatched movies ranked by votes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    /// Up to [`TOP_MOVIES`] leaders with at least one vote.
    pub top: Vec<RankedMovie>,
    /// Every movie with at least one vote, most votes first.
    pub ranked: Vec<RankedMovie>,
    /// Display titles of movies nobody voted for.
    pub no_votes: Vec<String>,
}

impl Leaderboard {
    /// The single line summarising movies without votes.
    #[must_use]
    pub fn no_votes_line(&self) -> Option<String> {
        if self.no_votes.is_empty() {
            None
        } else {
            Some(format!("No votes yet: {}", self.no_votes.join(", ")))
        }
    }
}

/// Everything the voting page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieListView {
    pub cards: Vec<VoteCard>,
    pub watched: Vec<WatchedCard>,
    pub total_assigned: u8,
    pub sort_mode: SortMode,
}

/// Split into `(unwatched, watched)`, keeping snapshot order.
#[must_use]
pub fn partition(movies: &[Movie]) -> (Vec<&Movie>, Vec<&Movie>) {
    movies.iter().partition(|m| !m.is_watched())
}

/// Sort voting candidates in place. The sort is stable.
pub fn sort_unwatched(movies: &mut [&Movie], mode: SortMode) {
    match mode {
        SortMode::Alphabetical => {
            let collator = title_collator();
            movies.sort_by(|a, b| compare_titles(collator.as_ref(), &a.title, &b.title));
        }
        SortMode::Chronological => {
            movies.sort_by(|a, b| newest_first(a.suggested_at, b.suggested_at));
        }
    }
}

/// Root-locale collator that treats case differences as equal.
fn title_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(&Default::default(), options)
        .inspect_err(|e| warn!(error = %e, "Title collator unavailable; sorting by lowercase title"))
        .ok()
}

/// Collation order, then the raw title so the order is total.
fn compare_titles(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    collator
        .map_or_else(|| title_key(a).cmp(&title_key(b)), |c| c.compare(a, b))
        .then_with(|| a.cmp(b))
}

fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Voting cards for the unwatched movies.
#[must_use]
pub fn vote_cards(movies: &[Movie], allocation: &VoteAllocation, mode: SortMode) -> Vec<VoteCard> {
    let (mut unwatched, _) = partition(movies);
    sort_unwatched(&mut unwatched, mode);

    unwatched
        .into_iter()
        .map(|m| {
            let count = allocation.count(&m.title);
            VoteCard {
                display_title: title_case(&m.title),
                title: m.title.clone(),
                count,
                selected: count > 0,
                suggester: m.suggester.clone(),
                suggested_at: m.suggested_at,
            }
        })
        .collect()
}

/// Watched movies, most recent first.
#[must_use]
pub fn watched_list(movies: &[Movie]) -> Vec<WatchedCard> {
    let mut watched: Vec<WatchedCard> = movies
        .iter()
        .filter_map(|m| {
            m.watched_at.map(|watched_at| WatchedCard {
                display_title: title_case(&m.title),
                title: m.title.clone(),
                watched_at,
                marked_by: m.marked_by.clone(),
            })
        })
        .collect();
    watched.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
    watched
}

/// Rank the unwatched movies by votes.
#[must_use]
pub fn leaderboard(movies: &[Movie]) -> Leaderboard {
    let (mut unwatched, _) = partition(movies);
    unwatched.sort_by(|a, b| b.votes.cmp(&a.votes));

    let (voted, unvoted): (Vec<&Movie>, Vec<&Movie>) =
        unwatched.into_iter().partition(|m| m.votes > 0);

    let ranked: Vec<RankedMovie> = voted
        .into_iter()
        .map(|m| RankedMovie {
            display_title: title_case(&m.title),
            title: m.title.clone(),
            votes: m.votes,
        })
        .collect();

    Leaderboard {
        top: ranked.iter().take(TOP_MOVIES).cloned().collect(),
        ranked,
        no_votes: unvoted.into_iter().map(|m| title_case(&m.title)).collect(),
    }
}

/// Build the voting page.
#[must_use]
pub fn view(movies: &[Movie], allocation: &VoteAllocation, mode: SortMode) -> MovieListView {
    MovieListView {
        cards: vote_cards(movies, allocation, mode),
        watched: watched_list(movies),
        total_assigned: allocation.total_assigned(),
        sort_mode: mode,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn movie(id: i64, title: &str, votes: u32) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            votes,
            suggester: None,
            suggested_at: None,
            watched_at: None,
            marked_by: None,
        }
    }

    fn at(day: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2025, 3, day, 20, 0, 0).unwrap())
    }

    fn titles(cards: &[VoteCard]) -> Vec<&str> {
        cards.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_alphabetical_ignores_case() {
        let movies = vec![
            movie(1, "heat", 0),
            movie(2, "Arrival", 0),
            movie(3, "alien", 0),
            movie(4, "Alien", 0),
        ];
        let cards = vote_cards(&movies, &VoteAllocation::new(), SortMode::Alphabetical);
        assert_eq!(titles(&cards), vec!["Alien", "alien", "Arrival", "heat"]);
    }

    #[test]
    fn test_alphabetical_sorts_accents_with_base_letters() {
        let movies = vec![
            movie(1, "Zodiac", 0),
            movie(2, "Élite", 0),
            movie(3, "Amélie", 0),
        ];
        let cards = vote_cards(&movies, &VoteAllocation::new(), SortMode::Alphabetical);
        assert_eq!(titles(&cards), vec!["Amélie", "Élite", "Zodiac"]);

        let movies = vec![
            movie(1, "Eraserhead", 0),
            movie(2, "élite", 0),
            movie(3, "Dune", 0),
        ];
        let cards = vote_cards(&movies, &VoteAllocation::new(), SortMode::Alphabetical);
        assert_eq!(titles(&cards), vec!["Dune", "élite", "Eraserhead"]);
    }

    #[test]
    fn test_lowercase_fallback_when_no_collator() {
        assert_eq!(compare_titles(None, "alien", "Arrival"), Ordering::Less);
        assert_eq!(compare_titles(None, "Alien", "alien"), Ordering::Less);
    }

    #[test]
    fn test_chronological_untimestamped_last_and_stable() {
        let mut a = movie(1, "A", 0);
        a.suggested_at = at(1);
        let b = movie(2, "B", 0);
        let mut c = movie(3, "C", 0);
        c.suggested_at = at(5);
        let d = movie(4, "D", 0);
        let mut e = movie(5, "E", 0);
        e.suggested_at = at(1);

        let movies = vec![a, b, c, d, e];
        let cards = vote_cards(&movies, &VoteAllocation::new(), SortMode::Chronological);
        assert_eq!(titles(&cards), vec!["C", "A", "E", "B", "D"]);
    }

    #[test]
    fn test_cards_exclude_watched_and_carry_allocation() {
        let mut watched = movie(1, "the thing", 4);
        watched.watched_at = at(2);
        watched.marked_by = Some("Ana".to_string());
        let mut dune = movie(2, "dune", 0);
        dune.suggester = Some("Sam".to_string());
        let movies = vec![watched, dune, movie(3, "Heat", 0)];

        let mut allocation = VoteAllocation::new();
        allocation.toggle("dune");
        allocation.toggle("dune");

        let cards = vote_cards(&movies, &allocation, SortMode::Alphabetical);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].display_title, "Dune");
        assert_eq!(cards[0].title, "dune");
        assert_eq!(cards[0].count, 2);
        assert!(cards[0].selected);
        assert_eq!(cards[0].suggester.as_deref(), Some("Sam"));
        assert!(!cards[1].selected);
    }

    #[test]
    fn test_watched_list_most_recent_first() {
        let mut first = movie(1, "alien", 0);
        first.watched_at = at(1);
        let mut second = movie(2, "heat", 0);
        second.watched_at = at(9);
        second.marked_by = Some("Ana".to_string());
        let movies = vec![first, movie(3, "Dune", 0), second];

        let watched = watched_list(&movies);
        assert_eq!(watched.len(), 2);
        assert_eq!(watched[0].display_title, "Heat");
        assert_eq!(watched[0].marked_by.as_deref(), Some("Ana"));
        assert_eq!(watched[1].display_title, "Alien");
    }

    #[test]
    fn test_leaderboard_partitions_by_votes() {
        let movies = vec![
            movie(1, "A", 5),
            movie(2, "B", 0),
            movie(3, "C", 3),
            movie(4, "D", 0),
        ];

        let board = leaderboard(&movies);
        let ranked: Vec<(&str, u32)> = board
            .ranked
            .iter()
            .map(|r| (r.title.as_str(), r.votes))
            .collect();
        assert_eq!(ranked, vec![("A", 5), ("C", 3)]);
        assert_eq!(board.top, board.ranked);
        assert_eq!(board.no_votes, vec!["B", "D"]);
        assert_eq!(board.no_votes_line().as_deref(), Some("No votes yet: B, D"));
    }

    #[test]
    fn test_leaderboard_top_is_capped_and_ties_are_stable() {
        let movies = vec![
            movie(1, "one", 1),
            movie(2, "two", 4),
            movie(3, "three", 1),
            movie(4, "four", 2),
            movie(5, "five", 1),
        ];

        let board = leaderboard(&movies);
        let top: Vec<&str> = board.top.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(top, vec!["two", "four", "one"]);
        let ranked: Vec<&str> = board.ranked.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(ranked, vec!["two", "four", "one", "three", "five"]);
        assert_eq!(board.no_votes_line(), None);
    }

    #[test]
    fn test_leaderboard_skips_watched() {
        let mut watched = movie(1, "Heat", 9);
        watched.watched_at = at(3);
        let board = leaderboard(&[watched, movie(2, "Dune", 1)]);

        assert_eq!(board.ranked.len(), 1);
        assert_eq!(board.ranked[0].display_title, "Dune");
    }

    #[test]
    fn test_view_title_cases_display_only() {
        let movies = vec![movie(1, "the GODFATHER part II", 0)];
        let page = view(&movies, &VoteAllocation::new(), SortMode::Alphabetical);

        assert_eq!(page.cards[0].display_title, "The Godfather Part Ii");
        assert_eq!(page.cards[0].title, "the GODFATHER part II");
        assert_eq!(page.total_assigned, 0);
    }
}
