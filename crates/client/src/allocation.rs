//! Local vote allocation.
//!
//! Each voter spreads [`MAX_VOTES`] votes over the unwatched movies before
//! submitting. A movie holds 1 to 3 of them or is absent; the total never
//! exceeds [`MAX_VOTES`].

use movienight_common::{MAX_VOTES, Picks};

/// What a [`VoteAllocation::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// An unpicked movie received its first vote.
    Started,
    /// A picked movie received one more vote.
    Incremented,
    /// A picked movie lost all of its votes.
    Cleared,
    /// No votes left for an unpicked movie; nothing changed.
    Rejected,
}

/// Votes assigned so far, keyed by movie title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteAllocation {
    picks: Picks,
}

impl VoteAllocation {
    /// An empty allocation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle the votes on `title`.
    ///
    /// An untouched movie goes 0 → 1 → 2 → 3 → 0 on repeated toggles while
    /// votes remain. Once the total is spent, a picked movie is cleared and
    /// an unpicked one is rejected.
    pub fn toggle(&mut self, title: &str) -> ToggleOutcome {
        let count = self.count(title);
        let total = self.total_assigned();

        match (count, total < MAX_VOTES) {
            (0, true) => {
                self.picks.insert(title.to_string(), 1);
                ToggleOutcome::Started
            }
            (c, true) if c < MAX_VOTES => {
                self.picks.insert(title.to_string(), c + 1);
                ToggleOutcome::Incremented
            }
            (0, false) => ToggleOutcome::Rejected,
            _ => {
                self.picks.shift_remove(title);
                ToggleOutcome::Cleared
            }
        }
    }

    /// Keep only the picks whose title passes `keep`, preserving pick order.
    ///
    /// Returns how many votes were released.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> u8 {
        let before = self.total_assigned();
        self.picks.retain(|title, _| keep(title));
        before - self.total_assigned()
    }

    /// Drop every pick.
    pub fn reset(&mut self) {
        self.picks.clear();
    }

    /// Sum of all assigned votes.
    #[must_use]
    pub fn total_assigned(&self) -> u8 {
        self.picks.values().sum()
    }

    /// Votes remaining to assign.
    #[must_use]
    pub fn remaining(&self) -> u8 {
        MAX_VOTES.saturating_sub(self.total_assigned())
    }

    /// Votes on `title`, 0 when unpicked.
    #[must_use]
    pub fn count(&self, title: &str) -> u8 {
        self.picks.get(title).copied().unwrap_or(0)
    }

    /// Whether every vote has been assigned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_assigned() == MAX_VOTES
    }

    /// The picks as sent to the store.
    #[must_use]
    pub const fn picks(&self) -> &Picks {
        &self.picks
    }
}
