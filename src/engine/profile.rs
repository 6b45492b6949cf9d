//! Cross-session counters
//!
//! Read once at startup, then kept in memory and mirrored to storage whenever
//! a counter changes. The store is never consulted again mid-session.

use super::storage::{
    BEST_STREAK_SCORE_KEY, BEST_TIMED_SCORE_KEY, KeyValueStore, STREAK_POINTS_KEY, StorageError,
    TOTAL_POINTS_KEY,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileState {
    /// Words found in the running timed session
    pub total_points: u32,
    /// Score of the running streak session
    pub streak_points: u32,
    pub best_timed_score: u32,
    pub best_streak_score: u32,
}

impl ProfileState {
    /// Read all counters; missing or unreadable values count as zero
    pub async fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            total_points: read_counter(store, TOTAL_POINTS_KEY).await,
            streak_points: read_counter(store, STREAK_POINTS_KEY).await,
            best_timed_score: read_counter(store, BEST_TIMED_SCORE_KEY).await,
            best_streak_score: read_counter(store, BEST_STREAK_SCORE_KEY).await,
        }
    }

    /// Write every counter that differs from `previous`
    ///
    /// # Errors
    ///
    /// Returns the first storage failure; earlier writes are kept.
    pub async fn mirror<S: KeyValueStore + ?Sized>(
        &self,
        previous: &Self,
        store: &S,
    ) -> Result<(), StorageError> {
        for (key, old, new) in [
            (TOTAL_POINTS_KEY, previous.total_points, self.total_points),
            (STREAK_POINTS_KEY, previous.streak_points, self.streak_points),
            (
                BEST_TIMED_SCORE_KEY,
                previous.best_timed_score,
                self.best_timed_score,
            ),
            (
                BEST_STREAK_SCORE_KEY,
                previous.best_streak_score,
                self.best_streak_score,
            ),
        ] {
            if old != new {
                store.set(key, &new.to_string()).await?;
            }
        }
        Ok(())
    }

    /// Zero both running counters; best scores are kept
    pub fn reset_running(&mut self) {
        self.total_points = 0;
        self.streak_points = 0;
    }

    /// Raise the timed best score if `score` beats it
    pub fn record_timed(&mut self, score: u32) -> bool {
        let improved = score > self.best_timed_score;
        self.best_timed_score = self.best_timed_score.max(score);
        improved
    }

    /// Raise the streak best score if `score` beats it
    pub fn record_streak(&mut self, score: u32) -> bool {
        let improved = score > self.best_streak_score;
        self.best_streak_score = self.best_streak_score.max(score);
        improved
    }
}

async fn read_counter<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> u32 {
    match store.get(key).await {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring unparsable counter");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            warn!(key, error = %e, "failed to read counter");
            0
        }
    }
}
