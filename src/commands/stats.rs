//! Profile statistics

use super::daily::{DailyStatus, daily_status};
use crate::engine::profile::ProfileState;
use crate::engine::storage::{KeyValueStore, StorageError};
use crate::wordlists::Language;
use chrono::NaiveDate;

/// Counters plus today's daily status in every language
pub struct StatsReport {
    pub profile: ProfileState,
    pub date: NaiveDate,
    pub daily: Vec<DailyStatus>,
}

impl StatsReport {
    /// Languages whose daily round was won today
    #[must_use]
    pub fn daily_wins(&self) -> usize {
        self.daily
            .iter()
            .filter(|status| status.record.as_ref().is_some_and(|r| r.win))
            .count()
    }
}

/// Gather the report
///
/// `max_attempts` bounds what counts as a plausible daily record.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub async fn collect_stats<S: KeyValueStore + ?Sized>(
    store: &S,
    date: NaiveDate,
    max_attempts: usize,
) -> Result<StatsReport, StorageError> {
    let profile = ProfileState::load(store).await;
    let mut daily = Vec::with_capacity(Language::ALL.len());
    for language in Language::ALL {
        daily.push(daily_status(store, language, date, max_attempts).await?);
    }
    Ok(StatsReport {
        profile,
        date,
        daily,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GuessEntry, KeyboardStatusMap, evaluate};
    use crate::engine::daily::{WordOfDay, WordOfDayRecord};
    use crate::engine::storage::{BEST_STREAK_SCORE_KEY, MemoryStore};

    #[tokio::test]
    async fn report_combines_counters_and_days() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        store.set(BEST_STREAK_SCORE_KEY, "420").await.unwrap();
        let guesses: Vec<GuessEntry> = ["PLATO", "PLAYA"]
            .iter()
            .map(|g| GuessEntry::new(g.chars().collect(), evaluate(g, "PLAYA")))
            .collect();
        let record = WordOfDayRecord {
            target: "PLAYA".into(),
            statuses: KeyboardStatusMap::from_history(&guesses),
            guesses,
            win: true,
        };
        WordOfDay::new(Language::Spanish, date)
            .save(&store, &record)
            .await
            .unwrap();

        let report = collect_stats(&store, date, 6).await.unwrap();
        assert_eq!(report.profile.best_streak_score, 420);
        assert_eq!(report.daily.len(), 4);
        assert_eq!(report.daily_wins(), 1);
    }
}
