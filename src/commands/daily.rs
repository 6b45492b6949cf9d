//! Word-of-the-day status and reset

use crate::engine::daily::{WordOfDay, WordOfDayRecord};
use crate::engine::storage::{KeyValueStore, StorageError};
use crate::wordlists::Language;
use chrono::NaiveDate;

/// Today's daily round for one language
pub struct DailyStatus {
    pub language: Language,
    pub date: NaiveDate,
    pub key: String,
    pub record: Option<WordOfDayRecord>,
}

impl DailyStatus {
    #[must_use]
    pub const fn is_played(&self) -> bool {
        self.record.is_some()
    }
}

/// Look up the daily record for `language` on `date`
///
/// Records that could not come out of a round of `max_attempts` guesses are
/// discarded.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub async fn daily_status<S: KeyValueStore + ?Sized>(
    store: &S,
    language: Language,
    date: NaiveDate,
    max_attempts: usize,
) -> Result<DailyStatus, StorageError> {
    let wotd = WordOfDay::new(language, date);
    Ok(DailyStatus {
        language,
        date,
        key: wotd.key(),
        record: wotd.load(store, max_attempts).await?,
    })
}

/// Delete the daily record so the day can be replayed
///
/// Returns whether a record existed.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub async fn reset_daily<S: KeyValueStore + ?Sized>(
    store: &S,
    language: Language,
    date: NaiveDate,
) -> Result<bool, StorageError> {
    let wotd = WordOfDay::new(language, date);
    let existed = store.get(&wotd.key()).await?.is_some();
    wotd.clear(store).await?;
    Ok(existed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GuessEntry, KeyboardStatusMap, LetterStatus};
    use crate::engine::storage::MemoryStore;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    #[tokio::test]
    async fn status_of_unplayed_day() {
        let store = MemoryStore::new();
        let status = daily_status(&store, Language::French, date(), 6).await.unwrap();
        assert!(!status.is_played());
        assert_eq!(status.key, "wotd-fr-2024-02-29");
    }

    #[tokio::test]
    async fn reset_removes_record() {
        let store = MemoryStore::new();
        let guesses = vec![GuessEntry::new(
            "PLAGE".chars().collect(),
            vec![LetterStatus::Correct; 5],
        )];
        let record = WordOfDayRecord {
            target: "PLAGE".into(),
            statuses: KeyboardStatusMap::from_history(&guesses),
            guesses,
            win: true,
        };
        WordOfDay::new(Language::French, date())
            .save(&store, &record)
            .await
            .unwrap();

        assert!(daily_status(&store, Language::French, date(), 6).await.unwrap().is_played());
        assert!(reset_daily(&store, Language::French, date()).await.unwrap());
        assert!(!reset_daily(&store, Language::French, date()).await.unwrap());
        assert!(!daily_status(&store, Language::French, date(), 6).await.unwrap().is_played());
    }
}
