//! Word of the day
//!
//! The daily target is a pure function of the calendar date and the bank, so
//! every device agrees without coordination. Completion is recorded once per
//! language and date.

use super::storage::{KeyValueStore, StorageError};
use crate::core::{GuessEntry, KeyboardStatusMap, Word};
use crate::wordlists::{Language, WordBank};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Day zero of the daily rotation
pub const ROTATION_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2020, 1, 1) {
    Some(date) => date,
    None => panic!("invalid rotation epoch"),
};

/// Whole days between the rotation epoch and `date` (negative before it)
#[must_use]
pub fn days_since_epoch(date: NaiveDate) -> i64 {
    (date - ROTATION_EPOCH).num_days()
}

/// Deterministic target for `date`
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use polyword::engine::daily::daily_word;
/// use polyword::wordlists::{Language, WordBank};
///
/// let bank = WordBank::embedded(Language::French);
/// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(daily_word(&bank, date), daily_word(&bank, date));
/// ```
#[must_use]
pub fn daily_word(bank: &WordBank, date: NaiveDate) -> Option<Word> {
    if bank.is_empty() {
        return None;
    }
    let index = days_since_epoch(date).rem_euclid(bank.len() as i64) as usize;
    bank.get(index).and_then(|entry| Word::new(&entry.word).ok())
}

/// Storage key for the record of `language` on `date`
#[must_use]
pub fn today_key(language: Language, date: NaiveDate) -> String {
    format!(
        "wotd-{}-{:04}-{:02}-{:02}",
        language.code(),
        date.year(),
        date.month(),
        date.day()
    )
}

/// Persisted outcome of one completed daily round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOfDayRecord {
    pub target: String,
    pub guesses: Vec<GuessEntry>,
    pub statuses: KeyboardStatusMap,
    pub win: bool,
}

impl WordOfDayRecord {
    /// Whether the record could have come out of a finished round
    ///
    /// The target must be a word, every guess must match its length, the
    /// round must have stopped at the first winning guess, and a lost round
    /// must have used every attempt.
    #[must_use]
    pub fn is_consistent(&self, max_attempts: usize) -> bool {
        let Ok(target) = Word::new(&self.target) else {
            return false;
        };
        let Some((last, earlier)) = self.guesses.split_last() else {
            return false;
        };
        if self.guesses.len() > max_attempts {
            return false;
        }
        let shapes_match = self.guesses.iter().all(|guess| {
            guess.letters.len() == target.len() && guess.statuses.len() == target.len()
        });
        if !shapes_match || earlier.iter().any(GuessEntry::is_win) {
            return false;
        }
        if self.win {
            last.is_win()
        } else {
            !last.is_win() && self.guesses.len() == max_attempts
        }
    }
}

/// Daily schedule for one language on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordOfDay {
    language: Language,
    date: NaiveDate,
}

impl WordOfDay {
    #[must_use]
    pub const fn new(language: Language, date: NaiveDate) -> Self {
        Self { language, date }
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn key(&self) -> String {
        today_key(self.language, self.date)
    }

    /// Load today's record
    ///
    /// A record that fails to parse or could not have come out of a round of
    /// at most `max_attempts` guesses is deleted and the day is treated as
    /// unplayed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read.
    pub async fn load<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        max_attempts: usize,
    ) -> Result<Option<WordOfDayRecord>, StorageError> {
        let key = self.key();
        let Some(raw) = store.get(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<WordOfDayRecord>(&raw) {
            Ok(record) if record.is_consistent(max_attempts) => {
                debug!(%key, win = record.win, "restored daily record");
                Ok(Some(record))
            }
            Ok(_) | Err(_) => {
                warn!(%key, "discarding corrupted daily record");
                if let Err(e) = store.remove(&key).await {
                    warn!(%key, error = %e, "failed to remove corrupted daily record");
                }
                Ok(None)
            }
        }
    }

    /// Persist today's record
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub async fn save<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        record: &WordOfDayRecord,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string(record)?;
        store.set(&self.key(), &json).await
    }

    /// Delete today's record so the day can be replayed
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn clear<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), StorageError> {
        store.remove(&self.key()).await
    }
}
