//! Keyboard-wide letter status aggregation

use super::{GuessEntry, LetterStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// AZERTY rows used by the on-screen keyboard
pub const KEYBOARD_ROWS: [&str; 3] = ["AZERTYUIOP", "QSDFGHJKLM", "WXCVBN"];

/// Best-known status of every letter guessed so far
///
/// Keys are single uppercase letters stored as strings, which keeps the JSON
/// form a plain object (`{"A":"correct"}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyboardStatusMap(BTreeMap<String, LetterStatus>);

impl KeyboardStatusMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the map from a full guess history
    #[must_use]
    pub fn from_history(history: &[GuessEntry]) -> Self {
        history.iter().fold(Self::new(), |map, entry| map.merged(entry))
    }

    /// Status of a letter, `Unknown` when never guessed
    #[must_use]
    pub fn get(&self, letter: char) -> LetterStatus {
        let mut buf = [0u8; 4];
        self.0
            .get(&*letter.encode_utf8(&mut buf))
            .copied()
            .unwrap_or_default()
    }

    /// Fold one guess into the map without ever downgrading a letter
    pub fn merge(&mut self, entry: &GuessEntry) {
        for (letter, status) in entry.cells() {
            let slot = self.0.entry(letter.to_string()).or_default();
            *slot = slot.merge(status);
        }
    }

    /// Functional form of [`merge`](Self::merge)
    #[must_use]
    pub fn merged(mut self, entry: &GuessEntry) -> Self {
        self.merge(entry);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Letters in alphabetical order with their status
    pub fn iter(&self) -> impl Iterator<Item = (&str, LetterStatus)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}
