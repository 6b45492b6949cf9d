//! Per-letter feedback and accepted guesses

use serde::{Deserialize, Serialize};

/// Feedback for one letter
///
/// Variants are declared in order of informativeness, so the derived `Ord`
/// is the merge order used by the keyboard map:
/// `Unknown < Absent < Present < Correct`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    #[default]
    Unknown,
    Absent,
    Present,
    Correct,
}

impl LetterStatus {
    /// Monotonic upgrade: keep whichever reading tells the player more
    ///
    /// A letter already known correct stays correct, and a present letter is
    /// never demoted by a later absent reading of a duplicate.
    #[inline]
    #[must_use]
    pub fn merge(self, reading: Self) -> Self {
        self.max(reading)
    }

    /// Emoji tile for this status
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬛',
            Self::Unknown => '⬜',
        }
    }
}

/// One accepted guess with its feedback
///
/// `letters` keeps what the player typed (uppercased); `statuses` has the same
/// length. Created once per accepted guess and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessEntry {
    pub letters: Vec<char>,
    pub statuses: Vec<LetterStatus>,
}

impl GuessEntry {
    #[must_use]
    pub fn new(letters: Vec<char>, statuses: Vec<LetterStatus>) -> Self {
        debug_assert_eq!(letters.len(), statuses.len());
        Self { letters, statuses }
    }

    /// Every letter is in its correct position
    #[must_use]
    pub fn is_win(&self) -> bool {
        !self.statuses.is_empty() && self.statuses.iter().all(|&s| s == LetterStatus::Correct)
    }

    /// The guess as typed
    #[must_use]
    pub fn word(&self) -> String {
        self.letters.iter().collect()
    }

    /// Pairs of `(letter, status)`
    pub fn cells(&self) -> impl Iterator<Item = (char, LetterStatus)> + '_ {
        self.letters.iter().copied().zip(self.statuses.iter().copied())
    }

    /// Emoji row like "🟩🟨⬛⬛🟩"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.statuses.iter().map(|s| s.emoji()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn informativeness_order() {
        assert!(LetterStatus::Unknown < LetterStatus::Absent);
        assert!(LetterStatus::Absent < LetterStatus::Present);
        assert!(LetterStatus::Present < LetterStatus::Correct);
    }

    #[test]
    fn merge_never_downgrades() {
        use LetterStatus::{Absent, Correct, Present, Unknown};

        assert_eq!(Correct.merge(Absent), Correct);
        assert_eq!(Correct.merge(Present), Correct);
        assert_eq!(Present.merge(Absent), Present);
        assert_eq!(Present.merge(Correct), Correct);
        assert_eq!(Absent.merge(Present), Present);
        assert_eq!(Unknown.merge(Absent), Absent);
    }

    #[test]
    fn win_requires_all_correct() {
        let win = GuessEntry::new(vec!['A', 'B'], vec![LetterStatus::Correct; 2]);
        let miss = GuessEntry::new(
            vec!['A', 'B'],
            vec![LetterStatus::Correct, LetterStatus::Present],
        );
        assert!(win.is_win());
        assert!(!miss.is_win());
        assert!(!GuessEntry::new(vec![], vec![]).is_win());
    }

    #[test]
    fn serializes_statuses_lowercase() {
        let entry = GuessEntry::new(vec!['O', 'K'], vec![LetterStatus::Present, LetterStatus::Absent]);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"letters":["O","K"],"statuses":["present","absent"]}"#);

        let back: GuessEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn emoji_row() {
        let entry = GuessEntry::new(
            vec!['A', 'B', 'C'],
            vec![LetterStatus::Correct, LetterStatus::Present, LetterStatus::Absent],
        );
        assert_eq!(entry.to_emoji(), "🟩🟨⬛");
        assert_eq!(entry.word(), "ABC");
    }
}
