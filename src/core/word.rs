//! Word representation
//!
//! A `Word` stores the uppercase display form (accents kept) together with its
//! normalized letters, which are what guess evaluation compares.

use super::normalize::normalize_word;
use std::fmt;
use thiserror::Error;

/// A target or guess word of any length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    letters: Vec<char>,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Word must contain at least one letter")]
    Empty,
    #[error("Word contains a non-letter character: {0:?}")]
    InvalidCharacter(char),
}

impl Word {
    /// Create a new Word from a string
    ///
    /// # Errors
    /// Returns `WordError` if the text is empty or contains anything other
    /// than letters (after accent stripping).
    ///
    /// # Examples
    /// ```
    /// use polyword::core::Word;
    ///
    /// let word = Word::new("niños").unwrap();
    /// assert_eq!(word.text(), "NIÑOS");
    /// assert_eq!(word.normalized(), "NINOS");
    ///
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let text = text.as_ref().trim().to_uppercase();
        let letters: Vec<char> = normalize_word(&text).chars().collect();

        if letters.is_empty() {
            return Err(WordError::Empty);
        }
        if let Some(&bad) = letters.iter().find(|c| !c.is_alphabetic()) {
            return Err(WordError::InvalidCharacter(bad));
        }

        Ok(Self { text, letters })
    }

    /// Display form (uppercase, accents kept)
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized form as a string
    #[must_use]
    pub fn normalized(&self) -> String {
        self.letters.iter().collect()
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
