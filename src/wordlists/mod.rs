//! Word banks for each supported language
//!
//! Provides embedded word banks compiled into the binary, plus loading of
//! custom banks from disk. A bank is read-only once loaded.

mod embedded;
pub mod loader;

use crate::core::{Word, normalize_word};
use rand::Rng;
use rand::prelude::IndexedRandom;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported game languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "cz")]
    Czech,
}

impl Language {
    pub const ALL: [Self; 4] = [Self::English, Self::French, Self::Spanish, Self::Czech];

    /// Short code used in storage keys and on the command line
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::Spanish => "es",
            Self::Czech => "cz",
        }
    }

    /// Language tag understood by the spell-check service
    #[must_use]
    pub const fn spellcheck_code(self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::French => "fr",
            Self::Spanish => "es",
            Self::Czech => "cs",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::French => "Français",
            Self::Spanish => "Español",
            Self::Czech => "Čeština",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "fr" | "french" => Ok(Self::French),
            "es" | "spanish" => Ok(Self::Spanish),
            "cz" | "cs" | "czech" => Ok(Self::Czech),
            other => Err(format!("Unsupported language: {other}")),
        }
    }
}

/// One answer word with its hint material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub definition: String,
    pub synonyms: Vec<String>,
}

impl WordEntry {
    #[must_use]
    pub fn new(word: impl Into<String>, definition: impl Into<String>, synonyms: Vec<String>) -> Self {
        Self {
            word: word.into().trim().to_uppercase(),
            definition: definition.into(),
            synonyms,
        }
    }

    /// Normalized comparison key for this entry
    #[must_use]
    pub fn key(&self) -> String {
        normalize_word(&self.word)
    }
}

/// Per-language list of answer words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    language: Language,
    entries: Vec<WordEntry>,
}

impl WordBank {
    #[must_use]
    pub fn new(language: Language, entries: Vec<WordEntry>) -> Self {
        Self { language, entries }
    }

    /// The bank compiled into the binary for `language`
    ///
    /// # Examples
    /// ```
    /// use polyword::wordlists::{Language, WordBank};
    ///
    /// let bank = WordBank::embedded(Language::English);
    /// assert!(bank.find("beach").is_some());
    /// ```
    #[must_use]
    pub fn embedded(language: Language) -> Self {
        let raw = match language {
            Language::English => embedded::EN,
            Language::French => embedded::FR,
            Language::Spanish => embedded::ES,
            Language::Czech => embedded::CZ,
        };
        let entries = raw
            .iter()
            .map(|&(word, definition, synonyms)| {
                WordEntry::new(
                    word,
                    definition,
                    synonyms.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect();
        Self::new(language, entries)
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    /// Find an entry by normalized-word equality
    #[must_use]
    pub fn find(&self, word: &str) -> Option<&WordEntry> {
        let key = normalize_word(word);
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Every bank word, both with and without accents, uppercased
    #[must_use]
    pub fn normalized_set(&self) -> FxHashSet<String> {
        let mut set = FxHashSet::default();
        for entry in &self.entries {
            set.insert(entry.key());
            set.insert(entry.word.to_uppercase());
        }
        set
    }

    /// Pick a uniformly random target
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Word> {
        self.entries
            .choose(rng)
            .and_then(|entry| Word::new(&entry.word).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn embedded_banks_are_populated() {
        for language in Language::ALL {
            let bank = WordBank::embedded(language);
            assert!(!bank.is_empty(), "{language} bank is empty");
            assert_eq!(bank.language(), language);
        }
    }

    #[test]
    fn embedded_words_are_valid() {
        for language in Language::ALL {
            for entry in WordBank::embedded(language).entries() {
                assert!(
                    Word::new(&entry.word).is_ok(),
                    "{language}: '{}' is not a valid word",
                    entry.word
                );
                assert!(!entry.definition.is_empty());
            }
        }
    }

    #[test]
    fn find_ignores_case_and_accents() {
        let bank = WordBank::embedded(Language::Spanish);
        assert_eq!(bank.find("ninos").unwrap().word, "NIÑOS");
        assert_eq!(bank.find("Niños").unwrap().word, "NIÑOS");
        assert!(bank.find("ZZZZZ").is_none());
    }

    #[test]
    fn normalized_set_holds_both_spellings() {
        let bank = WordBank::embedded(Language::Czech);
        let set = bank.normalized_set();
        assert!(set.contains("ÚSMĚV"));
        assert!(set.contains("USMEV"));
    }

    #[test]
    fn random_word_comes_from_bank() {
        let bank = WordBank::embedded(Language::French);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let word = bank.random_word(&mut rng).unwrap();
            assert!(bank.find(word.text()).is_some());
        }
        let empty = WordBank::new(Language::French, vec![]);
        assert!(empty.random_word(&mut rng).is_none());
    }

    #[test]
    fn language_codes_roundtrip() {
        for language in Language::ALL {
            assert_eq!(language.code().parse::<Language>(), Ok(language));
        }
        assert_eq!("cs".parse::<Language>(), Ok(Language::Czech));
        assert!("de".parse::<Language>().is_err());
    }
}
