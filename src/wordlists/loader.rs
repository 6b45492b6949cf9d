//! Word bank loading utilities
//!
//! Custom banks use the same tab-separated layout as the embedded ones:
//! `WORD<TAB>definition<TAB>synonym|synonym|...`, one entry per line.

use super::{Language, WordBank, WordEntry};
use crate::core::Word;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read word bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected `word<TAB>definition<TAB>synonyms`")]
    MalformedLine { line: usize },
    #[error("line {line}: invalid word {word:?}")]
    InvalidWord { line: usize, word: String },
    #[error("word bank contains no entries")]
    Empty,
}

/// Load a word bank from a file
///
/// # Errors
///
/// Returns an error if the file cannot be read or any line is malformed.
///
/// # Examples
/// ```no_run
/// use polyword::wordlists::{Language, loader::load_from_file};
///
/// let bank = load_from_file(Language::English, "my_words.tsv").unwrap();
/// println!("Loaded {} words", bank.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(language: Language, path: P) -> Result<WordBank, BankError> {
    let content = fs::read_to_string(path)?;
    parse_bank(language, &content)
}

/// Parse word bank text
///
/// Blank lines and lines starting with `#` are skipped. The synonyms column
/// may be empty.
///
/// # Errors
///
/// Returns an error on a malformed line, an invalid word, or an empty bank.
pub fn parse_bank(language: Language, content: &str) -> Result<WordBank, BankError> {
    let mut entries = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = raw.split('\t');
        let (Some(word), Some(definition)) = (fields.next(), fields.next()) else {
            return Err(BankError::MalformedLine { line });
        };
        let synonyms = fields
            .next()
            .unwrap_or_default()
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();

        if Word::new(word).is_err() {
            return Err(BankError::InvalidWord {
                line,
                word: word.to_string(),
            });
        }

        entries.push(WordEntry::new(word, definition.trim(), synonyms));
    }

    if entries.is_empty() {
        return Err(BankError::Empty);
    }

    Ok(WordBank::new(language, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_entries() {
        let text = "apple\tA round fruit.\tpome|fruit\n\n# comment\nTRAIN\tA railway vehicle.\t\n";
        let bank = parse_bank(Language::English, text).unwrap();

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.entries()[0].word, "APPLE");
        assert_eq!(bank.entries()[0].synonyms, vec!["pome", "fruit"]);
        assert!(bank.entries()[1].synonyms.is_empty());
    }

    #[test]
    fn rejects_missing_definition() {
        let err = parse_bank(Language::English, "APPLE\n").unwrap_err();
        assert!(matches!(err, BankError::MalformedLine { line: 1 }));
    }

    #[test]
    fn rejects_invalid_word() {
        let err = parse_bank(Language::English, "AB1\tdef\t\n").unwrap_err();
        assert!(matches!(err, BankError::InvalidWord { line: 1, .. }));
    }

    #[test]
    fn rejects_empty_bank() {
        assert!(matches!(
            parse_bank(Language::French, "\n# nothing\n"),
            Err(BankError::Empty)
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PLAGE\tUne étendue de sable.\trivage|côte").unwrap();

        let bank = load_from_file(Language::French, file.path()).unwrap();
        assert_eq!(bank.language(), Language::French);
        assert_eq!(bank.find("plage").unwrap().synonyms.len(), 2);
    }
}
