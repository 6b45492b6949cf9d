//! Local hint lookup
//!
//! Hints come only from the loaded word bank. Nothing here touches the
//! network.

use crate::core::normalize_word;
use crate::wordlists::WordBank;
use regex::RegexBuilder;

/// Placeholder written over the answer inside a definition
pub const MASK: &str = "_____";

/// Synonyms of `target`, excluding any that normalize to the target itself
///
/// Returns an empty list when the target is not in the bank.
#[must_use]
pub fn synonyms_for(target: &str, bank: &WordBank) -> Vec<String> {
    let key = normalize_word(target);
    bank.find(target)
        .map(|entry| {
            entry
                .synonyms
                .iter()
                .filter(|synonym| normalize_word(synonym) != key)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Definition of `target` with every occurrence of the word masked
///
/// Both the accented and the stripped spelling are masked, ignoring case.
///
/// # Examples
/// ```
/// use polyword::engine::hints::definition_for;
/// use polyword::wordlists::{Language, WordBank, WordEntry};
///
/// let bank = WordBank::new(
///     Language::English,
///     vec![WordEntry::new("TIGER", "A big cat. Tigers hunt alone.", vec![])],
/// );
/// assert_eq!(
///     definition_for("tiger", &bank).as_deref(),
///     Some("A big cat. _____s hunt alone.")
/// );
/// ```
#[must_use]
pub fn definition_for(target: &str, bank: &WordBank) -> Option<String> {
    let entry = bank.find(target)?;
    Some(mask_word(&entry.definition, &entry.word))
}

/// Replace `word` in `text`, case-insensitively, with [`MASK`]
#[must_use]
pub fn mask_word(text: &str, word: &str) -> String {
    let mut forms = vec![word.trim().to_string(), normalize_word(word)];
    forms.retain(|form| !form.is_empty());
    forms.dedup_by(|a, b| a.to_uppercase() == b.to_uppercase());
    if forms.is_empty() {
        return text.to_string();
    }

    let pattern = forms
        .iter()
        .map(|form| regex::escape(form))
        .collect::<Vec<_>>()
        .join("|");
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.replace_all(text, MASK).into_owned(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::{Language, WordEntry};

    fn bank() -> WordBank {
        WordBank::new(
            Language::Spanish,
            vec![
                WordEntry::new(
                    "NIÑOS",
                    "Los niños juegan. Los NINOS también.",
                    vec!["chicos".into(), "Niños".into(), "críos".into()],
                ),
                WordEntry::new("PLAYA", "Orilla del mar.", vec![]),
            ],
        )
    }

    #[test]
    fn synonyms_exclude_target() {
        assert_eq!(synonyms_for("ninos", &bank()), vec!["chicos", "críos"]);
    }

    #[test]
    fn synonyms_unknown_word_is_empty() {
        assert!(synonyms_for("GATOS", &bank()).is_empty());
        assert!(synonyms_for("PLAYA", &bank()).is_empty());
    }

    #[test]
    fn definition_masks_both_spellings() {
        assert_eq!(
            definition_for("NIÑOS", &bank()).as_deref(),
            Some("Los _____ juegan. Los _____ también.")
        );
    }

    #[test]
    fn definition_without_target_is_unchanged() {
        assert_eq!(definition_for("playa", &bank()).as_deref(), Some("Orilla del mar."));
        assert_eq!(definition_for("GATOS", &bank()), None);
    }

    #[test]
    fn mask_escapes_regex_characters() {
        assert_eq!(mask_word("a.b a+b", "A.B"), "_____ a+b");
    }
}
