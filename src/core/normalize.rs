//! Accent stripping and case folding
//!
//! Every comparison in the engine (bank lookup, guess evaluation, hint
//! filtering) runs on the normalized form: NFD-decomposed, combining marks
//! removed, uppercased. `"Niños"`, `"NIÑOS"` and `"ninos"` all normalize to
//! `"NINOS"`.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Remove diacritics, keeping base letters
///
/// # Examples
/// ```
/// use polyword::core::strip_accents;
///
/// assert_eq!(strip_accents("Úsměv"), "Usmev");
/// assert_eq!(strip_accents("côte"), "cote");
/// ```
#[must_use]
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Canonical comparison form: accents stripped, then uppercased
#[must_use]
pub fn normalize_word(text: &str) -> String {
    strip_accents(text.trim()).to_uppercase()
}

/// Number of letters in the normalized form
///
/// Precomposed and decomposed spellings of the same word count the same.
#[must_use]
pub fn letter_count(text: &str) -> usize {
    normalize_word(text).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_common_diacritics() {
        assert_eq!(strip_accents("café"), "cafe");
        assert_eq!(strip_accents("NIÑOS"), "NINOS");
        assert_eq!(strip_accents("ŘEKOU"), "REKOU");
        assert_eq!(strip_accents("DÍTĚ"), "DITE");
    }

    #[test]
    fn plain_ascii_is_untouched() {
        assert_eq!(strip_accents("BEACH"), "BEACH");
        assert_eq!(strip_accents(""), "");
    }

    #[test]
    fn normalize_folds_case_and_trims() {
        assert_eq!(normalize_word("  státe "), "STATE");
        assert_eq!(normalize_word("Côte"), "COTE");
    }

    #[test]
    fn decomposed_input_matches_precomposed() {
        let decomposed = "NIN\u{0303}OS";
        assert_eq!(normalize_word(decomposed), normalize_word("NIÑOS"));
        assert_eq!(letter_count(decomposed), 5);
        assert_eq!(letter_count("NIÑOS"), 5);
    }
}
