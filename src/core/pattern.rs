//! Guess evaluation
//!
//! One `LetterStatus` per position, produced by comparing a guess against the
//! target with standard duplicate-aware Wordle rules.

use super::LetterStatus;
use rustc_hash::FxHashMap;

/// Evaluate a pre-normalized guess against a pre-normalized target
///
/// Both strings must already be uppercased with accents stripped and have the
/// same number of letters; a guess of the wrong length is rejected before it
/// reaches the evaluator.
///
/// # Algorithm
/// 1. First pass: mark all exact matches (correct) and remove them from the available pool
/// 2. Second pass: mark present-but-misplaced letters while the pool still has them
///
/// # Examples
/// ```
/// use polyword::core::{LetterStatus, evaluate};
///
/// let statuses = evaluate("CRANE", "SLATE");
/// assert_eq!(statuses[2], LetterStatus::Correct);
/// assert_eq!(statuses[4], LetterStatus::Correct);
/// ```
#[must_use]
pub fn evaluate(guess: &str, target: &str) -> Vec<LetterStatus> {
    let guess: Vec<char> = guess.chars().collect();
    let target: Vec<char> = target.chars().collect();
    debug_assert_eq!(guess.len(), target.len(), "guess and target lengths differ");

    let mut result = vec![LetterStatus::Absent; guess.len()];
    let mut available = FxHashMap::<char, u8>::default();
    for &ch in &target {
        *available.entry(ch).or_insert(0) += 1;
    }

    // First pass: exact position matches
    for (i, (&g, &t)) in guess.iter().zip(&target).enumerate() {
        if g == t {
            result[i] = LetterStatus::Correct;
            if let Some(count) = available.get_mut(&g) {
                *count = count.saturating_sub(1);
            }
        }
    }

    // Second pass: misplaced letters, consuming from what is left
    for (i, &g) in guess.iter().enumerate() {
        if result[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(count) = available.get_mut(&g)
            && *count > 0
        {
            result[i] = LetterStatus::Present;
            *count -= 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize_word;
    use LetterStatus::{Absent, Correct, Present};

    fn calc(guess: &str, answer: &str) -> Vec<LetterStatus> {
        evaluate(&normalize_word(guess), &normalize_word(answer))
    }

    #[test]
    fn all_absent() {
        assert_eq!(calc("abcde", "fghij"), vec![Absent; 5]);
    }

    #[test]
    fn all_correct() {
        assert_eq!(calc("crane", "crane"), vec![Correct; 5]);
    }

    #[test]
    fn duplicate_letters_green_takes_priority() {
        // ROBOT vs ERROR: the single O in the target is claimed by the exact
        // match at position 3, so the earlier O gets nothing.
        assert_eq!(calc("robot", "error"), vec![Present, Absent, Absent, Correct, Absent]);
    }

    #[test]
    fn duplicate_letters_present_limited_by_target_count() {
        // SPEED vs ERASE: target has two E's, both misplaced in the guess
        assert_eq!(calc("speed", "erase"), vec![Present, Absent, Present, Present, Absent]);

        // LLAMA vs HELLO: two L's available, two L's reported
        assert_eq!(calc("llama", "hello"), vec![Present, Present, Absent, Absent, Absent]);

        // EEEEE vs APPLE: only the final E is reported
        assert_eq!(calc("eeeee", "apple"), vec![Absent, Absent, Absent, Absent, Correct]);
    }

    #[test]
    fn matches_never_exceed_target_occurrences() {
        let words = ["ERROR", "ROBOT", "APPLE", "EERIE", "LEVEL", "LLAMA", "GEESE", "MAMMA"];
        for guess in words {
            for answer in words {
                let statuses = evaluate(guess, answer);
                for letter in guess.chars() {
                    let matched = guess
                        .chars()
                        .zip(&statuses)
                        .filter(|&(l, &s)| l == letter && s != Absent)
                        .count();
                    let available = answer.chars().filter(|&c| c == letter).count();
                    assert!(
                        matched <= available,
                        "{guess} vs {answer}: {letter} matched {matched} times"
                    );
                }
            }
        }
    }

    #[test]
    fn accents_do_not_affect_colors() {
        assert_eq!(calc("ninos", "niños"), vec![Correct; 5]);
        assert_eq!(calc("rekou", "řekou"), vec![Correct; 5]);
    }

    #[test]
    fn evaluate_on_normalized_strings() {
        assert_eq!(
            evaluate("TRAIN", "APPLE"),
            vec![Absent, Absent, Present, Absent, Absent]
        );
        assert_eq!(
            evaluate("CHAIR", "APPLE"),
            vec![Absent, Absent, Present, Absent, Absent]
        );
        assert_eq!(evaluate("APPLE", "APPLE"), vec![Correct; 5]);
    }

    #[test]
    fn variable_word_lengths() {
        assert_eq!(evaluate("DITE", "DITE"), vec![Correct; 4]);
        assert_eq!(
            evaluate("ABCDEF", "FEDCBA"),
            vec![Present; 6]
        );
    }
}
