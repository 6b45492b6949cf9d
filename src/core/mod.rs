//! Core domain types for the word game
//!
//! This module contains the pure domain types: no I/O, no clocks, no
//! randomness. Everything here is deterministic and directly testable.

mod keyboard;
mod normalize;
mod pattern;
mod status;
mod word;

pub use keyboard::{KEYBOARD_ROWS, KeyboardStatusMap};
pub use normalize::{letter_count, normalize_word, strip_accents};
pub use pattern::evaluate;
pub use status::{GuessEntry, LetterStatus};
pub use word::{Word, WordError};
