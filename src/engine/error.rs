//! Recoverable engine errors
//!
//! None of these end a session. A rejected guess leaves the round untouched
//! and the caller decides how to signal it (usually a row shake).

use super::unlock::{HintGate, HintKind};
use thiserror::Error;

/// Why a guess was not played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessRejection {
    #[error("guess has {got} letters, expected {expected}")]
    InvalidLength { expected: usize, got: usize },
    #[error("word not recognized")]
    WordNotRecognized,
    #[error("no round is accepting guesses")]
    RoundNotActive,
    #[error("a previous guess is still being validated")]
    ValidationInFlight,
}

impl GuessRejection {
    /// Rejections the player caused by typing, as opposed to timing
    #[must_use]
    pub const fn should_shake(self) -> bool {
        matches!(self, Self::InvalidLength { .. } | Self::WordNotRecognized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HintError {
    #[error("{hint} {gate}")]
    Locked { hint: HintKind, gate: HintGate },
    #[error("no round is in progress")]
    RoundNotActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("word bank is empty")]
    EmptyBank,
    #[error("word bank has no word of the day")]
    NoDailyWord,
}
