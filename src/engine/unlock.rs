//! When hints become available
//!
//! Guess-count modes unlock hints after enough attempts, the timed mode after
//! enough of the clock has run down, and the streak mode never gates them.

use crate::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two local hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintKind {
    Synonyms,
    Definition,
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synonyms => f.write_str("Synonyms"),
            Self::Definition => f.write_str("Definition"),
        }
    }
}

/// Whether a hint can be used right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintGate {
    Unlocked,
    /// Unlocks after this many more guesses
    AfterGuesses(usize),
    /// Unlocks once this many more seconds have elapsed
    AfterSeconds(u32),
}

impl HintGate {
    #[must_use]
    pub const fn is_unlocked(self) -> bool {
        matches!(self, Self::Unlocked)
    }
}

impl fmt::Display for HintGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unlocked => f.write_str("available"),
            Self::AfterGuesses(1) => f.write_str("unlocks in 1 try"),
            Self::AfterGuesses(n) => write!(f, "unlocks in {n} tries"),
            Self::AfterSeconds(s) => write!(f, "unlocks in {s}s"),
        }
    }
}

/// Unlock rule for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockPolicy {
    /// Thresholds on the number of accepted guesses
    GuessCount { synonyms: usize, definition: usize },
    /// Thresholds on seconds remaining
    TimeRemaining { synonyms: u32, definition: u32 },
    Always,
}

impl UnlockPolicy {
    #[must_use]
    pub const fn guess_count(config: &EngineConfig) -> Self {
        Self::GuessCount {
            synonyms: config.synonyms_unlock_guesses,
            definition: config.definition_unlock_guesses,
        }
    }

    /// Thresholds derived from the initial timer and the configured fractions
    #[must_use]
    pub fn time_remaining(config: &EngineConfig) -> Self {
        let initial = f64::from(config.timer_seconds);
        Self::TimeRemaining {
            synonyms: (initial * config.synonyms_unlock_fraction).floor() as u32,
            definition: (initial * config.definition_unlock_fraction).floor() as u32,
        }
    }

    /// Gate for `hint` given the round's progress
    ///
    /// `time_left` is ignored by guess-count policies; a time policy with no
    /// running clock keeps the hint locked at its full distance.
    #[must_use]
    pub fn gate(&self, hint: HintKind, guesses: usize, time_left: Option<u32>) -> HintGate {
        match *self {
            Self::Always => HintGate::Unlocked,
            Self::GuessCount {
                synonyms,
                definition,
            } => {
                let needed = match hint {
                    HintKind::Synonyms => synonyms,
                    HintKind::Definition => definition,
                };
                if guesses >= needed {
                    HintGate::Unlocked
                } else {
                    HintGate::AfterGuesses(needed - guesses)
                }
            }
            Self::TimeRemaining {
                synonyms,
                definition,
            } => {
                let threshold = match hint {
                    HintKind::Synonyms => synonyms,
                    HintKind::Definition => definition,
                };
                match time_left {
                    Some(left) if left <= threshold => HintGate::Unlocked,
                    Some(left) => HintGate::AfterSeconds(left - threshold),
                    None => HintGate::AfterSeconds(u32::MAX),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_count_thresholds() {
        let policy = UnlockPolicy::guess_count(&EngineConfig::default());

        assert_eq!(policy.gate(HintKind::Synonyms, 0, None), HintGate::AfterGuesses(4));
        assert_eq!(policy.gate(HintKind::Synonyms, 3, None), HintGate::AfterGuesses(1));
        assert_eq!(policy.gate(HintKind::Synonyms, 4, None), HintGate::Unlocked);
        assert_eq!(policy.gate(HintKind::Definition, 4, None), HintGate::AfterGuesses(1));
        assert_eq!(policy.gate(HintKind::Definition, 5, None), HintGate::Unlocked);
    }

    #[test]
    fn definition_never_unlocks_before_synonyms() {
        let policy = UnlockPolicy::guess_count(&EngineConfig::default());
        for guesses in 0..=6 {
            if policy.gate(HintKind::Definition, guesses, None).is_unlocked() {
                assert!(policy.gate(HintKind::Synonyms, guesses, None).is_unlocked());
            }
        }
    }

    #[test]
    fn time_thresholds_floor_fractions() {
        let policy = UnlockPolicy::time_remaining(&EngineConfig::default());
        // floor(60 * 0.35) = 21, floor(60 * 0.20) = 12
        assert_eq!(
            policy,
            UnlockPolicy::TimeRemaining {
                synonyms: 21,
                definition: 12
            }
        );

        assert_eq!(policy.gate(HintKind::Synonyms, 0, Some(60)), HintGate::AfterSeconds(39));
        assert_eq!(policy.gate(HintKind::Synonyms, 0, Some(21)), HintGate::Unlocked);
        assert_eq!(policy.gate(HintKind::Definition, 0, Some(21)), HintGate::AfterSeconds(9));
        assert_eq!(policy.gate(HintKind::Definition, 0, Some(12)), HintGate::Unlocked);
    }

    #[test]
    fn configurable_fractions() {
        let config = EngineConfig {
            timer_seconds: 180,
            synonyms_unlock_fraction: 0.25,
            definition_unlock_fraction: 0.15,
            ..EngineConfig::default()
        };
        assert_eq!(
            UnlockPolicy::time_remaining(&config),
            UnlockPolicy::TimeRemaining {
                synonyms: 45,
                definition: 27
            }
        );
    }

    #[test]
    fn always_unlocked() {
        let policy = UnlockPolicy::Always;
        assert!(policy.gate(HintKind::Definition, 0, None).is_unlocked());
        assert!(policy.gate(HintKind::Synonyms, 0, Some(1000)).is_unlocked());
    }

    #[test]
    fn gate_messages() {
        assert_eq!(HintGate::AfterGuesses(1).to_string(), "unlocks in 1 try");
        assert_eq!(HintGate::AfterGuesses(3).to_string(), "unlocks in 3 tries");
        assert_eq!(HintGate::AfterSeconds(9).to_string(), "unlocks in 9s");
    }
}
