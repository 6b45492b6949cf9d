//! Per-mode rules
//!
//! Each mode is a small strategy object behind [`ModeRules`]. The session
//! calls into it at round start, after each accepted guess and at round end,
//! and never branches on the mode itself.

use super::error::SessionError;
use super::profile::ProfileState;
use super::scoring::{ScoreInput, calculate_score};
use super::timer::ClockKind;
use super::unlock::UnlockPolicy;
use crate::config::EngineConfig;
use crate::core::{GuessEntry, Word};
use crate::wordlists::WordBank;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const WIN_MESSAGE: &str = "🎉 You win!";
pub const LOSS_MESSAGE: &str = "😞 You lose";
pub const TIMEOUT_MESSAGE: &str = "⏰ Time's up!";

/// Available game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Freeplay,
    Timed,
    WordOfDay,
    Streak,
}

impl GameMode {
    pub const ALL: [Self; 4] = [Self::Freeplay, Self::Timed, Self::WordOfDay, Self::Streak];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Freeplay => "freeplay",
            Self::Timed => "timed",
            Self::WordOfDay => "wordofday",
            Self::Streak => "streak",
        }
    }

    /// Parse a mode name, defaulting to freeplay for unknown names
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Freeplay)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Freeplay => "Freeplay",
            Self::Timed => "Timed",
            Self::WordOfDay => "Word of the Day",
            Self::Streak => "Streak",
        }
    }

    /// Rules object for this mode
    #[must_use]
    pub fn rules(self) -> &'static dyn ModeRules {
        match self {
            Self::Freeplay => &Freeplay,
            Self::Timed => &Timed,
            Self::WordOfDay => &WordOfDayRules,
            Self::Streak => &Streak,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "freeplay" | "free" => Ok(Self::Freeplay),
            "timed" => Ok(Self::Timed),
            "wordofday" | "wotd" | "daily" => Ok(Self::WordOfDay),
            "streak" | "endless" => Ok(Self::Streak),
            other => Err(format!("Unknown mode: {other}")),
        }
    }
}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Won,
    Lost,
    TimedOut,
}

impl RoundResult {
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// What happens after a round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Wait for the player to start the next round
    AwaitPlayer,
    /// Start the next round automatically after the display delay
    Advance,
    /// The session is finished; only a restart continues
    SessionOver,
}

/// Facts about a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub result: RoundResult,
    pub attempts: usize,
    pub word_length: usize,
    pub elapsed_secs: u32,
    pub penalties: u32,
}

/// Counters that live across rounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub profile: ProfileState,
    /// Consecutive wins in the running streak session
    pub streak_wins: u32,
}

/// Decision taken at the end of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundEnd {
    pub result: RoundResult,
    /// Points earned this round, for scored modes
    pub award: Option<u32>,
    pub continuation: Continuation,
    pub message: String,
}

/// Behaviour that differs between modes
pub trait ModeRules: Send + Sync {
    fn mode(&self) -> GameMode;

    /// Clock for each round, if any
    fn clock(&self, config: &EngineConfig) -> Option<ClockKind>;

    fn unlock_policy(&self, config: &EngineConfig) -> UnlockPolicy;

    /// Whether revealing a hint adds to the round's penalties
    fn charges_hint_penalties(&self) -> bool;

    /// Pick the target for a new round
    ///
    /// # Errors
    ///
    /// Returns an error when the bank cannot supply a target.
    fn on_round_start(
        &self,
        bank: &WordBank,
        rng: &mut StdRng,
        _today: NaiveDate,
    ) -> Result<Word, SessionError> {
        bank.random_word(rng).ok_or(SessionError::EmptyBank)
    }

    /// Terminal result after `entry` became guess number `guesses`
    fn on_guess_accepted(
        &self,
        entry: &GuessEntry,
        guesses: usize,
        max_attempts: usize,
    ) -> Option<RoundResult> {
        if entry.is_win() {
            Some(RoundResult::Won)
        } else if guesses >= max_attempts {
            Some(RoundResult::Lost)
        } else {
            None
        }
    }

    /// Whether the countdown running out ends the round
    fn ends_on_timeout(&self) -> bool {
        false
    }

    /// Settle counters for a finished round
    fn on_round_end(
        &self,
        summary: &RoundSummary,
        board: &mut Scoreboard,
        config: &EngineConfig,
    ) -> RoundEnd;
}

fn plain_message(result: RoundResult) -> String {
    match result {
        RoundResult::Won => WIN_MESSAGE.to_string(),
        RoundResult::Lost => LOSS_MESSAGE.to_string(),
        RoundResult::TimedOut => TIMEOUT_MESSAGE.to_string(),
    }
}

/// Unscored, unlimited rounds
#[derive(Debug, Clone, Copy)]
pub struct Freeplay;

impl ModeRules for Freeplay {
    fn mode(&self) -> GameMode {
        GameMode::Freeplay
    }

    fn clock(&self, _config: &EngineConfig) -> Option<ClockKind> {
        None
    }

    fn unlock_policy(&self, config: &EngineConfig) -> UnlockPolicy {
        UnlockPolicy::guess_count(config)
    }

    fn charges_hint_penalties(&self) -> bool {
        false
    }

    fn on_round_end(
        &self,
        summary: &RoundSummary,
        _board: &mut Scoreboard,
        _config: &EngineConfig,
    ) -> RoundEnd {
        RoundEnd {
            result: summary.result,
            award: None,
            continuation: Continuation::AwaitPlayer,
            message: plain_message(summary.result),
        }
    }
}

/// Race the clock; every found word counts one point
#[derive(Debug, Clone, Copy)]
pub struct Timed;

impl ModeRules for Timed {
    fn mode(&self) -> GameMode {
        GameMode::Timed
    }

    fn clock(&self, config: &EngineConfig) -> Option<ClockKind> {
        Some(ClockKind::Countdown(config.timer_seconds))
    }

    fn unlock_policy(&self, config: &EngineConfig) -> UnlockPolicy {
        UnlockPolicy::time_remaining(config)
    }

    fn charges_hint_penalties(&self) -> bool {
        true
    }

    fn ends_on_timeout(&self) -> bool {
        true
    }

    fn on_round_end(
        &self,
        summary: &RoundSummary,
        board: &mut Scoreboard,
        _config: &EngineConfig,
    ) -> RoundEnd {
        let profile = &mut board.profile;
        if summary.result.is_win() {
            profile.total_points += 1;
            return RoundEnd {
                result: summary.result,
                award: Some(1),
                continuation: Continuation::Advance,
                message: WIN_MESSAGE.to_string(),
            };
        }

        let found = profile.total_points;
        profile.record_timed(found);
        profile.total_points = 0;
        RoundEnd {
            result: summary.result,
            award: None,
            continuation: Continuation::SessionOver,
            message: format!("{}\nWords found: {found}", plain_message(summary.result)),
        }
    }
}

/// One deterministic round per language and day
#[derive(Debug, Clone, Copy)]
pub struct WordOfDayRules;

impl ModeRules for WordOfDayRules {
    fn mode(&self) -> GameMode {
        GameMode::WordOfDay
    }

    fn clock(&self, _config: &EngineConfig) -> Option<ClockKind> {
        None
    }

    fn unlock_policy(&self, config: &EngineConfig) -> UnlockPolicy {
        UnlockPolicy::guess_count(config)
    }

    fn charges_hint_penalties(&self) -> bool {
        false
    }

    fn on_round_start(
        &self,
        bank: &WordBank,
        _rng: &mut StdRng,
        today: NaiveDate,
    ) -> Result<Word, SessionError> {
        super::daily::daily_word(bank, today).ok_or(SessionError::NoDailyWord)
    }

    fn on_round_end(
        &self,
        summary: &RoundSummary,
        _board: &mut Scoreboard,
        _config: &EngineConfig,
    ) -> RoundEnd {
        RoundEnd {
            result: summary.result,
            award: None,
            continuation: Continuation::SessionOver,
            message: plain_message(summary.result),
        }
    }
}

/// Scored rounds until the first loss
#[derive(Debug, Clone, Copy)]
pub struct Streak;

impl ModeRules for Streak {
    fn mode(&self) -> GameMode {
        GameMode::Streak
    }

    fn clock(&self, _config: &EngineConfig) -> Option<ClockKind> {
        Some(ClockKind::Stopwatch)
    }

    fn unlock_policy(&self, _config: &EngineConfig) -> UnlockPolicy {
        UnlockPolicy::Always
    }

    fn charges_hint_penalties(&self) -> bool {
        true
    }

    fn on_round_end(
        &self,
        summary: &RoundSummary,
        board: &mut Scoreboard,
        config: &EngineConfig,
    ) -> RoundEnd {
        if summary.result.is_win() {
            let input = ScoreInput::win(summary.attempts, config.max_attempts, summary.word_length)
                .with_time(summary.elapsed_secs)
                .with_streak(board.streak_wins)
                .with_hard_mode(config.hard_mode);
            let award = calculate_score(&input).saturating_sub(summary.penalties);
            board.profile.streak_points = board.profile.streak_points.saturating_add(award);
            board.streak_wins += 1;
            board.profile.record_streak(board.profile.streak_points);
            return RoundEnd {
                result: summary.result,
                award: Some(award),
                continuation: Continuation::Advance,
                message: format!("{WIN_MESSAGE} +{award}"),
            };
        }

        let final_score = board.profile.streak_points;
        board.profile.record_streak(final_score);
        board.profile.streak_points = 0;
        board.streak_wins = 0;
        RoundEnd {
            result: summary.result,
            award: Some(0),
            continuation: Continuation::SessionOver,
            message: format!("{}\nStreak score: {final_score}", plain_message(summary.result)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterStatus;

    fn summary(result: RoundResult, attempts: usize) -> RoundSummary {
        RoundSummary {
            result,
            attempts,
            word_length: 5,
            elapsed_secs: 30,
            penalties: 0,
        }
    }

    #[test]
    fn names_roundtrip() {
        for mode in GameMode::ALL {
            assert_eq!(GameMode::from_name(mode.name()), mode);
            assert_eq!(mode.rules().mode(), mode);
        }
        assert_eq!(GameMode::from_name("endless"), GameMode::Streak);
        assert_eq!(GameMode::from_name("bogus"), GameMode::Freeplay);
    }

    #[test]
    fn default_terminal_detection() {
        let rules = GameMode::Freeplay.rules();
        let miss = GuessEntry::new(vec!['A'; 5], vec![LetterStatus::Absent; 5]);
        let hit = GuessEntry::new(vec!['A'; 5], vec![LetterStatus::Correct; 5]);

        assert_eq!(rules.on_guess_accepted(&miss, 3, 6), None);
        assert_eq!(rules.on_guess_accepted(&miss, 6, 6), Some(RoundResult::Lost));
        assert_eq!(rules.on_guess_accepted(&hit, 6, 6), Some(RoundResult::Won));
    }

    #[test]
    fn freeplay_is_unscored() {
        let mut board = Scoreboard::default();
        let end = Freeplay.on_round_end(
            &summary(RoundResult::Won, 3),
            &mut board,
            &EngineConfig::default(),
        );
        assert_eq!(end.award, None);
        assert_eq!(end.continuation, Continuation::AwaitPlayer);
        assert_eq!(board, Scoreboard::default());
    }

    #[test]
    fn timed_win_counts_and_advances() {
        let mut board = Scoreboard::default();
        let end = Timed.on_round_end(
            &summary(RoundResult::Won, 2),
            &mut board,
            &EngineConfig::default(),
        );
        assert_eq!(board.profile.total_points, 1);
        assert_eq!(end.continuation, Continuation::Advance);
    }

    #[test]
    fn timed_loss_records_best_and_resets() {
        let mut board = Scoreboard::default();
        board.profile.total_points = 7;
        board.profile.best_timed_score = 5;

        let end = Timed.on_round_end(
            &summary(RoundResult::TimedOut, 2),
            &mut board,
            &EngineConfig::default(),
        );
        assert_eq!(board.profile.total_points, 0);
        assert_eq!(board.profile.best_timed_score, 7);
        assert_eq!(end.continuation, Continuation::SessionOver);
        assert_eq!(end.message, "⏰ Time's up!\nWords found: 7");
    }

    #[test]
    fn streak_win_applies_penalties_and_multiplier() {
        let config = EngineConfig::default();
        let mut board = Scoreboard {
            streak_wins: 3,
            ..Scoreboard::default()
        };
        let mut round = summary(RoundResult::Won, 4);
        round.penalties = 16;

        let end = Streak.on_round_end(&round, &mut board, &config);
        // (50 + 50 + 20 + 20) * 1.03 = 144.2 -> 144, minus 16
        assert_eq!(end.award, Some(128));
        assert_eq!(board.profile.streak_points, 128);
        assert_eq!(board.profile.total_points, 0);
        assert_eq!(board.streak_wins, 4);
        assert_eq!(board.profile.best_streak_score, 128);
        assert_eq!(end.continuation, Continuation::Advance);
    }

    #[test]
    fn streak_penalties_never_go_negative() {
        let mut board = Scoreboard::default();
        let mut round = summary(RoundResult::Won, 6);
        round.penalties = 10_000;
        let end = Streak.on_round_end(&round, &mut board, &EngineConfig::default());
        assert_eq!(end.award, Some(0));
    }

    #[test]
    fn streak_loss_ends_session() {
        let mut board = Scoreboard {
            streak_wins: 5,
            ..Scoreboard::default()
        };
        board.profile.streak_points = 600;

        let end = Streak.on_round_end(
            &summary(RoundResult::Lost, 6),
            &mut board,
            &EngineConfig::default(),
        );
        assert_eq!(end.continuation, Continuation::SessionOver);
        assert_eq!(board.profile.streak_points, 0);
        assert_eq!(board.streak_wins, 0);
        assert_eq!(board.profile.best_streak_score, 600);
    }

    #[test]
    fn streak_never_ends_on_timeout() {
        assert!(!Streak.ends_on_timeout());
        assert!(Timed.ends_on_timeout());
    }
}
