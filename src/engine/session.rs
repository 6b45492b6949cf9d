//! Session state machine
//!
//! A [`Session`] owns everything about one mode and language: the current
//! round, the typed input, hint usage and the cross-round counters. It is
//! purely synchronous. Anything that suspends (validation, storage, clocks)
//! lives in the async driver, which feeds results back in and relies on the
//! round id to detect that the world moved on while it was waiting.

use super::daily::WordOfDayRecord;
use super::error::{GuessRejection, HintError, SessionError};
use super::hints::{definition_for, synonyms_for};
use super::modes::{
    Continuation, GameMode, LOSS_MESSAGE, ModeRules, RoundEnd, RoundResult, RoundSummary,
    Scoreboard, WIN_MESSAGE,
};
use super::profile::ProfileState;
use super::scoring::{definition_penalty, synonym_penalty};
use super::timer::{ClockKind, TimerEvent};
use super::unlock::{HintGate, HintKind};
use super::validator::Verdict;
use crate::config::EngineConfig;
use crate::core::{GuessEntry, KeyboardStatusMap, Word, evaluate, letter_count, normalize_word};
use crate::wordlists::WordBank;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

const AUTO_WIN_MESSAGE: &str = "🎉 Auto win";
const AUTO_LOSS_MESSAGE: &str = "😞 Auto loss";

/// Generation counter identifying one round
///
/// Every transition that invalidates in-flight work (new round, loading,
/// teardown) moves to a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundId(u64);

impl RoundId {
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    #[must_use]
    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    /// Waiting for the stored daily record
    Loading,
    InProgress,
    RoundOver,
}

/// A guess that passed the synchronous checks and awaits validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGuess {
    pub round: RoundId,
    pub text: String,
}

/// Result of an accepted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedGuess {
    pub entry: GuessEntry,
    pub round_end: Option<RoundEnd>,
}

/// Result of feeding a clock event into the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerOutcome {
    /// The event belongs to a round that no longer runs
    Stale,
    Tick,
    RoundEnded(RoundEnd),
}

pub struct Session {
    mode: GameMode,
    rules: &'static dyn ModeRules,
    config: EngineConfig,
    bank: Arc<WordBank>,
    rng: StdRng,

    phase: Phase,
    round: RoundId,
    target: Option<Word>,
    guesses: Vec<GuessEntry>,
    keyboard: KeyboardStatusMap,
    input: String,
    penalties: u32,
    synonyms_revealed: bool,
    definition_revealed: bool,
    time_left: Option<u32>,
    elapsed: u32,
    validating: bool,
    network_degraded: bool,
    outcome: Option<RoundEnd>,
    restored: bool,

    board: Scoreboard,
}

impl Session {
    #[must_use]
    pub fn new(
        mode: GameMode,
        bank: Arc<WordBank>,
        config: EngineConfig,
        profile: ProfileState,
        rng: StdRng,
    ) -> Self {
        Self {
            mode,
            rules: mode.rules(),
            config,
            bank,
            rng,
            phase: Phase::Setup,
            round: RoundId::first(),
            target: None,
            guesses: Vec::new(),
            keyboard: KeyboardStatusMap::new(),
            input: String::new(),
            penalties: 0,
            synonyms_revealed: false,
            definition_revealed: false,
            time_left: None,
            elapsed: 0,
            validating: false,
            network_degraded: false,
            outcome: None,
            restored: false,
            board: Scoreboard {
                profile,
                streak_wins: 0,
            },
        }
    }

    fn clear_round(&mut self) {
        self.guesses.clear();
        self.keyboard = KeyboardStatusMap::new();
        self.input.clear();
        self.penalties = 0;
        self.synonyms_revealed = false;
        self.definition_revealed = false;
        self.elapsed = 0;
        self.time_left = match self.clock_kind() {
            Some(ClockKind::Countdown(secs)) => Some(secs),
            _ => None,
        };
        self.validating = false;
        self.network_degraded = false;
        self.outcome = None;
        self.restored = false;
    }

    /// Pick a target and start a fresh round
    ///
    /// Cross-round counters are kept.
    ///
    /// # Errors
    ///
    /// Returns an error when the bank cannot supply a target; the session is
    /// then left in `Setup`.
    pub fn start_round(&mut self, today: NaiveDate) -> Result<RoundId, SessionError> {
        self.round = self.round.next();
        self.clear_round();
        let target = match self.rules.on_round_start(&self.bank, &mut self.rng, today) {
            Ok(target) => target,
            Err(e) => {
                self.phase = Phase::Setup;
                self.target = None;
                return Err(e);
            }
        };
        info!(mode = %self.mode, round = %self.round, length = target.len(), "round started");
        debug!(target = %target, "round target");
        self.target = Some(target);
        self.phase = Phase::InProgress;
        Ok(self.round)
    }

    /// Enter the loading state while a stored record is fetched
    pub fn begin_loading(&mut self) -> RoundId {
        self.round = self.round.next();
        self.clear_round();
        self.target = None;
        self.phase = Phase::Loading;
        self.round
    }

    /// Restore a completed daily round; no further input is accepted
    ///
    /// # Errors
    ///
    /// Returns an error if the record's target is not a valid word.
    pub fn restore(&mut self, record: WordOfDayRecord) -> Result<(), SessionError> {
        let target = Word::new(&record.target).map_err(|_| SessionError::NoDailyWord)?;
        self.round = self.round.next();
        self.clear_round();
        let result = if record.win {
            RoundResult::Won
        } else {
            RoundResult::Lost
        };
        self.target = Some(target);
        self.guesses = record.guesses;
        self.keyboard = record.statuses;
        self.outcome = Some(RoundEnd {
            result,
            award: None,
            continuation: Continuation::SessionOver,
            message: if record.win { WIN_MESSAGE } else { LOSS_MESSAGE }.to_string(),
        });
        self.restored = true;
        self.phase = Phase::RoundOver;
        info!(mode = %self.mode, win = record.win, "restored completed round");
        Ok(())
    }

    /// Append a letter to the input; ignored once the row is full
    pub fn press_letter(&mut self, letter: char) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        let Some(target) = &self.target else {
            return false;
        };
        let upper: String = letter.to_uppercase().collect();
        let normalized_text = normalize_word(&upper);
        let mut normalized = normalized_text.chars();
        let is_single_letter = matches!(
            (normalized.next(), normalized.next()),
            (Some(c), None) if c.is_alphabetic()
        );
        if !is_single_letter || self.input.chars().count() >= target.len() {
            return false;
        }
        self.input.push_str(&upper);
        true
    }

    pub fn delete_letter(&mut self) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        self.input.pop().is_some()
    }

    /// Synchronous checks before validation; sets the re-entrancy guard
    ///
    /// # Errors
    ///
    /// Rejects when no round is running, a validation is already in flight,
    /// or the input length does not match the target.
    pub fn begin_submission(&mut self) -> Result<PendingGuess, GuessRejection> {
        if self.phase != Phase::InProgress {
            return Err(GuessRejection::RoundNotActive);
        }
        let Some(target) = &self.target else {
            return Err(GuessRejection::RoundNotActive);
        };
        if self.validating {
            return Err(GuessRejection::ValidationInFlight);
        }
        let got = self.input.chars().count();
        if got != target.len() {
            return Err(GuessRejection::InvalidLength {
                expected: target.len(),
                got,
            });
        }
        self.validating = true;
        Ok(PendingGuess {
            round: self.round,
            text: self.input.clone(),
        })
    }

    /// Apply the validator's verdict for `pending`
    ///
    /// The round may have ended or been replaced while validation ran; in
    /// that case nothing is appended.
    ///
    /// # Errors
    ///
    /// Returns `RoundNotActive` for a stale guess and `WordNotRecognized`
    /// when the verdict does not accept the word.
    pub fn complete_submission(
        &mut self,
        pending: &PendingGuess,
        verdict: Verdict,
    ) -> Result<AcceptedGuess, GuessRejection> {
        if pending.round != self.round || self.phase != Phase::InProgress {
            debug!(round = %pending.round, current = %self.round, "dropping stale guess");
            return Err(GuessRejection::RoundNotActive);
        }
        self.validating = false;

        if !verdict.is_accepted() {
            if verdict == Verdict::NetworkDegraded {
                self.network_degraded = true;
            }
            debug!(guess = %pending.text, ?verdict, "guess rejected");
            return Err(GuessRejection::WordNotRecognized);
        }

        let Some(entry) = self.push_entry(&pending.text) else {
            return Err(GuessRejection::RoundNotActive);
        };
        self.input.clear();

        let round_end = self
            .rules
            .on_guess_accepted(&entry, self.guesses.len(), self.config.max_attempts)
            .map(|result| self.finish_round(result));
        Ok(AcceptedGuess { entry, round_end })
    }

    /// Evaluate `text` against the target and append it to the board
    fn push_entry(&mut self, text: &str) -> Option<GuessEntry> {
        let target = self.target.as_ref()?;
        let statuses = evaluate(&normalize_word(text), &target.normalized());
        let entry = GuessEntry::new(text.chars().collect(), statuses);
        self.keyboard.merge(&entry);
        self.guesses.push(entry.clone());
        Some(entry)
    }

    /// Bank words of the target's length that do not match it
    fn filler_words(&self) -> Vec<String> {
        let Some(target) = &self.target else {
            return Vec::new();
        };
        let answer = target.normalized();
        self.bank
            .entries()
            .iter()
            .filter(|entry| letter_count(&entry.word) == target.len() && entry.key() != answer)
            .map(|entry| entry.word.clone())
            .collect()
    }

    /// Append wrong words until the board holds `rows` guesses
    fn fill_rows(&mut self, rows: usize) -> bool {
        let missing = rows.saturating_sub(self.guesses.len());
        if missing == 0 {
            return true;
        }
        let fillers = self.filler_words();
        if fillers.is_empty() {
            return false;
        }
        for word in fillers.iter().cycle().take(missing) {
            self.push_entry(word);
        }
        true
    }

    /// Fill every row but the last with wrong bank words
    ///
    /// The round stays open. Returns `false` when no round is running or the
    /// bank has no wrong word of the right length.
    pub fn autofill(&mut self) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        self.input.clear();
        let filled = self.fill_rows(self.config.max_attempts.saturating_sub(1));
        debug!(filled, rows = self.guesses.len(), "board autofilled");
        filled
    }

    /// End the round by playing the target
    pub fn force_win(&mut self) -> Option<RoundEnd> {
        if self.phase != Phase::InProgress {
            return None;
        }
        let answer = self.target.as_ref()?.text().to_string();
        self.push_entry(&answer)?;
        Some(self.finish_forced(RoundResult::Won))
    }

    /// End the round by filling every remaining row with wrong words
    pub fn force_loss(&mut self) -> Option<RoundEnd> {
        if self.phase != Phase::InProgress || !self.fill_rows(self.config.max_attempts) {
            return None;
        }
        Some(self.finish_forced(RoundResult::Lost))
    }

    /// Forced endings are never scored
    fn finish_forced(&mut self, result: RoundResult) -> RoundEnd {
        let end = RoundEnd {
            result,
            award: None,
            continuation: Continuation::SessionOver,
            message: if result.is_win() {
                AUTO_WIN_MESSAGE
            } else {
                AUTO_LOSS_MESSAGE
            }
            .to_string(),
        };
        info!(mode = %self.mode, round = %self.round, ?result, "round forced");
        self.input.clear();
        self.validating = false;
        self.phase = Phase::RoundOver;
        self.outcome = Some(end.clone());
        end
    }

    fn finish_round(&mut self, result: RoundResult) -> RoundEnd {
        let summary = RoundSummary {
            result,
            attempts: self.guesses.len(),
            word_length: self.target.as_ref().map_or(0, Word::len),
            elapsed_secs: self.elapsed,
            penalties: self.penalties,
        };
        let end = self
            .rules
            .on_round_end(&summary, &mut self.board, &self.config);
        info!(
            mode = %self.mode,
            round = %self.round,
            ?result,
            attempts = summary.attempts,
            award = ?end.award,
            "round over"
        );
        self.validating = false;
        self.phase = Phase::RoundOver;
        self.outcome = Some(end.clone());
        end
    }

    /// Feed one clock tick
    pub fn on_timer(&mut self, event: TimerEvent) -> TimerOutcome {
        if event.round != self.round || self.phase != Phase::InProgress {
            debug!(event = %event.round, current = %self.round, "ignoring stale tick");
            return TimerOutcome::Stale;
        }
        self.elapsed = event.elapsed;
        if let Some(ClockKind::Countdown(limit)) = self.clock_kind() {
            let left = limit.saturating_sub(event.elapsed);
            self.time_left = Some(left);
            if left == 0 && self.rules.ends_on_timeout() {
                return TimerOutcome::RoundEnded(self.finish_round(RoundResult::TimedOut));
            }
        }
        TimerOutcome::Tick
    }

    /// Whether `hint` can be revealed right now
    #[must_use]
    pub fn hint_gate(&self, hint: HintKind) -> HintGate {
        self.rules
            .unlock_policy(&self.config)
            .gate(hint, self.guesses.len(), self.time_left)
    }

    fn reveal(&mut self, hint: HintKind) -> Result<(), HintError> {
        if self.target.is_none() {
            return Err(HintError::RoundNotActive);
        }
        match self.phase {
            Phase::InProgress => {}
            // A finished round may still look at its hints, for free
            Phase::RoundOver => return Ok(()),
            Phase::Setup | Phase::Loading => return Err(HintError::RoundNotActive),
        }

        let gate = self.hint_gate(hint);
        if !gate.is_unlocked() {
            return Err(HintError::Locked { hint, gate });
        }

        let rows_left = self.config.max_attempts.saturating_sub(self.guesses.len()) as u32;
        let (revealed, penalty) = match hint {
            HintKind::Synonyms => (&mut self.synonyms_revealed, synonym_penalty(rows_left)),
            HintKind::Definition => (&mut self.definition_revealed, definition_penalty(rows_left)),
        };
        if !*revealed {
            *revealed = true;
            if self.rules.charges_hint_penalties() {
                self.penalties = self.penalties.saturating_add(penalty);
                debug!(%hint, penalty, total = self.penalties, "hint penalty charged");
            }
        }
        Ok(())
    }

    /// Reveal the target's synonyms
    ///
    /// # Errors
    ///
    /// Returns an error when no round exists or the hint is still locked.
    pub fn request_synonyms(&mut self) -> Result<Vec<String>, HintError> {
        self.reveal(HintKind::Synonyms)?;
        let target = self.target.as_ref().ok_or(HintError::RoundNotActive)?;
        Ok(synonyms_for(target.text(), &self.bank))
    }

    /// Reveal the target's masked definition
    ///
    /// # Errors
    ///
    /// Returns an error when no round exists or the hint is still locked.
    pub fn request_definition(&mut self) -> Result<String, HintError> {
        self.reveal(HintKind::Definition)?;
        let target = self.target.as_ref().ok_or(HintError::RoundNotActive)?;
        Ok(definition_for(target.text(), &self.bank).unwrap_or_default())
    }

    /// Start the next round after a finished one
    ///
    /// # Errors
    ///
    /// Returns an error when the bank cannot supply a target.
    pub fn next_round(&mut self, today: NaiveDate) -> Result<RoundId, SessionError> {
        self.start_round(today)
    }

    /// Full restart: counters go back to zero, then a new round begins
    ///
    /// # Errors
    ///
    /// Returns an error when the bank cannot supply a target.
    pub fn restart(&mut self, today: NaiveDate) -> Result<RoundId, SessionError> {
        self.reset_counters();
        self.start_round(today)
    }

    /// Zero the running points and streak
    pub fn reset_counters(&mut self) {
        self.board.profile.reset_running();
        self.board.streak_wins = 0;
    }

    /// Drop all round state; any in-flight work becomes stale
    pub fn teardown(&mut self) {
        self.round = self.round.next();
        self.clear_round();
        self.target = None;
        self.phase = Phase::Setup;
    }

    pub fn dismiss_network_warning(&mut self) {
        self.network_degraded = false;
    }

    /// Snapshot for persisting a finished daily round
    #[must_use]
    pub fn daily_record(&self) -> Option<WordOfDayRecord> {
        if self.phase != Phase::RoundOver {
            return None;
        }
        let target = self.target.as_ref()?;
        let outcome = self.outcome.as_ref()?;
        Some(WordOfDayRecord {
            target: target.text().to_string(),
            guesses: self.guesses.clone(),
            statuses: self.keyboard.clone(),
            win: outcome.result.is_win(),
        })
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn round(&self) -> RoundId {
        self.round
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    #[must_use]
    pub fn clock_kind(&self) -> Option<ClockKind> {
        self.rules.clock(&self.config)
    }

    #[must_use]
    pub const fn target(&self) -> Option<&Word> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn guesses(&self) -> &[GuessEntry] {
        &self.guesses
    }

    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardStatusMap {
        &self.keyboard
    }

    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::RoundOver
    }

    #[must_use]
    pub const fn penalties(&self) -> u32 {
        self.penalties
    }

    #[must_use]
    pub const fn synonyms_revealed(&self) -> bool {
        self.synonyms_revealed
    }

    #[must_use]
    pub const fn definition_revealed(&self) -> bool {
        self.definition_revealed
    }

    #[must_use]
    pub const fn profile(&self) -> &ProfileState {
        &self.board.profile
    }

    /// The running score this mode shows: words found in timed mode, points
    /// in streak mode
    #[must_use]
    pub const fn points(&self) -> u32 {
        match self.mode {
            GameMode::Streak => self.board.profile.streak_points,
            _ => self.board.profile.total_points,
        }
    }

    #[must_use]
    pub const fn streak_wins(&self) -> u32 {
        self.board.streak_wins
    }

    #[must_use]
    pub const fn time_left(&self) -> Option<u32> {
        self.time_left
    }

    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }

    #[must_use]
    pub const fn is_validating(&self) -> bool {
        self.validating
    }

    #[must_use]
    pub const fn network_degraded(&self) -> bool {
        self.network_degraded
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&RoundEnd> {
        self.outcome.as_ref()
    }

    /// Whether the round on screen was restored from storage
    #[must_use]
    pub const fn is_restored(&self) -> bool {
        self.restored
    }
}
