//! Async game driver
//!
//! [`Game`] wires a [`Session`] to its collaborators: the key-value store,
//! the remote validator and the round clock. It is the surface a UI talks
//! to. All methods take `&mut self`, so events are processed one at a time;
//! a UI loop multiplexes key presses with [`Game::next_timer_event`] and the
//! advance deadline.

use super::daily::WordOfDay;
use super::error::{GuessRejection, HintError, SessionError};
use super::modes::{Continuation, GameMode, RoundEnd};
use super::profile::ProfileState;
use super::session::{AcceptedGuess, Phase, RoundId, Session, TimerOutcome};
use super::storage::{KeyValueStore, StorageError};
use super::timer::{RoundClock, TimerEvent};
use super::validator::{RemoteValidator, WordValidator};
use crate::config::EngineConfig;
use crate::wordlists::{Language, WordBank};
use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Source of the current calendar date
pub type DateSource = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// One key from the on-screen or physical keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Delete,
    Enter,
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_uppercase().as_str() {
            "DEL" | "DELETE" | "BACKSPACE" => return Ok(Self::Delete),
            "TRY" | "ENTER" => return Ok(Self::Enter),
            _ => {}
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => Ok(Self::Letter(c)),
            _ => Err(format!("Not a key: {trimmed}")),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(c) => write!(f, "{c}"),
            Self::Delete => f.write_str("DEL"),
            Self::Enter => f.write_str("TRY"),
        }
    }
}

/// What a key press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Typed,
    Deleted,
    /// The key had no effect (full row, round over, ...)
    Ignored,
    Accepted(AcceptedGuess),
    Rejected(GuessRejection),
}

/// Builder for [`Game`]
pub struct GameBuilder {
    config: EngineConfig,
    store: Arc<dyn KeyValueStore>,
    remote: Arc<dyn RemoteValidator>,
    today: DateSource,
    seed: Option<u64>,
    simulate_network_error: bool,
}

impl GameBuilder {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, remote: Arc<dyn RemoteValidator>) -> Self {
        Self {
            config: EngineConfig::default(),
            store,
            remote,
            today: Arc::new(|| Local::now().date_naive()),
            seed: None,
            simulate_network_error: false,
        }
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn date_source(mut self, today: DateSource) -> Self {
        self.today = today;
        self
    }

    /// Pin the calendar to one date
    #[must_use]
    pub fn fixed_date(self, date: NaiveDate) -> Self {
        self.date_source(Arc::new(move || date))
    }

    /// Seed target selection for reproducible sessions
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn simulate_network_error(mut self, enabled: bool) -> Self {
        self.simulate_network_error = enabled;
        self
    }

    /// Load the profile and enter `mode`
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error when the bank cannot supply a target.
    pub async fn build(self, mode: GameMode, bank: WordBank) -> Result<Game, SessionError> {
        let profile = ProfileState::load(&*self.store).await;
        info!(
            total_points = profile.total_points,
            streak_points = profile.streak_points,
            best_timed = profile.best_timed_score,
            best_streak = profile.best_streak_score,
            "profile loaded"
        );
        let (timer_tx, timer_rx) = unbounded_channel();
        let rng = self.new_rng();
        let bank = Arc::new(bank);
        let mut game = Game {
            validator: WordValidator::new(&bank, Arc::clone(&self.remote)),
            session: Session::new(mode, bank, self.config.clone(), profile, rng),
            config: self.config,
            store: self.store,
            remote: self.remote,
            today: self.today,
            seed: self.seed,
            simulate_network_error: self.simulate_network_error,
            clock: None,
            timer_tx,
            timer_rx,
            pending_advance: None,
            persisted: profile,
            daily: None,
            recorded: false,
        };
        game.enter().await?;
        Ok(game)
    }

    fn new_rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
    }
}

pub struct Game {
    config: EngineConfig,
    store: Arc<dyn KeyValueStore>,
    remote: Arc<dyn RemoteValidator>,
    today: DateSource,
    seed: Option<u64>,
    simulate_network_error: bool,

    session: Session,
    validator: WordValidator,
    clock: Option<RoundClock>,
    timer_tx: UnboundedSender<TimerEvent>,
    timer_rx: UnboundedReceiver<TimerEvent>,
    pending_advance: Option<(RoundId, Instant)>,
    /// Counters as last written to the store
    persisted: ProfileState,
    /// The day the running daily round belongs to, fixed when it starts
    daily: Option<WordOfDay>,
    /// Today's daily record is safely stored
    recorded: bool,
}

impl Game {
    #[must_use]
    pub fn builder(store: Arc<dyn KeyValueStore>, remote: Arc<dyn RemoteValidator>) -> GameBuilder {
        GameBuilder::new(store, remote)
    }

    fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// The running daily round's day, or today's outside of one
    fn word_of_day(&self) -> WordOfDay {
        self.daily
            .unwrap_or_else(|| WordOfDay::new(self.language(), self.today()))
    }

    /// Start the session's first round, restoring today's record in daily mode
    async fn enter(&mut self) -> Result<(), SessionError> {
        self.clock = None;
        self.pending_advance = None;
        self.recorded = false;
        self.daily = None;

        let today = self.today();
        if self.session.mode() == GameMode::WordOfDay {
            self.session.begin_loading();
            let wotd = WordOfDay::new(self.language(), today);
            self.daily = Some(wotd);
            match wotd.load(&*self.store, self.config.max_attempts).await {
                Ok(Some(record)) => match self.session.restore(record) {
                    Ok(()) => {
                        self.recorded = true;
                        return Ok(());
                    }
                    Err(e) => warn!(error = %e, "stored daily record unusable"),
                },
                Ok(None) => {}
                Err(e) => warn!(error = %e, "failed to read daily record"),
            }
        }

        self.session.start_round(today)?;
        self.spawn_clock();
        Ok(())
    }

    fn spawn_clock(&mut self) {
        self.clock = self
            .session
            .clock_kind()
            .map(|kind| RoundClock::spawn(self.session.round(), kind, self.timer_tx.clone()));
    }

    async fn mirror_profile(&mut self) {
        let current = *self.session.profile();
        if current == self.persisted {
            return;
        }
        match current.mirror(&self.persisted, &*self.store).await {
            Ok(()) => self.persisted = current,
            Err(e) => warn!(error = %e, "failed to persist counters"),
        }
    }

    async fn on_round_end(&mut self, end: &RoundEnd) {
        self.clock = None;
        if end.continuation == Continuation::Advance {
            self.pending_advance = Some((
                self.session.round(),
                Instant::now() + self.config.advance_delay(),
            ));
        }

        if self.session.mode() == GameMode::WordOfDay
            && !self.recorded
            && let Some(record) = self.session.daily_record()
        {
            let wotd = self.word_of_day();
            match wotd.save(&*self.store, &record).await {
                Ok(()) => {
                    self.recorded = true;
                    debug!(key = %wotd.key(), "daily record saved");
                }
                Err(e) => warn!(key = %wotd.key(), error = %e, "failed to save daily record"),
            }
        }

        self.mirror_profile().await;
    }

    /// Switch mode and/or language, discarding the current session
    ///
    /// The running points counter starts again from zero; best scores carry
    /// over.
    ///
    /// # Errors
    ///
    /// Returns an error when the new bank cannot supply a target.
    pub async fn switch(&mut self, mode: GameMode, bank: WordBank) -> Result<(), SessionError> {
        self.session.teardown();
        let mut profile = *self.session.profile();
        profile.reset_running();
        let rng = self
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let bank = Arc::new(bank);
        self.validator = WordValidator::new(&bank, Arc::clone(&self.remote));
        self.session = Session::new(mode, bank, self.config.clone(), profile, rng);
        info!(%mode, language = %self.language(), "switched session");
        self.mirror_profile().await;
        self.enter().await
    }

    /// Handle one key press
    pub async fn submit_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Letter(c) => {
                if self.session.press_letter(c) {
                    KeyOutcome::Typed
                } else {
                    KeyOutcome::Ignored
                }
            }
            Key::Delete => {
                if self.session.delete_letter() {
                    KeyOutcome::Deleted
                } else {
                    KeyOutcome::Ignored
                }
            }
            Key::Enter => self.submit_guess().await,
        }
    }

    async fn submit_guess(&mut self) -> KeyOutcome {
        let pending = match self.session.begin_submission() {
            Ok(pending) => pending,
            Err(rejection) => return KeyOutcome::Rejected(rejection),
        };

        let verdict = self
            .validator
            .validate(&pending.text, self.simulate_network_error)
            .await;
        debug!(guess = %pending.text, ?verdict, "validated");

        // Ticks that arrived while validating may have ended the round
        self.drain_timer_events().await;

        match self.session.complete_submission(&pending, verdict) {
            Ok(accepted) => {
                if let Some(end) = &accepted.round_end {
                    self.on_round_end(end).await;
                }
                KeyOutcome::Accepted(accepted)
            }
            Err(rejection) => KeyOutcome::Rejected(rejection),
        }
    }

    async fn drain_timer_events(&mut self) {
        while let Ok(event) = self.timer_rx.try_recv() {
            self.handle_timer_event(event).await;
        }
    }

    /// Wait for the next clock tick
    ///
    /// Pends forever while no clock is running, which suits `select!` loops.
    pub async fn next_timer_event(&mut self) -> TimerEvent {
        match self.timer_rx.recv().await {
            Some(event) => event,
            None => std::future::pending().await,
        }
    }

    /// A clock tick that has already arrived, without waiting
    pub fn try_next_timer_event(&mut self) -> Option<TimerEvent> {
        self.timer_rx.try_recv().ok()
    }

    /// Apply a clock tick obtained from [`next_timer_event`](Self::next_timer_event)
    pub async fn handle_timer_event(&mut self, event: TimerEvent) -> TimerOutcome {
        let outcome = self.session.on_timer(event);
        if let TimerOutcome::RoundEnded(end) = &outcome {
            self.on_round_end(end).await;
        }
        outcome
    }

    /// When the pending automatic advance is due, if any
    #[must_use]
    pub fn advance_deadline(&self) -> Option<Instant> {
        self.pending_advance.map(|(_, at)| at)
    }

    /// Fire the automatic advance if its deadline has passed
    ///
    /// # Errors
    ///
    /// Returns an error when the bank cannot supply a target.
    pub fn poll(&mut self) -> Result<bool, SessionError> {
        match self.pending_advance {
            Some((_, at)) if Instant::now() >= at => self.advance().map(|()| true),
            _ => Ok(false),
        }
    }

    /// Wait out the pending automatic advance, if any, and fire it
    ///
    /// # Errors
    ///
    /// Returns an error when the bank cannot supply a target.
    pub async fn settle(&mut self) -> Result<(), SessionError> {
        if let Some((_, at)) = self.pending_advance {
            tokio::time::sleep_until(at).await;
            self.advance()?;
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<(), SessionError> {
        let Some((round, _)) = self.pending_advance.take() else {
            return Ok(());
        };
        if round != self.session.round() || self.session.phase() != Phase::RoundOver {
            debug!(%round, "advance no longer applies");
            return Ok(());
        }
        self.session.next_round(self.today())?;
        self.spawn_clock();
        Ok(())
    }

    /// Start the next round after a finished one
    ///
    /// When the session itself is over this is a full restart.
    ///
    /// # Errors
    ///
    /// Returns an error when the bank cannot supply a target.
    pub async fn next_round(&mut self) -> Result<(), SessionError> {
        if self.session.phase() != Phase::RoundOver {
            return Ok(());
        }
        let session_over = self
            .session
            .outcome()
            .is_none_or(|end| end.continuation == Continuation::SessionOver);
        if session_over {
            return self.restart().await;
        }
        self.pending_advance = None;
        self.session.next_round(self.today())?;
        self.spawn_clock();
        Ok(())
    }

    /// Full restart of the current mode; the points counter goes to zero
    ///
    /// In daily mode this re-enters the day, which shows the stored result
    /// again once the day has been played.
    ///
    /// # Errors
    ///
    /// Returns an error when the bank cannot supply a target.
    pub async fn restart(&mut self) -> Result<(), SessionError> {
        self.session.reset_counters();
        self.mirror_profile().await;
        if self.session.mode() == GameMode::WordOfDay {
            return self.enter().await;
        }
        self.clock = None;
        self.pending_advance = None;
        self.session.restart(self.today())?;
        self.spawn_clock();
        Ok(())
    }

    /// Leave the game screen; nothing from this session fires afterwards
    pub async fn go_home(&mut self) {
        self.clock = None;
        self.pending_advance = None;
        self.daily = None;
        self.session.teardown();
        self.mirror_profile().await;
    }

    /// Reveal the synonyms hint
    ///
    /// # Errors
    ///
    /// Returns an error when the hint is locked or no round exists.
    pub fn request_synonyms(&mut self) -> Result<Vec<String>, HintError> {
        self.session.request_synonyms()
    }

    /// Reveal the definition hint
    ///
    /// # Errors
    ///
    /// Returns an error when the hint is locked or no round exists.
    pub fn request_definition(&mut self) -> Result<String, HintError> {
        self.session.request_definition()
    }

    /// Delete today's daily record so the day can be replayed
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn reset_word_of_day(&mut self) -> Result<(), StorageError> {
        let wotd = self.word_of_day();
        wotd.clear(&*self.store).await?;
        info!(key = %wotd.key(), "daily record cleared");
        if self.session.mode() == GameMode::WordOfDay
            && let Err(e) = self.enter().await
        {
            warn!(error = %e, "could not restart daily round");
        }
        Ok(())
    }

    /// Zero the running points counter
    pub async fn reset_points(&mut self) {
        self.session.reset_counters();
        self.mirror_profile().await;
    }

    pub fn set_simulate_network_error(&mut self, enabled: bool) {
        self.simulate_network_error = enabled;
    }

    #[must_use]
    pub const fn simulates_network_error(&self) -> bool {
        self.simulate_network_error
    }

    pub fn dismiss_network_warning(&mut self) {
        self.session.dismiss_network_warning();
    }

    /// The current target, for debugging
    #[must_use]
    pub fn reveal_answer(&self) -> Option<&str> {
        let target = self.session.target()?;
        info!(target = %target, "answer revealed");
        Some(target.text())
    }

    /// Fill every row but the last with wrong words, for debugging
    pub fn autofill_board(&mut self) -> bool {
        self.session.autofill()
    }

    /// End the running round as a win, for debugging
    ///
    /// Forced rounds are not scored. In daily mode the result is recorded
    /// like any other finished round.
    pub async fn force_win(&mut self) -> Option<RoundEnd> {
        let end = self.session.force_win()?;
        self.on_round_end(&end).await;
        Some(end)
    }

    /// End the running round as a loss, for debugging
    pub async fn force_loss(&mut self) -> Option<RoundEnd> {
        let end = self.session.force_loss()?;
        self.on_round_end(&end).await;
        Some(end)
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.session.bank().language()
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Today's date as the game sees it
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.today()
    }

    /// Whether a round clock is ticking
    #[must_use]
    pub const fn clock_running(&self) -> bool {
        self.clock.is_some()
    }

    /// Whether today's daily record has been written
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        self.recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterStatus;
    use crate::engine::modes::RoundResult;
    use crate::engine::storage::{
        BEST_TIMED_SCORE_KEY, MemoryStore, STREAK_POINTS_KEY, TOTAL_POINTS_KEY,
    };
    use crate::engine::validator::ValidatorError;
    use crate::wordlists::WordEntry;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use LetterStatus::{Absent, Correct, Present};

    /// Accepts every word after an optional delay
    struct AcceptAll {
        delay: Duration,
    }

    #[async_trait]
    impl RemoteValidator for AcceptAll {
        async fn lookup(&self, _word: &str, _language: Language) -> Result<bool, ValidatorError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(true)
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn apple_bank() -> WordBank {
        WordBank::new(
            Language::English,
            vec![WordEntry::new("APPLE", "A round fruit.", vec!["pome".into()])],
        )
    }

    fn builder(store: &MemoryStore) -> GameBuilder {
        Game::builder(
            Arc::new(store.clone()),
            Arc::new(AcceptAll {
                delay: Duration::ZERO,
            }),
        )
        .fixed_date(day())
        .seed(42)
    }

    async fn guess(game: &mut Game, word: &str) -> KeyOutcome {
        for c in word.chars() {
            game.submit_key(Key::Letter(c)).await;
        }
        game.submit_key(Key::Enter).await
    }

    fn accepted(outcome: KeyOutcome) -> AcceptedGuess {
        match outcome {
            KeyOutcome::Accepted(accepted) => accepted,
            other => panic!("expected accepted guess, got {other:?}"),
        }
    }

    #[test]
    fn keys_parse() {
        assert_eq!("DEL".parse(), Ok(Key::Delete));
        assert_eq!("try".parse(), Ok(Key::Enter));
        assert_eq!("q".parse(), Ok(Key::Letter('q')));
        assert!("12".parse::<Key>().is_err());
    }

    #[tokio::test]
    async fn freeplay_win_is_unscored() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .build(GameMode::Freeplay, apple_bank())
            .await
            .unwrap();

        let first = accepted(guess(&mut game, "TRAIN").await);
        assert_eq!(first.entry.statuses, vec![Absent, Absent, Present, Absent, Absent]);
        assert!(first.round_end.is_none());
        assert_eq!(game.session().phase(), Phase::InProgress);

        let second = accepted(guess(&mut game, "CHAIR").await);
        assert!(second.round_end.is_none());

        let last = accepted(guess(&mut game, "APPLE").await);
        assert_eq!(last.entry.statuses, vec![Correct; 5]);
        let end = last.round_end.unwrap();
        assert_eq!(end.result, RoundResult::Won);
        assert_eq!(end.award, None);
        assert!(game.session().is_over());
        assert_eq!(*game.session().profile(), ProfileState::default());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn word_of_day_replay_is_blocked() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .build(GameMode::WordOfDay, apple_bank())
            .await
            .unwrap();
        accepted(guess(&mut game, "TRAIN").await);
        let end = accepted(guess(&mut game, "APPLE").await).round_end.unwrap();
        assert_eq!(end.result, RoundResult::Won);
        assert!(game.is_recorded());
        assert!(store.get("wotd-en-2024-06-01").await.unwrap().is_some());

        let mut revisit = builder(&store)
            .build(GameMode::WordOfDay, apple_bank())
            .await
            .unwrap();
        let session = revisit.session();
        assert!(session.is_over());
        assert!(session.is_restored());
        assert_eq!(session.guesses().len(), 2);
        assert!(session.outcome().unwrap().result.is_win());

        assert_eq!(revisit.submit_key(Key::Letter('A')).await, KeyOutcome::Ignored);
        assert_eq!(
            revisit.submit_key(Key::Enter).await,
            KeyOutcome::Rejected(GuessRejection::RoundNotActive)
        );

        revisit.restart().await.unwrap();
        assert!(revisit.session().is_restored());
    }

    #[tokio::test]
    async fn word_of_day_reset_allows_replay() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .build(GameMode::WordOfDay, apple_bank())
            .await
            .unwrap();
        accepted(guess(&mut game, "APPLE").await);

        game.reset_word_of_day().await.unwrap();
        assert!(!game.session().is_over());
        assert!(!game.is_recorded());
        assert_eq!(game.session().target().unwrap().text(), "APPLE");
        assert_eq!(store.get("wotd-en-2024-06-01").await.unwrap(), None);
    }

    #[tokio::test]
    async fn daily_record_keeps_the_day_it_started_on() {
        let store = MemoryStore::new();
        let past_midnight = Arc::new(AtomicBool::new(false));
        let clock = Arc::clone(&past_midnight);
        let mut game = builder(&store)
            .date_source(Arc::new(move || {
                if clock.load(Ordering::SeqCst) {
                    NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
                } else {
                    day()
                }
            }))
            .build(GameMode::WordOfDay, apple_bank())
            .await
            .unwrap();

        accepted(guess(&mut game, "TRAIN").await);
        past_midnight.store(true, Ordering::SeqCst);
        let end = accepted(guess(&mut game, "APPLE").await).round_end.unwrap();
        assert!(end.result.is_win());
        assert!(store.get("wotd-en-2024-06-01").await.unwrap().is_some());
        assert_eq!(store.get("wotd-en-2024-06-02").await.unwrap(), None);

        let next_day = builder(&store)
            .fixed_date(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())
            .build(GameMode::WordOfDay, apple_bank())
            .await
            .unwrap();
        assert!(!next_day.session().is_restored());
        assert_eq!(next_day.session().phase(), Phase::InProgress);

        // Clearing from the finished round removes the day it was played on
        game.reset_word_of_day().await.unwrap();
        assert_eq!(store.get("wotd-en-2024-06-01").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupted_daily_record_starts_fresh() {
        let store = MemoryStore::new();
        store.set("wotd-en-2024-06-01", "not json").await.unwrap();

        let game = builder(&store)
            .build(GameMode::WordOfDay, apple_bank())
            .await
            .unwrap();
        assert_eq!(game.session().phase(), Phase::InProgress);
        assert_eq!(store.get("wotd-en-2024-06-01").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_loss_resets_points() {
        let store = MemoryStore::new();
        store.set(TOTAL_POINTS_KEY, "7").await.unwrap();
        store.set(BEST_TIMED_SCORE_KEY, "3").await.unwrap();

        let mut game = builder(&store)
            .build(GameMode::Timed, apple_bank())
            .await
            .unwrap();
        assert_eq!(game.session().profile().total_points, 7);

        for _ in 0..5 {
            accepted(guess(&mut game, "TRAIN").await);
        }
        let end = accepted(guess(&mut game, "TRAIN").await).round_end.unwrap();
        assert_eq!(end.result, RoundResult::Lost);
        assert_eq!(end.message, "😞 You lose\nWords found: 7");

        assert_eq!(store.get(BEST_TIMED_SCORE_KEY).await.unwrap().as_deref(), Some("7"));
        assert_eq!(store.get(TOTAL_POINTS_KEY).await.unwrap().as_deref(), Some("0"));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_timeout_resets_points() {
        let store = MemoryStore::new();
        store.set(TOTAL_POINTS_KEY, "7").await.unwrap();
        let config = EngineConfig {
            timer_seconds: 5,
            ..EngineConfig::default()
        };

        let mut game = builder(&store)
            .config(config)
            .build(GameMode::Timed, apple_bank())
            .await
            .unwrap();

        let end = loop {
            let event = game.next_timer_event().await;
            if let TimerOutcome::RoundEnded(end) = game.handle_timer_event(event).await {
                break end;
            }
        };
        assert_eq!(end.result, RoundResult::TimedOut);
        assert_eq!(game.session().time_left(), Some(0));
        assert_eq!(store.get(BEST_TIMED_SCORE_KEY).await.unwrap().as_deref(), Some("7"));
        assert_eq!(store.get(TOTAL_POINTS_KEY).await.unwrap().as_deref(), Some("0"));
    }

    #[tokio::test(start_paused = true)]
    async fn guess_resolving_after_timeout_is_dropped() {
        let store = MemoryStore::new();
        let config = EngineConfig {
            timer_seconds: 1,
            ..EngineConfig::default()
        };
        let mut game = Game::builder(
            Arc::new(store.clone()),
            Arc::new(AcceptAll {
                delay: Duration::from_secs(3),
            }),
        )
        .config(config)
        .fixed_date(day())
        .seed(1)
        .build(GameMode::Timed, apple_bank())
        .await
        .unwrap();

        let outcome = guess(&mut game, "TRAIN").await;
        assert_eq!(outcome, KeyOutcome::Rejected(GuessRejection::RoundNotActive));
        assert!(game.session().guesses().is_empty());
        assert_eq!(
            game.session().outcome().unwrap().result,
            RoundResult::TimedOut
        );
        assert!(!game.session().is_validating());
    }

    #[tokio::test(start_paused = true)]
    async fn timed_win_advances_after_delay() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .build(GameMode::Timed, apple_bank())
            .await
            .unwrap();
        let first_round = game.session().round();

        let end = accepted(guess(&mut game, "APPLE").await).round_end.unwrap();
        assert_eq!(end.continuation, Continuation::Advance);
        assert!(game.advance_deadline().is_some());
        assert!(!game.poll().unwrap());

        game.settle().await.unwrap();
        assert_ne!(game.session().round(), first_round);
        assert_eq!(game.session().phase(), Phase::InProgress);
        assert_eq!(game.session().time_left(), Some(60));
        assert_eq!(game.session().profile().total_points, 1);
        assert_eq!(store.get(TOTAL_POINTS_KEY).await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_before_advance_cancels_it() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .build(GameMode::Streak, apple_bank())
            .await
            .unwrap();
        accepted(guess(&mut game, "APPLE").await);
        assert!(game.session().points() > 0);

        game.restart().await.unwrap();
        assert!(game.advance_deadline().is_none());
        assert_eq!(game.session().points(), 0);
        assert_eq!(store.get(STREAK_POINTS_KEY).await.unwrap().as_deref(), Some("0"));
    }

    #[tokio::test(start_paused = true)]
    async fn streak_points_do_not_leak_into_timed() {
        let store = MemoryStore::new();
        let mut streak = builder(&store)
            .build(GameMode::Streak, apple_bank())
            .await
            .unwrap();
        let won = accepted(guess(&mut streak, "APPLE").await).round_end.unwrap();
        let award = won.award.unwrap();
        assert!(award > 0);
        assert_eq!(
            store.get(STREAK_POINTS_KEY).await.unwrap(),
            Some(award.to_string())
        );
        assert_eq!(store.get(TOTAL_POINTS_KEY).await.unwrap(), None);

        let mut timed = builder(&store)
            .build(GameMode::Timed, apple_bank())
            .await
            .unwrap();
        assert_eq!(timed.session().points(), 0);
        for _ in 0..5 {
            accepted(guess(&mut timed, "TRAIN").await);
        }
        let end = accepted(guess(&mut timed, "TRAIN").await).round_end.unwrap();
        assert_eq!(end.message, "😞 You lose\nWords found: 0");
        assert_eq!(timed.session().profile().best_timed_score, 0);
        assert_eq!(store.get(BEST_TIMED_SCORE_KEY).await.unwrap(), None);
        assert_eq!(timed.session().profile().best_streak_score, award);
    }

    #[tokio::test]
    async fn simulated_network_error_only_affects_unknown_words() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .simulate_network_error(true)
            .build(GameMode::Freeplay, apple_bank())
            .await
            .unwrap();

        assert_eq!(
            guess(&mut game, "TRAIN").await,
            KeyOutcome::Rejected(GuessRejection::WordNotRecognized)
        );
        assert!(game.session().network_degraded());
        assert!(game.session().guesses().is_empty());

        // The rejected input stays on the row
        for _ in 0..5 {
            game.submit_key(Key::Delete).await;
        }
        accepted(guess(&mut game, "APPLE").await);

        game.dismiss_network_warning();
        assert!(!game.session().network_degraded());
    }

    fn two_word_bank() -> WordBank {
        WordBank::new(
            Language::English,
            vec![
                WordEntry::new("APPLE", "A round fruit.", vec![]),
                WordEntry::new("TRAIN", "A line of carriages.", vec![]),
            ],
        )
    }

    #[tokio::test]
    async fn autofill_then_force_win() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .build(GameMode::Freeplay, two_word_bank())
            .await
            .unwrap();
        assert!(game.autofill_board());
        assert_eq!(game.session().guesses().len(), 5);
        assert!(!game.session().is_over());

        let end = game.force_win().await.unwrap();
        assert_eq!(end.result, RoundResult::Won);
        assert!(game.session().is_over());
        assert_eq!(game.session().guesses().len(), 6);
        assert!(game.force_loss().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn force_loss_records_the_day() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .build(GameMode::WordOfDay, two_word_bank())
            .await
            .unwrap();
        let end = game.force_loss().await.unwrap();
        assert_eq!(end.result, RoundResult::Lost);
        assert_eq!(end.continuation, Continuation::SessionOver);
        assert!(game.is_recorded());
        assert!(game.advance_deadline().is_none());

        let revisit = builder(&store)
            .build(GameMode::WordOfDay, two_word_bank())
            .await
            .unwrap();
        assert!(revisit.session().is_restored());
        assert_eq!(revisit.session().guesses().len(), 6);
        assert!(!revisit.session().outcome().unwrap().result.is_win());
    }

    #[tokio::test]
    async fn go_home_tears_down() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .build(GameMode::Timed, apple_bank())
            .await
            .unwrap();
        assert!(game.clock_running());
        game.go_home().await;
        assert!(!game.clock_running());
        assert_eq!(game.session().phase(), Phase::Setup);
        assert_eq!(game.submit_key(Key::Letter('A')).await, KeyOutcome::Ignored);
    }

    #[tokio::test]
    async fn switch_changes_language() {
        let store = MemoryStore::new();
        let mut game = builder(&store)
            .build(GameMode::Freeplay, apple_bank())
            .await
            .unwrap();
        game.switch(GameMode::Freeplay, WordBank::embedded(Language::French))
            .await
            .unwrap();
        assert_eq!(game.language(), Language::French);
        assert_eq!(game.session().phase(), Phase::InProgress);
        assert!(game.reveal_answer().is_some());
    }
}
