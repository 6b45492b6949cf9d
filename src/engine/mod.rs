//! Game-session engine
//!
//! Validation, hints, scoring, unlock rules, the daily schedule, persistence
//! and the per-mode session state machine, plus the async [`Game`] driver
//! that ties them together.

pub mod daily;
pub mod error;
pub mod game;
pub mod hints;
pub mod modes;
pub mod profile;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod timer;
pub mod unlock;
pub mod validator;

pub use daily::{WordOfDay, WordOfDayRecord, daily_word, today_key};
pub use error::{GuessRejection, HintError, SessionError};
pub use game::{Game, GameBuilder, Key, KeyOutcome};
pub use modes::{Continuation, GameMode, RoundEnd, RoundResult};
pub use profile::ProfileState;
pub use scoring::{ScoreInput, calculate_score};
pub use session::{Phase, RoundId, Session, TimerOutcome};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use timer::{ClockKind, TimerEvent};
pub use unlock::{HintGate, HintKind, UnlockPolicy};
pub use validator::{HttpValidator, OfflineValidator, RemoteValidator, Verdict, WordValidator};
