//! Polyword
//!
//! A multi-language word-guessing game engine with freeplay, timed,
//! word-of-the-day and streak modes, local hints and local-first word
//! validation.
//!
//! # Quick Start
//!
//! ```rust
//! use polyword::core::{LetterStatus, evaluate};
//!
//! let statuses = evaluate("PAPER", "APPLE");
//! assert_eq!(statuses[2], LetterStatus::Correct);
//! assert_eq!(statuses[4], LetterStatus::Absent);
//! ```
//!
//! Playing a full session goes through [`engine::Game`]:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use polyword::engine::{Game, GameMode, Key, MemoryStore, OfflineValidator};
//! use polyword::wordlists::{Language, WordBank};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = Game::builder(Arc::new(MemoryStore::new()), Arc::new(OfflineValidator))
//!     .build(GameMode::Freeplay, WordBank::embedded(Language::English))
//!     .await?;
//! for key in ["B", "E", "A", "C", "H", "TRY"] {
//!     game.submit_key(key.parse::<Key>()?).await;
//! }
//! # Ok(())
//! # }
//! ```

// Core domain types
pub mod core;

// Word banks
pub mod wordlists;

// Engine configuration
pub mod config;

// Session engine
pub mod engine;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
