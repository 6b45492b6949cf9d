//! Terminal output formatting
//!
//! Display utilities for line-mode play and command results.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_daily_status, print_hint, print_hint_error, print_keyboard,
    print_rejection, print_round_end, print_score_breakdown, print_stats, print_status_line,
};
