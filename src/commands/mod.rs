//! Command implementations

pub mod daily;
pub mod score;
pub mod simple;
pub mod stats;

pub use daily::{DailyStatus, daily_status, reset_daily};
pub use score::{ScoreBreakdown, explain_score};
pub use simple::run_simple;
pub use stats::{StatsReport, collect_stats};
