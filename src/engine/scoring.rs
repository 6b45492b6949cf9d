//! Point computation for scored rounds
//!
//! A lost round scores nothing. A won round earns points for word length, a
//! flat win bonus, unused attempts and a fast finish, then multipliers for the
//! current streak and hard mode. Rounding happens once, at the end.

/// Base points per letter in the target word
pub const PER_LETTER_POINTS: u32 = 10;
/// Flat bonus for winning at all
pub const WIN_BONUS: u32 = 50;
/// Penalty per attempt on a lost round
pub const GUESS_PENALTY: u32 = 5;
/// Bonus per attempt left unused
pub const PER_UNUSED_GUESS_BONUS: u32 = 10;
/// A win within this many seconds earns [`TIME_BONUS`]
pub const TIME_BONUS_THRESHOLD_SECS: u32 = 60;
pub const TIME_BONUS: u32 = 20;
/// Extra multiplier per consecutive win
pub const STREAK_MULTIPLIER_PER_WIN: f64 = 0.01;
/// Streak length beyond which the multiplier stops growing
pub const STREAK_CAP: u32 = 20;
pub const HARD_MODE_MULTIPLIER: f64 = 1.2;

/// Parameters of one completed round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInput {
    pub is_win: bool,
    pub attempts_used: usize,
    pub max_attempts: usize,
    pub word_length: usize,
    pub time_taken_secs: Option<u32>,
    pub current_streak: u32,
    pub hard_mode: bool,
}

impl ScoreInput {
    #[must_use]
    pub const fn win(attempts_used: usize, max_attempts: usize, word_length: usize) -> Self {
        Self {
            is_win: true,
            attempts_used,
            max_attempts,
            word_length,
            time_taken_secs: None,
            current_streak: 0,
            hard_mode: false,
        }
    }

    #[must_use]
    pub const fn loss(attempts_used: usize, max_attempts: usize, word_length: usize) -> Self {
        Self {
            is_win: false,
            ..Self::win(attempts_used, max_attempts, word_length)
        }
    }

    #[must_use]
    pub const fn with_time(mut self, seconds: u32) -> Self {
        self.time_taken_secs = Some(seconds);
        self
    }

    #[must_use]
    pub const fn with_streak(mut self, streak: u32) -> Self {
        self.current_streak = streak;
        self
    }

    #[must_use]
    pub const fn with_hard_mode(mut self, hard_mode: bool) -> Self {
        self.hard_mode = hard_mode;
        self
    }
}

/// Compute the score for one round
///
/// # Examples
/// ```
/// use polyword::engine::scoring::{ScoreInput, calculate_score};
///
/// // 5 letters, won in 4 of 6 attempts: 50 + 50 + 2 * 10
/// assert_eq!(calculate_score(&ScoreInput::win(4, 6, 5)), 120);
/// assert_eq!(calculate_score(&ScoreInput::loss(6, 6, 5)), 0);
/// ```
#[must_use]
pub fn calculate_score(input: &ScoreInput) -> u32 {
    if !input.is_win {
        let penalty = i64::from(GUESS_PENALTY) * input.attempts_used as i64;
        return (-penalty).max(0) as u32;
    }

    let unused = input.max_attempts.saturating_sub(input.attempts_used) as u32;
    let mut total = f64::from(input.word_length as u32 * PER_LETTER_POINTS);
    total += f64::from(WIN_BONUS);
    total += f64::from(unused * PER_UNUSED_GUESS_BONUS);

    if input
        .time_taken_secs
        .is_some_and(|secs| secs <= TIME_BONUS_THRESHOLD_SECS)
    {
        total += f64::from(TIME_BONUS);
    }

    let streak = input.current_streak.min(STREAK_CAP);
    total *= 1.0 + f64::from(streak) * STREAK_MULTIPLIER_PER_WIN;

    if input.hard_mode {
        total *= HARD_MODE_MULTIPLIER;
    }

    total.round() as u32
}

/// Penalty for revealing synonyms with `rows_left` attempts remaining
#[must_use]
pub const fn synonym_penalty(rows_left: u32) -> u32 {
    4 * rows_left * rows_left
}

/// Penalty for revealing the definition with `rows_left` attempts remaining
#[must_use]
pub const fn definition_penalty(rows_left: u32) -> u32 {
    2 * rows_left * rows_left
}
