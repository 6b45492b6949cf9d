//! Score explorer
//!
//! Breaks a score into the parts the calculator adds up, for the `score`
//! command.

use crate::engine::scoring::{
    HARD_MODE_MULTIPLIER, PER_LETTER_POINTS, PER_UNUSED_GUESS_BONUS, STREAK_CAP,
    STREAK_MULTIPLIER_PER_WIN, ScoreInput, TIME_BONUS, TIME_BONUS_THRESHOLD_SECS, WIN_BONUS,
    calculate_score,
};

/// Parts of a score before multipliers and the final total
pub struct ScoreBreakdown {
    pub input: ScoreInput,
    pub letters: u32,
    pub win_bonus: u32,
    pub unused_bonus: u32,
    pub time_bonus: u32,
    pub streak_multiplier: f64,
    pub hard_mode_multiplier: f64,
    pub total: u32,
}

/// Explain how `input` is scored
#[must_use]
pub fn explain_score(input: ScoreInput) -> ScoreBreakdown {
    let total = calculate_score(&input);
    if !input.is_win {
        return ScoreBreakdown {
            input,
            letters: 0,
            win_bonus: 0,
            unused_bonus: 0,
            time_bonus: 0,
            streak_multiplier: 1.0,
            hard_mode_multiplier: 1.0,
            total,
        };
    }

    let unused = input.max_attempts.saturating_sub(input.attempts_used) as u32;
    let time_bonus = if input
        .time_taken_secs
        .is_some_and(|secs| secs <= TIME_BONUS_THRESHOLD_SECS)
    {
        TIME_BONUS
    } else {
        0
    };
    ScoreBreakdown {
        input,
        letters: input.word_length as u32 * PER_LETTER_POINTS,
        win_bonus: WIN_BONUS,
        unused_bonus: unused * PER_UNUSED_GUESS_BONUS,
        time_bonus,
        streak_multiplier: 1.0 + f64::from(input.current_streak.min(STREAK_CAP)) * STREAK_MULTIPLIER_PER_WIN,
        hard_mode_multiplier: if input.hard_mode {
            HARD_MODE_MULTIPLIER
        } else {
            1.0
        },
        total,
    }
}

impl ScoreBreakdown {
    /// Sum of the additive parts
    #[must_use]
    pub const fn subtotal(&self) -> u32 {
        self.letters + self.win_bonus + self.unused_bonus + self.time_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_add_up_to_total() {
        let input = ScoreInput::win(3, 6, 6)
            .with_time(42)
            .with_streak(7)
            .with_hard_mode(true);
        let breakdown = explain_score(input);

        assert_eq!(breakdown.subtotal(), 60 + 50 + 30 + 20);
        let expected =
            (f64::from(breakdown.subtotal()) * breakdown.streak_multiplier * breakdown.hard_mode_multiplier)
                .round() as u32;
        assert_eq!(breakdown.total, expected);
    }

    #[test]
    fn loss_has_no_parts() {
        let breakdown = explain_score(ScoreInput::loss(6, 6, 5));
        assert_eq!(breakdown.subtotal(), 0);
        assert_eq!(breakdown.total, 0);
    }
}
