//! Formatting utilities for terminal output

use crate::core::{GuessEntry, KEYBOARD_ROWS, KeyboardStatusMap, LetterStatus};
use colored::{ColoredString, Colorize};

/// One letter as a colored tile
#[must_use]
pub fn colored_tile(letter: char, status: LetterStatus) -> ColoredString {
    let text = format!(" {letter} ");
    match status {
        LetterStatus::Correct => text.black().on_green().bold(),
        LetterStatus::Present => text.black().on_yellow().bold(),
        LetterStatus::Absent => text.white().on_bright_black(),
        LetterStatus::Unknown => text.normal(),
    }
}

/// A played guess as a row of tiles
#[must_use]
pub fn format_guess_row(entry: &GuessEntry) -> String {
    entry
        .cells()
        .map(|(letter, status)| colored_tile(letter, status).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The row being typed, padded with blanks up to `length`
#[must_use]
pub fn format_input_row(input: &str, length: usize) -> String {
    let typed = input.chars().map(|c| format!("[{c}]"));
    let blanks = std::iter::repeat_n("[ ]".to_string(), length.saturating_sub(input.chars().count()));
    typed.chain(blanks).collect::<Vec<_>>().join(" ")
}

/// The on-screen keyboard, one string per row
#[must_use]
pub fn keyboard_lines(map: &KeyboardStatusMap) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let keys: String = row
                .chars()
                .map(|c| colored_tile(c, map.get(c)).to_string())
                .collect();
            format!("{}{keys}", " ".repeat(i * 2))
        })
        .collect()
}

/// Seconds as `m:ss`
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
