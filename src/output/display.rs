//! Display functions for the line-mode game and command results

use super::formatters::{
    create_progress_bar, format_clock, format_guess_row, format_input_row, keyboard_lines,
};
use crate::commands::{DailyStatus, ScoreBreakdown, StatsReport};
use crate::core::KeyboardStatusMap;
use crate::engine::{ClockKind, GuessRejection, HintError, RoundEnd, RoundResult, Session};
use colored::Colorize;

fn banner(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

/// Print the played rows, the row being typed and the empty rows left
pub fn print_board(session: &Session) {
    let Some(target) = session.target() else {
        println!("{}", "No round in progress".bright_black());
        return;
    };
    let length = target.len();
    let max_rows = session.config().max_attempts;

    println!();
    for entry in session.guesses() {
        println!("   {}", format_guess_row(entry));
    }
    let mut drawn = session.guesses().len();
    if !session.is_over() && drawn < max_rows {
        println!("   {}", format_input_row(session.current_input(), length));
        drawn += 1;
    }
    for _ in drawn..max_rows {
        println!("   {}", format_input_row("", length).bright_black());
    }
}

/// Print the keyboard with each key colored by its best known status
pub fn print_keyboard(map: &KeyboardStatusMap) {
    println!();
    for line in keyboard_lines(map) {
        println!("   {line}");
    }
}

/// Print mode, clock and counters on one line
pub fn print_status_line(session: &Session) {
    let mut parts = vec![
        format!("{} ({})", session.mode().label(), session.bank().language().name())
            .bright_cyan()
            .bold()
            .to_string(),
        format!("round {}", session.round()),
    ];
    match session.clock_kind() {
        Some(ClockKind::Countdown(_)) => {
            let left = session.time_left().unwrap_or(0);
            let clock = format!("⏱ {}", format_clock(left));
            parts.push(if left <= 10 {
                clock.red().bold().to_string()
            } else {
                clock
            });
        }
        Some(ClockKind::Stopwatch) => parts.push(format!("⏱ {}", format_clock(session.elapsed()))),
        None => {}
    }
    if session.mode().rules().charges_hint_penalties() {
        parts.push(format!("points {}", session.points()));
        if session.penalties() > 0 {
            parts.push(format!("penalties -{}", session.penalties()).yellow().to_string());
        }
    }
    if session.streak_wins() > 0 {
        parts.push(format!("streak {}", session.streak_wins()));
    }
    println!("{}", parts.join("  │  "));

    if session.network_degraded() {
        println!(
            "{}",
            "⚠ Could not reach the dictionary; unknown words are rejected".yellow()
        );
    }
}

/// Print the end-of-round banner
pub fn print_round_end(end: &RoundEnd, answer: Option<&str>) {
    println!();
    let message = match end.result {
        RoundResult::Won => end.message.green().bold(),
        RoundResult::Lost | RoundResult::TimedOut => end.message.red().bold(),
    };
    println!("{message}");
    if !end.result.is_win()
        && let Some(answer) = answer
    {
        println!("The word was {}", answer.bright_yellow().bold());
    }
    if let Some(award) = end.award {
        println!("Points this round: {}", award.to_string().bright_yellow());
    }
}

/// Print why a guess was not played
pub fn print_rejection(rejection: GuessRejection) {
    let text = rejection.to_string();
    if rejection.should_shake() {
        println!("{}", format!("✗ {text}").red());
    } else {
        println!("{}", text.bright_black());
    }
}

/// Print a revealed hint
pub fn print_hint(title: &str, lines: &[String]) {
    println!("\n💡 {}", title.bright_cyan().bold());
    if lines.is_empty() {
        println!("   {}", "(nothing available)".bright_black());
    }
    for line in lines {
        println!("   {line}");
    }
}

pub fn print_hint_error(error: HintError) {
    println!("{}", error.to_string().yellow());
}

/// Print today's daily status for one language
pub fn print_daily_status(status: &DailyStatus) {
    banner(&format!(
        "WORD OF THE DAY  {}  {}",
        status.language.name(),
        status.date
    ));
    println!("   Key: {}", status.key.bright_black());
    let Some(record) = &status.record else {
        println!("   {}", "Not played yet".bright_black());
        return;
    };
    println!();
    for entry in &record.guesses {
        println!("   {}  {}", format_guess_row(entry), entry.to_emoji());
    }
    println!();
    if record.win {
        println!(
            "   {}",
            format!("Solved in {}", record.guesses.len()).green().bold()
        );
    } else {
        println!("   {} {}", "Missed:".red().bold(), record.target.bright_yellow());
    }
}

/// Print the profile counters and the daily summary
pub fn print_stats(report: &StatsReport) {
    banner("PROFILE");
    println!("\n📊 {}", "Counters:".bright_cyan().bold());
    println!("   Timed words found:  {}", report.profile.total_points);
    println!("   Streak points:      {}", report.profile.streak_points);
    println!(
        "   Best timed score:   {}",
        report.profile.best_timed_score.to_string().bright_yellow().bold()
    );
    println!(
        "   Best streak score:  {}",
        report.profile.best_streak_score.to_string().bright_yellow().bold()
    );

    println!("\n📅 {} {}", "Daily:".bright_cyan().bold(), report.date);
    for status in &report.daily {
        let state = match &status.record {
            None => "not played".bright_black().to_string(),
            Some(record) if record.win => {
                format!("solved in {}", record.guesses.len()).green().to_string()
            }
            Some(_) => "missed".red().to_string(),
        };
        println!("   {:<10} {state}", status.language.name());
    }
    println!(
        "   {} of {} solved",
        report.daily_wins(),
        report.daily.len()
    );
}

/// Print how a score is assembled
pub fn print_score_breakdown(breakdown: &ScoreBreakdown) {
    banner("SCORE");
    let input = &breakdown.input;
    println!(
        "\n   {} in {} of {} attempts, {} letters",
        if input.is_win { "Won" } else { "Lost" },
        input.attempts_used,
        input.max_attempts,
        input.word_length
    );
    if !input.is_win {
        println!("\n   Total: {}", "0".bright_yellow().bold());
        return;
    }

    let subtotal = f64::from(breakdown.subtotal().max(1));
    let row = |label: &str, points: u32| {
        let bar = create_progress_bar(f64::from(points), subtotal, 20);
        println!("   {label:<16} {} {points:>4}", bar.green());
    };
    println!();
    row("Letters", breakdown.letters);
    row("Win bonus", breakdown.win_bonus);
    row("Unused attempts", breakdown.unused_bonus);
    row("Fast finish", breakdown.time_bonus);
    println!("   {:<16} {:>25}", "Subtotal", breakdown.subtotal());
    println!("   {:<16} {:>25}", "× Streak", format!("{:.2}", breakdown.streak_multiplier));
    println!("   {:<16} {:>25}", "× Hard mode", format!("{:.2}", breakdown.hard_mode_multiplier));
    println!(
        "\n   Total: {}",
        breakdown.total.to_string().bright_yellow().bold()
    );
}
