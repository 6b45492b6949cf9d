//! Simple interactive CLI mode
//!
//! Line-based play without the TUI: each line is a guess or a `:command`.
//! Clock ticks and the automatic advance are handled between lines.

use crate::core::Word;
use crate::engine::{
    Continuation, Game, GuessRejection, HintKind, Key, KeyOutcome, RoundEnd, TimerOutcome,
};
use crate::output::{
    print_board, print_hint, print_hint_error, print_keyboard, print_rejection, print_round_end,
    print_status_line,
};
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

const HELP: &str = "\
Type a word and press Enter to guess it.
Commands:
  :syn      reveal synonyms        :def      reveal the definition
  :next     next round             :restart  restart the mode
  :reveal   show the answer        :net      toggle simulated network errors
  :ok       dismiss the network warning
  :fill     fill all but the last row  :win / :lose  end the round
  :reset    clear today's daily record
  :zero     reset the points counter
  :quit     leave";

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if stdin cannot be read or the word bank cannot supply a
/// target.
pub async fn run_simple(game: &mut Game) -> anyhow::Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Polyword - Line Mode                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("{HELP}");

    render(game);
    if game.session().is_restored()
        && let Some(end) = game.session().outcome()
    {
        println!("\n{}", "Today's word has already been played.".bright_black());
        print_round_end(end, answer(game));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let deadline = game.advance_deadline();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_line(game, line.trim()).await? {
                    break;
                }
            }
            event = game.next_timer_event() => {
                match game.handle_timer_event(event).await {
                    TimerOutcome::RoundEnded(end) => {
                        println!();
                        print_round_end(&end, answer(game));
                        print_continuation(&end);
                    }
                    TimerOutcome::Tick => {
                        if let Some(left) = game.session().time_left()
                            && matches!(left, 30 | 10)
                        {
                            println!("\n{}", format!("⏱ {left}s left").yellow());
                        }
                    }
                    TimerOutcome::Stale => {}
                }
            }
            () = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if game.poll()? {
                    render(game);
                }
            }
        }
    }

    game.go_home().await;
    println!("\n👋 Thanks for playing!\n");
    Ok(())
}

/// Returns `false` when the player wants to leave
async fn handle_line(game: &mut Game, line: &str) -> anyhow::Result<bool> {
    match line {
        "" => {}
        ":quit" | ":q" | ":home" | ":exit" => return Ok(false),
        ":help" | ":h" => println!("{HELP}"),
        ":syn" => match game.request_synonyms() {
            Ok(synonyms) => print_hint(&HintKind::Synonyms.to_string(), &synonyms),
            Err(e) => print_hint_error(e),
        },
        ":def" => match game.request_definition() {
            Ok(definition) => print_hint(&HintKind::Definition.to_string(), &[definition]),
            Err(e) => print_hint_error(e),
        },
        ":next" => {
            game.next_round().await?;
            render(game);
        }
        ":restart" => {
            game.restart().await?;
            render(game);
        }
        ":reveal" => match game.reveal_answer() {
            Some(word) => println!("🔍 {}", word.bright_yellow().bold()),
            None => println!("{}", "No round in progress".bright_black()),
        },
        ":net" => {
            let enabled = !game.simulates_network_error();
            game.set_simulate_network_error(enabled);
            println!("Simulated network errors: {}", if enabled { "on" } else { "off" });
        }
        ":ok" => game.dismiss_network_warning(),
        ":fill" => {
            if game.autofill_board() {
                render(game);
            } else {
                println!("{}", "Nothing to fill".bright_black());
            }
        }
        ":win" | ":lose" => {
            let end = if line == ":win" {
                game.force_win().await
            } else {
                game.force_loss().await
            };
            match end {
                Some(end) => {
                    render(game);
                    print_round_end(&end, answer(game));
                    print_continuation(&end);
                }
                None => println!("{}", "No round in progress".bright_black()),
            }
        }
        ":reset" => {
            game.reset_word_of_day().await?;
            println!("Today's daily record cleared");
            render(game);
        }
        ":zero" => {
            game.reset_points().await;
            println!("Points reset");
        }
        command if command.starts_with(':') => {
            println!("{}", format!("Unknown command {command}, try :help").red());
        }
        word => guess(game, word).await,
    }
    Ok(true)
}

async fn guess(game: &mut Game, word: &str) {
    if game.session().is_over() {
        print_rejection(GuessRejection::RoundNotActive);
        return;
    }
    while !game.session().current_input().is_empty() {
        game.submit_key(Key::Delete).await;
    }
    for c in word.chars() {
        game.submit_key(Key::Letter(c)).await;
    }
    if game.session().current_input().chars().count() < word.chars().count() {
        print_rejection(GuessRejection::InvalidLength {
            expected: game.session().target().map_or(0, Word::len),
            got: word.chars().count(),
        });
        while !game.session().current_input().is_empty() {
            game.submit_key(Key::Delete).await;
        }
        return;
    }

    match game.submit_key(Key::Enter).await {
        KeyOutcome::Accepted(accepted) => {
            render(game);
            if let Some(end) = &accepted.round_end {
                print_round_end(end, answer(game));
                print_continuation(end);
            }
        }
        KeyOutcome::Rejected(rejection) => {
            print_rejection(rejection);
            if game.session().network_degraded() {
                print_status_line(game.session());
            }
        }
        KeyOutcome::Typed | KeyOutcome::Deleted | KeyOutcome::Ignored => {}
    }
}

fn render(game: &Game) {
    let session = game.session();
    println!();
    print_status_line(session);
    print_board(session);
    print_keyboard(session.keyboard());
}

fn answer(game: &Game) -> Option<&str> {
    game.session().target().map(Word::text)
}

fn print_continuation(end: &RoundEnd) {
    let hint = match end.continuation {
        Continuation::AwaitPlayer => ":next for another word",
        Continuation::Advance => "Next word coming up...",
        Continuation::SessionOver => ":restart to play again",
    };
    println!("{}", hint.bright_black());
}

fn prompt() -> std::io::Result<()> {
    print!("{} ", "›".bright_cyan());
    std::io::stdout().flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GameMode, MemoryStore, OfflineValidator, RoundResult};
    use crate::wordlists::{Language, WordBank};
    use chrono::NaiveDate;
    use std::sync::Arc;

    async fn game() -> Game {
        Game::builder(Arc::new(MemoryStore::new()), Arc::new(OfflineValidator))
            .fixed_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .seed(3)
            .build(GameMode::Freeplay, WordBank::embedded(Language::Spanish))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn dev_commands_drive_the_round() {
        let mut game = game().await;
        assert!(handle_line(&mut game, ":fill").await.unwrap());
        assert_eq!(game.session().guesses().len(), 5);

        assert!(handle_line(&mut game, ":win").await.unwrap());
        assert_eq!(game.session().outcome().unwrap().result, RoundResult::Won);

        assert!(handle_line(&mut game, ":restart").await.unwrap());
        assert!(handle_line(&mut game, ":lose").await.unwrap());
        assert_eq!(game.session().outcome().unwrap().result, RoundResult::Lost);
        assert_eq!(game.session().guesses().len(), 6);
    }

    #[tokio::test]
    async fn quit_commands_leave() {
        let mut game = game().await;
        assert!(!handle_line(&mut game, ":q").await.unwrap());
        assert!(handle_line(&mut game, ":bogus").await.unwrap());
    }
}
