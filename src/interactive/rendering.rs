//! TUI rendering with ratatui
//!
//! Board, keyboard and side panels for the game screen, plus the home menu.

use super::app::{App, MessageStyle, Screen};
use crate::core::{GuessEntry, KEYBOARD_ROWS, KeyboardStatusMap, LetterStatus, Word};
use crate::engine::{ClockKind, GameMode, HintGate, HintKind, Session};
use crate::output::formatters::format_clock;
use crate::wordlists::Language;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.screen {
        Screen::Home => render_home(f, app, chunks[1]),
        Screen::Playing => {
            let main_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(60), // Board and keyboard
                    Constraint::Percentage(40), // Side panel
                ])
                .split(chunks[1]);
            render_game_panel(f, app, main_chunks[0]);
            render_side_panel(f, app, main_chunks[1]);
        }
    }
    render_status(f, app, chunks[2]);
}

fn tile_style(status: LetterStatus) -> Style {
    match status {
        LetterStatus::Correct => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        LetterStatus::Present => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        LetterStatus::Absent => Style::default().fg(Color::White).bg(Color::DarkGray),
        LetterStatus::Unknown => Style::default().fg(Color::White),
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.screen {
        Screen::Home => "🔤 POLYWORD".to_string(),
        Screen::Playing => format!(
            "🔤 POLYWORD - {} ({})",
            app.game.session().mode().label(),
            app.game.language().name()
        ),
    };
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_home(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let modes: Vec<ListItem> = GameMode::ALL
        .iter()
        .map(|mode| {
            let selected = *mode == app.menu.mode();
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", if selected { "▶" } else { " " }, mode.label()))
                .style(style)
        })
        .collect();
    f.render_widget(
        List::new(modes).block(
            Block::default()
                .title(" Mode (↑/↓) ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        ),
        chunks[0],
    );

    let languages: Vec<Span> = Language::ALL
        .iter()
        .flat_map(|language| {
            let style = if *language == app.menu.language() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            [Span::styled(format!(" {} ", language.name()), style), Span::raw(" ")]
        })
        .collect();
    let profile = app.game.session().profile();
    let content = vec![
        Line::from(languages),
        Line::from(""),
        Line::from(format!("Best timed score:  {}", profile.best_timed_score)),
        Line::from(format!("Best streak score: {}", profile.best_streak_score)),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: play   q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(content).block(
            Block::default()
                .title(" Language (←/→) ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        ),
        chunks[1],
    );
}

fn render_game_panel(f: &mut Frame, app: &App, area: Rect) {
    let session = app.game.session();
    let rows = session.config().max_attempts as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(rows + 2), // Board
            Constraint::Length(5),        // Keyboard
            Constraint::Min(0),
        ])
        .split(area);

    render_board(f, app, chunks[0]);
    render_keyboard(f, session.keyboard(), chunks[1]);
}

fn guess_line(entry: &GuessEntry) -> Line<'static> {
    let spans: Vec<Span> = entry
        .cells()
        .flat_map(|(letter, status)| {
            [Span::styled(format!(" {letter} "), tile_style(status)), Span::raw(" ")]
        })
        .collect();
    Line::from(spans)
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let session = app.game.session();
    let length = session.target().map_or(5, Word::len);
    let blank = || {
        Line::from(
            (0..length)
                .map(|_| Span::styled("[ ] ", Style::default().fg(Color::DarkGray)))
                .collect::<Vec<_>>(),
        )
    };

    let mut lines: Vec<Line> = session.guesses().iter().map(guess_line).collect();
    if !session.is_over() && lines.len() < session.config().max_attempts {
        let style = if app.is_shaking() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        };
        let typed: Vec<char> = session.current_input().chars().collect();
        let mut spans: Vec<Span> = (0..length)
            .map(|i| {
                typed
                    .get(i)
                    .map_or_else(|| Span::raw("[ ] "), |c| Span::styled(format!("[{c}] "), style))
            })
            .collect();
        if app.is_shaking() {
            spans.insert(0, Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    while lines.len() < session.config().max_attempts {
        lines.push(blank());
    }

    let title = if session.is_validating() {
        " Board (checking...) "
    } else {
        " Board "
    };
    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_keyboard(f: &mut Frame, map: &KeyboardStatusMap, area: Rect) {
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            Line::from(
                row.chars()
                    .flat_map(|c| [Span::styled(format!(" {c} "), tile_style(map.get(c))), Span::raw(" ")])
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Keyboard ").borders(Borders::ALL));
    f.render_widget(keyboard, area);
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Clock
            Constraint::Length(6), // Score
            Constraint::Min(5),    // Hints
            Constraint::Length(8), // Messages
        ])
        .split(area);

    render_clock(f, app.game.session(), chunks[0]);
    render_score(f, app, chunks[1]);
    render_hints(f, app, chunks[2]);
    render_messages(f, app, chunks[3]);
}

fn render_clock(f: &mut Frame, session: &Session, area: Rect) {
    let block = Block::default()
        .title(" Clock ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    match session.clock_kind() {
        Some(ClockKind::Countdown(limit)) => {
            let left = session.time_left().unwrap_or(0);
            let color = if left <= 10 { Color::Red } else { Color::Cyan };
            let percent = if limit == 0 {
                0
            } else {
                (u64::from(left) * 100 / u64::from(limit)) as u16
            };
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(color))
                .percent(percent.min(100))
                .label(format!("⏱ {}", format_clock(left)));
            f.render_widget(gauge, area);
        }
        Some(ClockKind::Stopwatch) => {
            let text = format!("⏱ {}", format_clock(session.elapsed()));
            f.render_widget(Paragraph::new(text).block(block), area);
        }
        None => f.render_widget(Paragraph::new("No clock").block(block), area),
    }
}

fn render_score(f: &mut Frame, app: &App, area: Rect) {
    let session = app.game.session();
    let profile = session.profile();
    let mut lines = vec![Line::from(format!("Points:  {}", session.points()))];
    match session.mode() {
        GameMode::Timed => {
            lines.push(Line::from(format!("Best:    {}", profile.best_timed_score)));
        }
        GameMode::Streak => {
            lines.push(Line::from(format!("Streak:  {}", session.streak_wins())));
            lines.push(Line::from(format!("Best:    {}", profile.best_streak_score)));
        }
        GameMode::Freeplay | GameMode::WordOfDay => {}
    }
    if session.penalties() > 0 {
        lines.push(Line::from(Span::styled(
            format!("Hints:   -{}", session.penalties()),
            Style::default().fg(Color::Yellow),
        )));
    }
    let score = Paragraph::new(lines).block(
        Block::default()
            .title(" Score ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(score, area);
}

fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let session = app.game.session();
    let mut lines = Vec::new();
    for (key, kind) in [('1', HintKind::Synonyms), ('2', HintKind::Definition)] {
        let revealed = app.current_hints().find(|hint| hint.kind == kind);
        if let Some(hint) = revealed {
            lines.push(Line::from(Span::styled(
                format!("{kind}:"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            if hint.lines.is_empty() {
                lines.push(Line::from("  (nothing available)"));
            }
            lines.extend(hint.lines.iter().map(|l| Line::from(format!("  {l}"))));
            continue;
        }
        let gate = session.hint_gate(kind);
        let style = if matches!(gate, HintGate::Unlocked) {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(format!("{key}: {kind} {gate}"), style)));
    }

    let hints = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Hints ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(hints, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();
    if app.game.session().network_degraded() {
        items.push(
            ListItem::new("⚠ Dictionary unreachable (Ctrl-O to dismiss)")
                .style(Style::default().fg(Color::Yellow)),
        );
    }
    items.extend(app.messages.iter().rev().map(|msg| {
        let style = match msg.style {
            MessageStyle::Info => Style::default().fg(Color::White),
            MessageStyle::Success => Style::default().fg(Color::Green),
            MessageStyle::Error => Style::default().fg(Color::Red),
        };
        ListItem::new(msg.text.clone()).style(style)
    }));

    let messages_list =
        List::new(items).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.screen {
        Screen::Home => "↑/↓: Mode | ←/→: Language | Enter: Play | q: Quit",
        Screen::Playing if app.game.session().is_over() => {
            "Enter: Continue | Ctrl-R: Restart | Esc: Menu"
        }
        Screen::Playing => {
            "Enter: Try | 1/2: Hints | Ctrl-R: Restart | Ctrl-N: Next | Ctrl-F/W/L: Fill/Win/Lose | Esc: Menu"
        }
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, area);
}
