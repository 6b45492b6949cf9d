//! TUI application state and logic

use crate::engine::{
    Continuation, Game, GameMode, HintKind, Key, KeyOutcome, RoundEnd, RoundId, TimerOutcome,
};
use crate::wordlists::{Language, WordBank};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// How long a rejected row stays highlighted
const SHAKE_DURATION: Duration = Duration::from_millis(400);
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Playing,
}

/// Mode and language picked on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub mode: usize,
    pub language: usize,
}

impl MenuState {
    fn for_game(game: &Game) -> Self {
        let mode = game.session().mode();
        let language = game.language();
        Self {
            mode: GameMode::ALL.iter().position(|m| *m == mode).unwrap_or(0),
            language: Language::ALL.iter().position(|l| *l == language).unwrap_or(0),
        }
    }

    #[must_use]
    pub fn mode(self) -> GameMode {
        GameMode::ALL[self.mode % GameMode::ALL.len()]
    }

    #[must_use]
    pub fn language(self) -> Language {
        Language::ALL[self.language % Language::ALL.len()]
    }
}

/// A hint revealed for a specific round
#[derive(Debug, Clone)]
pub struct RevealedHint {
    pub round: RoundId,
    pub kind: HintKind,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App {
    pub game: Game,
    pub screen: Screen,
    pub menu: MenuState,
    pub hints: Vec<RevealedHint>,
    pub messages: Vec<Message>,
    pub shake_until: Option<Instant>,
    pub should_quit: bool,
    /// Bank loaded from `--bank`, used whenever its language is picked
    custom_bank: Option<WordBank>,
}

impl App {
    #[must_use]
    pub fn new(game: Game) -> Self {
        let menu = MenuState::for_game(&game);
        let mut app = Self {
            game,
            screen: Screen::Playing,
            menu,
            hints: Vec::new(),
            messages: Vec::new(),
            shake_until: None,
            should_quit: false,
            custom_bank: None,
        };
        app.add_message(
            "Type a word and press Enter. 1: synonyms, 2: definition, Esc: menu",
            MessageStyle::Info,
        );
        if app.game.session().is_restored()
            && let Some(end) = app.game.session().outcome().cloned()
        {
            app.add_message("Today's word has already been played", MessageStyle::Info);
            app.announce(&end);
        }
        app
    }

    /// Keep a custom bank for its language across menu switches
    #[must_use]
    pub fn with_custom_bank(mut self, bank: WordBank) -> Self {
        self.custom_bank = Some(bank);
        self
    }

    fn bank_for(&self, language: Language) -> WordBank {
        match &self.custom_bank {
            Some(bank) if bank.language() == language => bank.clone(),
            _ => WordBank::embedded(language),
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 6 messages
        if self.messages.len() > 6 {
            self.messages.remove(0);
        }
    }

    #[must_use]
    pub fn is_shaking(&self) -> bool {
        self.shake_until.is_some_and(|until| Instant::now() < until)
    }

    /// Hints revealed during the current round
    pub fn current_hints(&self) -> impl Iterator<Item = &RevealedHint> {
        let round = self.game.session().round();
        self.hints.iter().filter(move |hint| hint.round == round)
    }

    fn announce(&mut self, end: &RoundEnd) {
        let style = if end.result.is_win() {
            MessageStyle::Success
        } else {
            MessageStyle::Error
        };
        for line in end.message.lines() {
            self.add_message(line, style);
        }
        if !end.result.is_win()
            && let Some(answer) = self.game.session().target().map(ToString::to_string)
        {
            self.add_message(&format!("The word was {answer}"), MessageStyle::Info);
        }
        let follow_up = match end.continuation {
            Continuation::AwaitPlayer => "Press Enter for another word",
            Continuation::Advance => "Next word coming up...",
            Continuation::SessionOver => "Press Enter to play again",
        };
        self.add_message(follow_up, MessageStyle::Info);
    }

    async fn press(&mut self, key: Key) -> Result<()> {
        if key == Key::Enter && self.game.session().is_over() {
            self.hints.clear();
            return Ok(self.game.next_round().await?);
        }
        match self.game.submit_key(key).await {
            KeyOutcome::Accepted(accepted) => {
                if let Some(end) = &accepted.round_end {
                    self.announce(end);
                }
            }
            KeyOutcome::Rejected(rejection) => {
                if rejection.should_shake() {
                    self.shake_until = Some(Instant::now() + SHAKE_DURATION);
                }
                self.add_message(&rejection.to_string(), MessageStyle::Error);
            }
            KeyOutcome::Typed | KeyOutcome::Deleted | KeyOutcome::Ignored => {}
        }
        Ok(())
    }

    fn reveal(&mut self, kind: HintKind) {
        let result = match kind {
            HintKind::Synonyms => self.game.request_synonyms(),
            HintKind::Definition => self.game.request_definition().map(|d| vec![d]),
        };
        match result {
            Ok(lines) => {
                let round = self.game.session().round();
                self.hints.retain(|hint| hint.round == round && hint.kind != kind);
                self.hints.push(RevealedHint { round, kind, lines });
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    async fn handle_playing_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => {
                self.hints.clear();
                self.game.restart().await?;
                self.add_message("Restarted", MessageStyle::Info);
            }
            KeyCode::Char('n') if ctrl => {
                self.hints.clear();
                self.game.next_round().await?;
            }
            KeyCode::Char('t') if ctrl => {
                let enabled = !self.game.simulates_network_error();
                self.game.set_simulate_network_error(enabled);
                self.add_message(
                    &format!("Simulated network errors {}", if enabled { "on" } else { "off" }),
                    MessageStyle::Info,
                );
            }
            KeyCode::Char('a') if ctrl => {
                let answer = self.game.reveal_answer().map(ToString::to_string);
                if let Some(answer) = answer {
                    self.add_message(&format!("Answer: {answer}"), MessageStyle::Info);
                }
            }
            KeyCode::Char('d') if ctrl => {
                self.game.reset_word_of_day().await?;
                self.add_message("Today's daily record cleared", MessageStyle::Info);
            }
            KeyCode::Char('p') if ctrl => {
                self.game.reset_points().await;
                self.add_message("Points reset", MessageStyle::Info);
            }
            KeyCode::Char('o') if ctrl => self.game.dismiss_network_warning(),
            KeyCode::Char('f') if ctrl => {
                if !self.game.autofill_board() {
                    self.add_message("Nothing to fill", MessageStyle::Error);
                }
            }
            KeyCode::Char('w') if ctrl => {
                if let Some(end) = self.game.force_win().await {
                    self.announce(&end);
                }
            }
            KeyCode::Char('l') if ctrl => {
                if let Some(end) = self.game.force_loss().await {
                    self.announce(&end);
                }
            }
            KeyCode::Char('1') => self.reveal(HintKind::Synonyms),
            KeyCode::Char('2') => self.reveal(HintKind::Definition),
            KeyCode::Char(c) if c.is_alphabetic() => self.press(Key::Letter(c)).await?,
            KeyCode::Backspace => self.press(Key::Delete).await?,
            KeyCode::Enter => self.press(Key::Enter).await?,
            KeyCode::Esc => {
                self.game.go_home().await;
                self.hints.clear();
                self.menu = MenuState::for_game(&self.game);
                self.screen = Screen::Home;
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        let modes = GameMode::ALL.len();
        let languages = Language::ALL.len();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.menu.mode = (self.menu.mode + modes - 1) % modes,
            KeyCode::Down => self.menu.mode = (self.menu.mode + 1) % modes,
            KeyCode::Left => self.menu.language = (self.menu.language + languages - 1) % languages,
            KeyCode::Right => self.menu.language = (self.menu.language + 1) % languages,
            KeyCode::Enter => {
                let mode = self.menu.mode();
                let language = self.menu.language();
                let bank = self.bank_for(language);
                self.game.switch(mode, bank).await?;
                self.messages.clear();
                self.add_message(
                    &format!("{} in {}", mode.label(), language.name()),
                    MessageStyle::Info,
                );
                if let Some(end) = self.game.session().outcome().cloned() {
                    self.add_message("Today's word has already been played", MessageStyle::Info);
                    self.announce(&end);
                }
                self.screen = Screen::Playing;
            }
            _ => {}
        }
        Ok(())
    }

    /// Process one terminal key event
    ///
    /// # Errors
    ///
    /// Returns an error when the word bank cannot supply a target or the
    /// store cannot be written.
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.screen {
            Screen::Home => self.handle_home_key(key).await,
            Screen::Playing => self.handle_playing_key(key).await,
        }
    }

    /// Apply clock ticks that arrived since the last frame and fire a due
    /// automatic advance
    ///
    /// # Errors
    ///
    /// Returns an error when the word bank cannot supply a target.
    pub async fn tick(&mut self) -> Result<()> {
        while let Some(event) = self.game.try_next_timer_event() {
            if let TimerOutcome::RoundEnded(end) = self.game.handle_timer_event(event).await {
                self.announce(&end);
            }
        }
        let round = self.game.session().round();
        if self.game.poll()? && self.game.session().round() != round {
            self.hints.clear();
        }
        Ok(())
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App, runtime: &Runtime) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app, runtime);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: &Runtime,
) -> Result<()> {
    loop {
        runtime.block_on(app.tick())?;
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(FRAME_INTERVAL)?
            && let Event::Key(key) = event::read()?
            // Only process key press events (fixes Windows double-input bug)
            && key.kind == KeyEventKind::Press
        {
            if key.code == KeyCode::Enter && app.screen == Screen::Playing {
                // Draw the "checking" state before a possibly slow lookup
                terminal.draw(|f| super::rendering::ui(f, &app))?;
            }
            runtime.block_on(app.handle_key(key))?;
        }

        if app.should_quit {
            break;
        }
    }

    runtime.block_on(app.game.go_home());
    Ok(())
}
