//! Polyword - CLI
//!
//! Multi-language word-guessing game with a TUI and a line mode, plus
//! commands to inspect the daily round, the profile and the score formula.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use polyword::{
    commands::{collect_stats, daily_status, explain_score, reset_daily, run_simple},
    config::EngineConfig,
    engine::{
        Game, GameMode, HttpValidator, JsonFileStore, KeyValueStore, MemoryStore,
        OfflineValidator, RemoteValidator, ScoreInput,
    },
    output::{print_daily_status, print_score_breakdown, print_stats},
    wordlists::{Language, WordBank, loader::load_from_file},
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "polyword",
    about = "Word-guessing game in English, French, Spanish and Czech",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Language: en, fr, es, cz
    #[arg(short, long, global = true, default_value = "en")]
    lang: Language,

    /// Mode: freeplay (default), timed, wordofday, streak
    #[arg(short, long, global = true, default_value = "freeplay")]
    mode: GameMode,

    /// JSON file holding points, best scores and daily records
    #[arg(long, global = true, default_value = ".polyword/store.json")]
    store: PathBuf,

    /// Keep everything in memory; nothing is saved
    #[arg(long, global = true)]
    no_save: bool,

    /// Engine config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Custom word bank (TSV: word, definition, synonyms)
    #[arg(short, long, global = true)]
    bank: Option<PathBuf>,

    /// Never call the online dictionaries
    #[arg(long, global = true)]
    offline: bool,

    /// Fail every online lookup, to exercise the degraded-network path
    #[arg(long, global = true)]
    simulate_network_error: bool,

    /// Override the timed-mode countdown
    #[arg(long, global = true)]
    timer_seconds: Option<u32>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs here (the TUI logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple line mode (no TUI)
    Simple,

    /// Show today's word-of-the-day result
    Daily {
        /// Delete today's record so the day can be replayed
        #[arg(long)]
        reset: bool,
    },

    /// Show points, best scores and today's daily results
    Stats,

    /// Explain how a round would be scored
    Score {
        /// Attempts used
        #[arg(short, long, default_value = "4")]
        attempts: usize,

        /// Word length
        #[arg(short = 'n', long, default_value = "5")]
        length: usize,

        /// Seconds taken
        #[arg(short, long)]
        time: Option<u32>,

        /// Consecutive wins before this round
        #[arg(short, long, default_value = "0")]
        streak: u32,

        /// Apply the hard-mode multiplier
        #[arg(long)]
        hard: bool,

        /// Score a lost round
        #[arg(long)]
        loss: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.as_ref().unwrap_or(&Commands::Play);

    init_logging(&cli, matches!(command, Commands::Play))?;
    let config = load_config(&cli)?;
    let runtime = Runtime::new().context("failed to start async runtime")?;

    match command {
        Commands::Play => run_play_command(&cli, config, &runtime),
        Commands::Simple => runtime.block_on(run_simple_command(&cli, config)),
        Commands::Daily { reset } => runtime.block_on(run_daily_command(&cli, &config, *reset)),
        Commands::Stats => runtime.block_on(run_stats_command(&cli, &config)),
        Commands::Score {
            attempts,
            length,
            time,
            streak,
            hard,
            loss,
        } => {
            let input = if *loss {
                ScoreInput::loss(*attempts, config.max_attempts, *length)
            } else {
                ScoreInput::win(*attempts, config.max_attempts, *length)
            };
            let input = time
                .map_or(input, |secs| input.with_time(secs))
                .with_streak(*streak)
                .with_hard_mode(*hard || config.hard_mode);
            print_score_breakdown(&explain_score(input));
            Ok(())
        }
    }
}

fn init_logging(cli: &Cli, tui: bool) -> Result<()> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("polyword={level}")));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // Anything written to the terminal would corrupt the TUI
        None if tui => builder.with_writer(std::io::sink).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seconds) = cli.timer_seconds {
        config.timer_seconds = seconds;
    }
    config.validate()?;
    Ok(config)
}

fn load_bank(language: Language, path: Option<&Path>) -> Result<WordBank> {
    match path {
        Some(path) => load_from_file(language, path)
            .with_context(|| format!("failed to load word bank {}", path.display())),
        None => Ok(WordBank::embedded(language)),
    }
}

async fn open_store(cli: &Cli) -> Result<Arc<dyn KeyValueStore>> {
    if cli.no_save {
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = JsonFileStore::open(&cli.store)
        .await
        .with_context(|| format!("failed to open store {}", cli.store.display()))?;
    Ok(Arc::new(store))
}

async fn build_game(cli: &Cli, config: EngineConfig, bank: WordBank) -> Result<Game> {
    let store = open_store(cli).await?;
    let remote: Arc<dyn RemoteValidator> = if cli.offline {
        Arc::new(OfflineValidator)
    } else {
        Arc::new(HttpValidator::new(&config))
    };
    let game = Game::builder(store, remote)
        .config(config)
        .simulate_network_error(cli.simulate_network_error)
        .build(cli.mode, bank)
        .await?;
    Ok(game)
}

fn run_play_command(cli: &Cli, config: EngineConfig, runtime: &Runtime) -> Result<()> {
    use polyword::interactive::{App, run_tui};

    let bank = load_bank(cli.lang, cli.bank.as_deref())?;
    let custom = cli.bank.is_some().then(|| bank.clone());
    let game = runtime.block_on(build_game(cli, config, bank))?;
    let app = App::new(game);
    let app = match custom {
        Some(bank) => app.with_custom_bank(bank),
        None => app,
    };
    run_tui(app, runtime)
}

async fn run_simple_command(cli: &Cli, config: EngineConfig) -> Result<()> {
    let bank = load_bank(cli.lang, cli.bank.as_deref())?;
    let mut game = build_game(cli, config, bank).await?;
    run_simple(&mut game).await
}

async fn run_daily_command(cli: &Cli, config: &EngineConfig, reset: bool) -> Result<()> {
    let store = open_store(cli).await?;
    let today = Local::now().date_naive();
    if reset {
        if reset_daily(&*store, cli.lang, today).await? {
            println!("Cleared today's {} record", cli.lang.name());
        } else {
            println!("No {} record for today", cli.lang.name());
        }
        return Ok(());
    }
    let status = daily_status(&*store, cli.lang, today, config.max_attempts).await?;
    print_daily_status(&status);
    Ok(())
}

async fn run_stats_command(cli: &Cli, config: &EngineConfig) -> Result<()> {
    let store = open_store(cli).await?;
    let report = collect_stats(&*store, Local::now().date_naive(), config.max_attempts).await?;
    print_stats(&report);
    Ok(())
}
