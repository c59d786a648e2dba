//! Tournament CLI
//!
//! Play games between UCI engines and track the results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::{Engine, EngineError, Outcome};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tournament::{
    ArenaConfig, CsvRecorder, GameEntry, MatchError, MatchRunner, SessionReport,
    Standings, DEFAULT_CONFIG_PATH,
};
use uci_engine::{AdapterTimeouts, EngineSpec, UciEngine};

#[derive(Parser)]
#[command(name = "tournament", author, version, about = "Engine arena for UCI chess engines", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play games between engines drawn from the roster
    Play(PlayArgs),
    /// Print standings from a result log
    Standings {
        #[arg(short, long, default_value = "game_results.csv")]
        results: PathBuf,
    },
    /// Validate the config and start each engine once
    Check {
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

#[derive(Args)]
struct PlayArgs {
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Number of games to play
    #[arg(short, long)]
    games: Option<u32>,

    /// Plies after which a game is stopped
    #[arg(long)]
    max_plies: Option<u32>,

    #[arg(long)]
    move_time_ms: Option<u64>,

    /// Result log to append to
    #[arg(short, long)]
    results: Option<PathBuf>,

    /// Seed for drawing engines
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON session report here
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Play(args) => run_play(args),
        Command::Standings { results } => run_standings(&results),
        Command::Check { config } => run_check(&config),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn load_config(path: &Path) -> Result<ArenaConfig> {
    ArenaConfig::load(path).with_context(|| format!("failed to load {}", path.display()))
}

fn run_play(args: PlayArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    let settings = &mut config.arena;
    if let Some(games) = args.games {
        settings.games = games;
    }
    if let Some(max_plies) = args.max_plies {
        settings.max_plies = max_plies;
    }
    if let Some(move_time_ms) = args.move_time_ms {
        settings.move_time_ms = move_time_ms;
    }
    if let Some(results) = args.results {
        settings.results_file = results;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    config.validate()?;

    let settings = config.arena.clone();
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut recorder = CsvRecorder::new(&settings.results_file);
    let participants = config.engines.iter().map(|e| e.name.clone()).collect();
    let name = session_name(&args.config);
    let mut report = SessionReport::new(&name, participants, settings.clone());
    let timeouts = settings.adapter_timeouts();

    info!(games = settings.games, engines = config.engines.len(), "starting session");

    for game in 1..=settings.games {
        let launched = MatchRunner::from_roster(
            &config.engines,
            &mut rng,
            settings.match_config(),
            |spec| launch(spec, timeouts),
        );
        let mut runner = match launched {
            Ok(runner) => runner,
            Err(e) => {
                error!(game, error = %e, "could not start match");
                let (white, black) = e.launch_pairing().unwrap_or(("?", "?"));
                report.add_game(GameEntry::aborted(white, black, &e.to_string(), &[]));
                continue;
            }
        };

        match play_game(&mut runner, settings.max_plies) {
            Ok(outcome) => {
                runner
                    .record(&mut recorder, &outcome)
                    .with_context(|| format!("failed to write {}", settings.results_file.display()))?;
                println!(
                    "Game {}/{}: {} (W) vs {} (B) - {}",
                    game,
                    settings.games,
                    runner.white_name(),
                    runner.black_name(),
                    outcome
                );
                report.add_game(GameEntry::finished(
                    runner.white_name(),
                    runner.black_name(),
                    outcome.label(),
                    runner.uci_moves(),
                ));
            }
            Err(e) => {
                warn!(game, error = %e, "match aborted, no result recorded");
                report.add_game(GameEntry::aborted(
                    runner.white_name(),
                    runner.black_name(),
                    &e.to_string(),
                    runner.uci_moves(),
                ));
            }
        }
        runner.shutdown();
    }

    if let Some(path) = args.report {
        report
            .save(&path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!(path = %path.display(), "session report saved");
    }
    report.print_report();

    if settings.results_file.exists() {
        Standings::from_csv(&settings.results_file)?.print_leaderboard();
    }
    Ok(())
}

/// Sessions are named after their config file, `arena.toml` -> `arena`.
fn session_name(config: &Path) -> String {
    config
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "arena".to_string())
}

fn launch(spec: &EngineSpec, timeouts: AdapterTimeouts) -> Result<Box<dyn Engine>, EngineError> {
    Ok(Box::new(UciEngine::spawn(spec, timeouts)?))
}

fn play_game(runner: &mut MatchRunner, max_plies: u32) -> Result<Outcome, MatchError> {
    runner.initialize_game()?;
    runner.play_full_game(max_plies)
}

fn run_standings(results: &Path) -> Result<()> {
    let standings = Standings::from_csv(results)
        .with_context(|| format!("failed to read {}", results.display()))?;
    standings.print_leaderboard();
    Ok(())
}

fn run_check(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    let timeouts = config.arena.adapter_timeouts();

    let mut failed = 0;
    for spec in &config.engines {
        match UciEngine::spawn(spec, timeouts) {
            Ok(mut engine) => {
                println!(
                    "{:<20} ok ({})",
                    spec.name,
                    engine.id_name().unwrap_or("no id name")
                );
                engine.terminate()?;
            }
            Err(e) => {
                println!("{:<20} FAILED: {}", spec.name, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} engine(s) failed to start");
    }
    println!("Config {} is valid", path.display());
    Ok(())
}
