//! Upsets CLI
//!
//! Simulate strength-limited engine games (or load a previous run) and
//! report how often the lower-rated side won.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use random_engine::RandomLauncher;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uci_client::{EngineCommand, UciLauncher};
use upset_core::{EngineLauncher, GameRecord, GameTable};
use upsets::{AppConfig, SimulationReport, SimulationRunner, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(name = "upsets", version)]
#[command(about = "Simulate strength-limited engine games and count upsets")]
struct Cli {
    /// Config file (defaults to ./upsets.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate games, or load them from the output file if it exists
    Run(RunArgs),
    /// Print the report for a saved game table
    Report {
        /// Game table to read (defaults to the configured output)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Number of games to play
    #[arg(short, long)]
    trials: Option<u32>,

    /// Engine executable, or `random` for the built-in random mover
    #[arg(short, long)]
    engine: Option<String>,

    /// Search depth per move
    #[arg(short, long)]
    depth: Option<u8>,

    /// Search time per move in milliseconds
    #[arg(long)]
    movetime: Option<u64>,

    /// Game table to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for ratings and random engine sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Games played in parallel
    #[arg(short, long)]
    workers: Option<usize>,

    /// Adjudicate games after this many plies
    #[arg(long)]
    max_plies: Option<u32>,

    /// Simulate even if the output file already exists
    #[arg(long)]
    regenerate: bool,
}

impl RunArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(engine) = &self.engine {
            config.engine.path = engine.clone();
        }
        if let Some(depth) = self.depth {
            config.engine.depth = Some(depth);
        }
        if let Some(movetime) = self.movetime {
            config.engine.movetime_ms = Some(movetime);
            // An explicit move time replaces the depth limit unless both are given
            if self.depth.is_none() {
                config.engine.depth = None;
            }
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(max_plies) = self.max_plies {
            config.max_plies = Some(max_plies);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("upsets=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None => AppConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("loading {}", DEFAULT_CONFIG_FILE)),
    }
}

fn make_launcher(config: &AppConfig) -> Box<dyn EngineLauncher> {
    if config.engine.is_random() {
        return Box::new(RandomLauncher::new());
    }

    let mut command = EngineCommand::new(config.engine.path.clone());
    for arg in &config.engine.args {
        command = command.arg(arg.clone());
    }
    let mut launcher = UciLauncher::new(command);
    for (name, value) in &config.engine.options {
        launcher = launcher.with_option(name.clone(), value.clone());
    }
    Box::new(launcher)
}

fn run(mut config: AppConfig, args: RunArgs) -> Result<()> {
    args.apply(&mut config);
    config.validate()?;

    let records: Vec<GameRecord> = if config.output.exists() && !args.regenerate {
        info!(path = %config.output.display(), "loading games from an earlier run");
        GameTable::load(&config.output)
            .with_context(|| format!("loading {}", config.output.display()))?
            .into_games()
    } else {
        let launcher = make_launcher(&config);
        let runner = SimulationRunner::new(config.simulation_config());
        let table = GameTable::new(
            runner
                .run(launcher.as_ref())
                .context("simulation aborted (is the engine installed and on PATH?)")?,
        );
        table
            .save(&config.output)
            .with_context(|| format!("saving {}", config.output.display()))?;
        info!(path = %config.output.display(), games = table.len(), "games saved");
        table.into_games()
    };

    SimulationReport::from_records(&records).print_report();
    Ok(())
}

fn report(config: AppConfig, input: Option<PathBuf>) -> Result<()> {
    let path = input.unwrap_or(config.output);
    let table =
        GameTable::load(&path).with_context(|| format!("loading {}", path.display()))?;
    SimulationReport::from_records(table.games()).print_report();
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Run(args) => run(config, args),
        Command::Report { input } => report(config, input),
    }
}
