#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless ASCI-Fight match.

mod render;
mod strategy;

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{Context, Result};
use ascifight_core::{Event, Team, TeamName};
use ascifight_system_pathfinding::{PathPlanner, Pathfinding};
use ascifight_world::{self as world, query, Board, GameConfig, Layout};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs a scripted capture-the-flag match and reports the score.
#[derive(Debug, Parser)]
#[command(name = "ascifight")]
#[command(about = "Run a headless ASCI-Fight match between scripted teams")]
struct Args {
    /// Configuration file with a `[game]` table
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board layout file used instead of random setup
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 200)]
    ticks: u32,

    /// Seed overriding the configured one
    #[arg(long)]
    seed: Option<u64>,

    /// Comma separated team names for random setup
    #[arg(long, value_delimiter = ',', default_values = ["red", "blue"])]
    teams: Vec<String>,

    /// Print the board after the last tick
    #[arg(long)]
    show_board: bool,
}

/// Entry point for the ASCI-Fight command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,ascifight_cli=info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut board = build_board(&args, &config)?;
    let pathfinding = Pathfinding::new(PathPlanner::new(config.max_path_steps));

    let mut scores: BTreeMap<TeamName, u32> = query::teams(&board)
        .iter()
        .map(|team| (team.name.clone(), 0))
        .collect();

    for tick in 0..args.ticks {
        let snapshot = query::snapshot(&board);
        let commands = strategy::orders(&snapshot, &pathfinding);
        for event in world::apply_tick(&mut board, commands) {
            if let Event::FlagScored { actor, flag } = event {
                info!(tick, team = %actor.team, %flag, "flag captured");
                *scores.entry(actor.team).or_default() += 1;
            }
        }
    }

    for (team, score) in &scores {
        println!("{team}: {score}");
    }
    if args.show_board {
        print!("{}", render::board(&board));
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn build_board(args: &Args, config: &GameConfig) -> Result<Board> {
    if let Some(path) = &args.layout {
        let layout = Layout::load(path)
            .with_context(|| format!("failed to load layout from {}", path.display()))?;
        return Board::from_layout(config, &layout).context("invalid layout");
    }

    let teams: Vec<Team> = (0u32..)
        .zip(&args.teams)
        .map(|(number, name)| Team::new(name.as_str(), number))
        .collect();
    let mut board = Board::new(config).context("invalid configuration")?;
    board.setup_match(&teams).context("match setup failed")?;
    info!(teams = teams.len(), map_size = config.map_size, "match set up");
    Ok(board)
}
