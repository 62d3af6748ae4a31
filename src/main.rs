//! Alien Invasion Simulator CLI
//!
//! Thin glue around the engine: flag parsing, tuning file, map file and the
//! final exit code. All simulation behavior lives in the library.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use alien_invasion::config::{Config, DEFAULT_CONFIG_PATH};
use alien_invasion::{Engine, InMemoryWorld, SimRng};

/// Command line arguments; every flag overrides the tuning file.
#[derive(Parser, Debug)]
#[command(name = "alien-invasion")]
#[command(about = "Simulates an alien invasion of a directed city graph")]
struct Args {
    /// Number of aliens to be spawned
    #[arg(short = 'n', long)]
    aliens: Option<u32>,

    /// Number of maximum moves
    #[arg(short = 's', long)]
    max_moves: Option<u64>,

    /// Map file path
    #[arg(short = 'm', long)]
    file: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Tuning file path
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("=========================");
    println!("Alien Invasion Simulator");
    println!("=========================");

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(&args.config).simulation;
    let aliens = args.aliens.unwrap_or(config.aliens);
    let max_moves = args.max_moves.unwrap_or(config.max_moves);
    let map_file = args.file.unwrap_or(config.map_file);
    let seed = args.seed.or(config.seed);

    println!("Map File Path:{}", map_file.display());
    println!("Number Of Aliens:{}", aliens);
    println!("Max Moves:{}\n", max_moves);

    let rng = match seed {
        Some(seed) => SimRng::seeded(seed),
        None => SimRng::from_entropy(),
    };

    let reader = BufReader::new(File::open(&map_file)?);
    let mut engine = Engine::new(aliens, max_moves, InMemoryWorld::new(), rng, io::stdout());
    engine.run(reader)?;
    Ok(())
}
