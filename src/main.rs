use std::path::PathBuf;

use clap::Parser;
use coup_sim::{Agent, Coup, GameConfig, RandomAgent};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Plays one game of Coup between random agents.
#[derive(Parser)]
struct Args {
    /// Number of seats at the table
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Path to a JSON game config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Chance that an agent challenges a declaration or a block
    #[arg(long, default_value_t = 0.2, value_parser = parse_rate)]
    challenge_rate: f64,

    /// Chance that an agent blocks a blockable move
    #[arg(long, default_value_t = 0.2, value_parser = parse_rate)]
    block_rate: f64,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = Pcg64::seed_from_u64(seed);

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let agents: Vec<(String, Box<dyn Agent>)> = (0..args.players)
        .map(|i| {
            let agent = RandomAgent::seeded(rng.gen()).with_rates(args.challenge_rate, args.block_rate);
            (format!("random{}", i + 1), Box::new(agent) as Box<dyn Agent>)
        })
        .collect();

    let mut coup = Coup::new(agents, config, &mut rng)?;
    let winner = coup.play(&mut rng)?;

    println!("{} wins after {} turns", coup.player_name(winner), coup.turn());
    Ok(())
}

fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|err| format!("{err}"))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("{rate} is not a probability between 0 and 1"))
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
