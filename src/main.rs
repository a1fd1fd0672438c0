#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use ir_battleship::{
    init_logging,
    link::in_memory::InMemoryLink,
    pilot::AutoPilot,
    Coordinator, PeerNode, SimConfig, Simulation, LOOP_RATE,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::RngCore;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Run two automatic peers in lock step and print a JSON report.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 0.0, help = "Probability of losing each IR byte")]
        loss: f64,
        #[arg(long, default_value_t = 2_000_000)]
        max_ticks: u64,
        #[arg(long, default_value_t = 1)]
        games: u32,
    },
    /// Run two automatic peers in real time and log the game.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1.0, help = "Clock multiplier over the device loop rate")]
        speed: f64,
        #[arg(long, help = "Print both boards when the game is over")]
        show: bool,
    },
}

#[cfg(feature = "std")]
fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().next_u64())
}

/// Scheduler tick period when running `speed` times faster than the device.
#[cfg(feature = "std")]
fn tick_period(speed: f64) -> anyhow::Result<Duration> {
    if !(speed.is_finite() && speed > 0.0) {
        anyhow::bail!("--speed must be positive, got {}", speed);
    }
    match Duration::try_from_secs_f64(1.0 / (LOOP_RATE as f64 * speed)) {
        Ok(period) if !period.is_zero() => Ok(period),
        _ => anyhow::bail!("--speed {} gives no usable tick period", speed),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim {
            seed,
            loss,
            max_ticks,
            games,
        } => {
            let seed = seed_or_random(seed);
            if !(0.0..=1.0).contains(&loss) {
                anyhow::bail!("--loss must be between 0 and 1, got {}", loss);
            }
            let mut sim = Simulation::new(SimConfig {
                seed,
                loss,
                max_ticks,
                games,
                ..SimConfig::default()
            });
            let report = sim.run();
            println!("{}", serde_json::to_string(&report)?);
        }
        Commands::Play { seed, speed, show } => {
            let period = tick_period(speed)?;
            let seed = seed_or_random(seed);
            log::info!("seed {}", seed);
            let max_ticks = 2_000_000;

            let (la, lb) = InMemoryLink::pair();
            let mut alpha = PeerNode::new(
                "alpha",
                Coordinator::new(),
                la,
                Box::new(AutoPilot::leader()),
                seed,
            );
            let mut bravo = PeerNode::new(
                "bravo",
                Coordinator::new(),
                lb,
                Box::new(AutoPilot::follower()),
                seed.wrapping_add(1),
            );

            tokio::try_join!(
                alpha.run(period, 1, max_ticks),
                bravo.run(period, 1, max_ticks)
            )?;

            for node in [&alpha, &bravo] {
                let stats = node.stats();
                log::info!(
                    "[{}] {} after {} strikes, {} hits",
                    node.name(),
                    if stats.games_won > 0 { "won" } else { "lost" },
                    stats.strikes_sent,
                    stats.hits_scored
                );
                if show {
                    let board = node.coordinator().board();
                    println!("{} ships:\n{}", node.name(), board.own_ships());
                    println!("{} hits on opponent:\n{}", node.name(), board.opponent_record());
                }
            }
        }
    }
    Ok(())
}
