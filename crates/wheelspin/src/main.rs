use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::runtime::Runtime;
use wheelspin::duration::DEFAULT_DURATION_MS;
use wheelspin::ipc::{self, Command};
use wheelspin::prize::PrizeSpec;
use wheelspin::{PrizeList, Session, SpinDuration, driver, select};

#[derive(Parser, Debug)]
#[command(name = "wheelspin", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Spin the running prize wheel.
    Spin,
    /// Bring the prize wheel window to the front.
    Show,
    /// Spin a wheel without a window and print each result.
    Simulate {
        /// A prize as NAME:WEIGHT or NAME:WEIGHT:#rrggbb (repeat for each prize)
        #[arg(short = 'p', long = "prize", required = true)]
        prizes: Vec<PrizeSpec>,

        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 1)]
        spins: u32,

        /// Spin duration in milliseconds
        #[arg(short = 'd', long, default_value_t = DEFAULT_DURATION_MS)]
        duration: u64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Draw many winners and compare the observed odds with the weights.
    Odds {
        /// A prize as NAME:WEIGHT or NAME:WEIGHT:#rrggbb (repeat for each prize)
        #[arg(short = 'p', long = "prize", required = true)]
        prizes: Vec<PrizeSpec>,

        /// Number of draws
        #[arg(short = 'n', long, default_value_t = 100_000)]
        draws: u64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Spin => ipc::send_command(Command::Spin),
        Commands::Show => ipc::send_command(Command::Show),
        Commands::Simulate {
            prizes,
            spins,
            duration,
            seed,
        } => simulate(
            prize_list(prizes)?,
            spins,
            SpinDuration::from_millis(duration),
            rng(seed),
        ),
        Commands::Odds {
            prizes,
            draws,
            seed,
        } => odds(prize_list(prizes)?, draws, rng(seed)),
    }
}

fn prize_list(specs: Vec<PrizeSpec>) -> anyhow::Result<PrizeList> {
    let prizes = specs
        .into_iter()
        .enumerate()
        .map(|(i, spec)| spec.into_prize(i))
        .collect();
    Ok(PrizeList::new(prizes)?)
}

fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

fn simulate(
    prizes: PrizeList,
    spins: u32,
    duration: SpinDuration,
    mut rng: StdRng,
) -> anyhow::Result<()> {
    let session = driver::shared(Session::new());

    Runtime::new()?.block_on(async {
        for _ in 0..spins {
            let Some(handle) = driver::start_spin(&session, &prizes, duration, &mut rng) else {
                anyhow::bail!("A spin is already running");
            };
            if let Some(outcome) = handle.await? {
                println!(
                    "{}: {} (rotation {:.1}°)",
                    outcome.id, outcome.winner.name, outcome.rotation
                );
            }
        }
        Ok::<(), anyhow::Error>(())
    })?;

    let session = session.lock();
    println!(
        "{} prizes handed out, most recent first:",
        session.distributed()
    );
    for entry in session.history().iter() {
        println!("  {}", entry);
    }
    Ok(())
}

fn odds(prizes: PrizeList, draws: u64, mut rng: StdRng) -> anyhow::Result<()> {
    if draws == 0 {
        anyhow::bail!("At least one draw is required");
    }

    let counts = select::tally(&prizes, draws, &mut rng);
    println!("{:<12} {:>9} {:>9}", "prize", "expected", "observed");
    for (i, (prize, count)) in prizes.iter().zip(&counts).enumerate() {
        let expected = prizes.share(i).unwrap_or_default();
        println!(
            "{:<12} {:>8.2}% {:>8.2}%",
            prize.name.label(),
            expected * 100.0,
            *count as f64 / draws as f64 * 100.0
        );
    }
    println!(
        "chi-squared: {:.3} ({} degrees of freedom)",
        select::chi_squared(&prizes, &counts),
        prizes.len() - 1
    );
    Ok(())
}
