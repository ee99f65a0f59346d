use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use holdem_equity::holdem::{
    DEFAULT_ITERATIONS, DEFAULT_MAX_SKIP_FACTOR, SimulationConfig, SimulationRequest,
    SimulationResult, simulate_parallel,
};

#[derive(Parser, Debug)]
#[command(
    name = "equity",
    about = "Estimate holdem equity between two hands or ranges",
    long_about = "Run a Monte Carlo simulation of one hand or range against another.\n\
                  Hands are written like 'AhKd', ranges like 'QQ+,AKs,22-66'."
)]
struct Args {
    /// First hand or range (e.g. "AhKd" or "QQ+,AKs")
    side_a: String,

    /// Second hand or range
    side_b: String,

    /// Known board cards (e.g. "Kd7s2c")
    #[arg(short, long, default_value = "")]
    board: String,

    /// Number of trials to run
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Worker threads to split the trials across
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Seed for a repeatable run
    #[arg(long)]
    seed: Option<u64>,

    /// Collision retries allowed per iteration before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_SKIP_FACTOR)]
    max_skip_factor: usize,

    /// Stop after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log filter used when RUST_LOG isn't set
    #[arg(long, default_value = "warn")]
    log: String,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_result(args: &Args, result: &SimulationResult) {
    println!("Board: {}", if args.board.is_empty() { "-" } else { args.board.as_str() });
    for (name, side) in [(&args.side_a, &result.side_a), (&args.side_b, &result.side_b)] {
        println!(
            "{:<20} {:>7.2}%  win {:>8}  tie {:>8}  lose {:>8}",
            name, side.equity_pct, side.win, side.tie, side.lose
        );
    }
    println!(
        "{} trials in {:.1}ms ({} skipped, {:?})",
        result.iterations_completed, result.elapsed_ms, result.skipped, result.stop_reason
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(&args.log);

    let request = SimulationRequest::new(args.side_a.as_str(), args.side_b.as_str())
        .with_board(args.board.as_str())
        .with_iterations(args.iterations);
    let mut config = SimulationConfig::default().with_max_skip_factor(args.max_skip_factor);
    if let Some(ms) = args.time_limit_ms {
        config = config.with_time_limit(std::time::Duration::from_millis(ms));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::rng().random()),
    };
    let result = simulate_parallel(&request, &config, args.threads, &mut rng, None)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&args, &result);
    }
    Ok(())
}
