// Branching Random Walk Sweep Runner
// Exhaustive per-trial leaf enumeration, N trials per depth, ascending depths
//
// Usage:
//   cargo run --release --bin sweep                               # n = 2..100, 100 trials each
//   cargo run --release --bin sweep -- --max-depth 20             # stop at n = 20
//   cargo run --release --bin sweep -- --trials 1000 --seed 42    # reproducible run
//   cargo run --release --bin sweep -- --json --no-progress       # JSON Lines on stdout
//
// Each trial at depth n walks 2^n leaves; depths past ~25 take a very long time.

mod progress;
mod report;

use brw_engine::{DepthSweep, SweepConfig};
use clap::Parser;
use progress::ProgressBar;
use std::time::Instant;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "sweep")]
#[command(about = "Estimate E[M_n] and Var(M_n) of a binary branching random walk maximum")]
#[command(version)]
struct Cli {
    /// First tree depth.
    #[arg(long, default_value = "2", allow_negative_numbers = true)]
    min_depth: i32,

    /// Last tree depth (inclusive).
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    max_depth: i32,

    /// Independent trees per depth.
    #[arg(long, default_value = "100")]
    trials: usize,

    /// Evenly spaced leaves printed from the first tree of each depth.
    #[arg(long, default_value = "10")]
    samples: usize,

    /// PRNG seed. Omit to seed from OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Emit one JSON object per depth instead of text.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

impl Cli {
    fn config(&self) -> SweepConfig {
        SweepConfig {
            min_depth: self.min_depth,
            max_depth: self.max_depth,
            trials_per_depth: self.trials,
            diagnostic_sample_count: self.samples,
            seed: self.seed,
        }
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(2);
    }

    if !cli.json {
        println!("\n  Branching Random Walk Sweep");
        println!(
            "  PRNG: ChaCha8Rng | Depths: {}..={} | Trials/depth: {} | Seed: {}",
            config.min_depth,
            config.max_depth,
            config.trials_per_depth,
            config.seed.map_or_else(|| "entropy".to_string(), |s| s.to_string()),
        );
    }
    tracing::info!(?config, "starting sweep");

    let suite_start = Instant::now();
    let progress = ProgressBar::new(!cli.no_progress);
    let sweep = DepthSweep::from_config(config).with_progress(progress);

    for item in sweep {
        let report = match item {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("sweep aborted: {}", e);
                std::process::exit(1);
            }
        };

        if cli.json {
            match report::json_line(&report) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    tracing::error!("failed to serialize depth {}: {}", report.depth, e);
                    std::process::exit(1);
                }
            }
        } else {
            for line in report::sample_lines(&report.samples) {
                println!("{}", line);
            }
            println!("{}", report::result_line(&report));
            println!("{}", report::timing_line(&report));
        }
    }

    tracing::info!(elapsed_secs = suite_start.elapsed().as_secs_f64(), "sweep complete");
}
