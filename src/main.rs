//! Q-RISC: simulated PQC accelerator design miner.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! prints the banner, runs one mining cycle (Ctrl+C stops it early) and
//! optionally exports the session report.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use qrisc::config::{self, PacingConfig};
use qrisc::console::{self, Console};
use qrisc::engine::miner::Miner;
use qrisc::storage;

#[derive(Parser, Debug)]
#[command(name = "qrisc", version, about = "Simulated post-quantum accelerator design miner")]
struct Cli {
    /// Path to the TOML config (defaults apply if it does not exist)
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Number of mining iterations (overrides config)
    #[arg(long)]
    iterations: Option<u32>,

    /// RNG seed for a reproducible session (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the cosmetic delays between steps
    #[arg(long)]
    no_delay: bool,

    /// Export the session report as JSON (a file, or a directory for a
    /// timestamped file name)
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    init_logging();

    let mut cfg = config::AppConfig::load_or_default(&cli.config)?;
    if let Some(n) = cli.iterations {
        cfg.miner.iterations = n;
    }
    if cli.seed.is_some() {
        cfg.miner.seed = cli.seed;
    }
    if cli.no_delay {
        cfg.pacing = PacingConfig::instant();
    }

    println!("{}", console::banner());
    info!(
        miner = %cfg.miner.name,
        version = %cfg.miner.version,
        network = %cfg.miner.subnet_id,
        iterations = cfg.miner.iterations,
        seed = ?cfg.miner.seed,
        "Q-RISC miner starting up"
    );

    let iterations = cfg.miner.iterations;
    let mut miner = Miner::from_config(cfg, Console::stdout());
    miner.announce()?;

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let report = miner.run_mining_cycle_until(iterations, shutdown).await?;

    if let Some(target) = cli.report.as_deref() {
        let written = storage::save_report(&report, target)?;
        println!("💾 Session report written to {}", written.display());
    }

    println!("{}", console::epilogue(chrono::Local::now()));
    Ok(())
}

/// Initialise the `tracing` subscriber.
///
/// Defaults to warnings only so log lines don't interleave with the
/// console show; `RUST_LOG=qrisc=info` brings them back.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("qrisc=warn"));

    let json_logging = std::env::var("QRISC_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
