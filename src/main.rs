mod config;
mod encoding;
mod error;
mod processor;
mod protocol;
mod store;
mod util;

use std::fs::OpenOptions;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use config::{Config, LogConfig};
use processor::Processor;
use store::RecordStore;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// In-memory lookup engine for per-state reference records.
///
/// Reads `L`/`Q`/`X` commands on stdin, writes JSON replies on stdout and
/// diagnostics on stderr.
#[derive(Parser, Debug)]
#[command(name = "sus-engine", version)]
struct Args {
    /// INI configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of hash buckets (overrides the config file)
    #[arg(short, long)]
    buckets: Option<NonZeroUsize>,

    /// Log filter, e.g. "info" or "debug" (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log.level))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // stdout carries replies, so logs never go there
    match &log.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(buckets) = args.buckets {
        config.engine.buckets = buckets;
    }
    if let Some(level) = args.log_level {
        config.log.level = level;
    }

    init_logging(&config.log)?;

    info!("Starting sus-engine");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let buckets = config.engine.buckets;
    if !config::is_prime(buckets.get()) {
        warn!("Bucket count {} is not prime", buckets);
    }

    let mut processor = Processor::new(RecordStore::new(buckets));
    info!(
        "Record store ready with {} buckets",
        processor.store().bucket_count()
    );
    let summary = processor
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await;

    info!(
        "Engine {:?} after {} lines, {} records released",
        processor.state(),
        summary.lines,
        summary.released
    );
    Ok(())
}
