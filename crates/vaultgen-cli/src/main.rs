//! vaultgen
//!
//! Reads a CSV of genesis grants and writes the derived vesting and vault
//! accounts as CSV on stdout. Logs go to stderr.
//!
//! Usage:
//!   vaultgen <CSV> [--params <json>] [--network-prefix <hrp>]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use vaultgen_genesis::{Batch, BatchParams};

#[derive(Parser, Debug)]
#[command(
    name = "vaultgen",
    version,
    about = "Derive genesis vesting and vault accounts from a grants CSV"
)]
struct Args {
    /// Grants CSV. The first line is a header and is skipped.
    csv: PathBuf,

    /// Batch parameters JSON. Missing fields take the mainnet defaults.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Address prefix override (e.g. "sm", "stest").
    #[arg(long)]
    network_prefix: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,vaultgen=debug")),
        )
        .init();

    let args = Args::parse();

    let mut params = load_params(args.params.as_deref())?;
    if let Some(prefix) = args.network_prefix {
        params.network_prefix = prefix;
    }
    let batch = Batch::new(params).context("invalid batch parameters")?;

    let file = File::open(&args.csv)
        .with_context(|| format!("could not open the CSV file {}", args.csv.display()))?;

    info!(
        input = %args.csv.display(),
        network_prefix = %batch.params().network_prefix,
        "processing grants"
    );
    let summary = batch
        .run(BufReader::new(file), io::stdout().lock())
        .context("could not process the CSV file")?;
    info!(
        read = summary.rows_read,
        accepted = summary.rows_accepted,
        rejected = summary.rows_rejected,
        "done"
    );

    Ok(())
}

/// Load batch parameters from a JSON file, or use the defaults.
fn load_params(path: Option<&Path>) -> anyhow::Result<BatchParams> {
    let Some(p) = path else {
        return Ok(BatchParams::default());
    };
    let json = std::fs::read_to_string(p)
        .with_context(|| format!("reading batch params from {}", p.display()))?;
    serde_json::from_str(&json).context("parsing batch params JSON")
}
