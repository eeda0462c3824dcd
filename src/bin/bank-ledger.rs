use std::fs::File;

use anyhow::{Context, Result};
use bank_ledger::bin_utils::{Report, Service};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries the CSV report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bank_ledger=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected a file name as the first argument")?;
    let report = match args.next().as_deref() {
        None => Report::Accounts,
        Some("--transactions") => Report::Transactions,
        Some(other) => anyhow::bail!("Unknown argument `{other}`, expected `--transactions`"),
    };
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        report,
        error_printer: Box::new(|line, err| eprintln!("Rejected line {line}: {err}")),
    };
    service.run()
}
