//! Summarize the series stored in an RWL file.

use anyhow::{Context, Result};
use clap::Parser;
use ringwidth::{ReadOptions, RwlReader};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "rwl-info")]
#[command(about = "Print one summary line per series in an RWL file")]
struct Args {
    /// RWL file to read
    file: PathBuf,

    /// Fixed precision (inferred from each terminator by default)
    #[arg(short, long)]
    digits: Option<u8>,

    /// Accept 999 / 9999 at the end of a row as a terminator
    #[arg(long)]
    legacy: bool,

    /// Legacy marker value to use instead of 999 / 9999 (repeatable)
    #[arg(long = "marker", requires = "legacy")]
    markers: Vec<i64>,

    /// Fail on series that end without a terminator
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut options = ReadOptions::new()
        .with_digits(args.digits)
        .with_legacy_markers(args.legacy)
        .with_required_terminator(args.strict);
    if !args.markers.is_empty() {
        options = options.with_legacy_marker_values(args.markers.clone());
    }

    let records = RwlReader::new(options)
        .read_path(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    println!("{:<10} {:>6} {:>6} {:>6} {:>8}", "series", "first", "last", "years", "mean");
    for record in &records {
        let mean = record.widths.iter().sum::<f64>() / record.nyears() as f64;
        println!(
            "{:<10} {:>6} {:>6} {:>6} {:>8.4}",
            record.name,
            record.first_year,
            record.last_year(),
            record.nyears(),
            mean
        );
    }

    if let (Some(first), Some(last)) = (
        records.iter().map(|r| r.first_year).min(),
        records.iter().map(|r| r.last_year()).max(),
    ) {
        println!();
        println!("{} series spanning {first}-{last}", records.len());
    }
    Ok(())
}
