//! Convert per-year CSV measurements into an RWL file.

use anyhow::{Context, Result};
use clap::Parser;
use ringwidth::{Record, RwlWriter, WriteOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "rwl-import")]
#[command(about = "Convert core,year,width CSV measurements into an RWL file")]
#[command(after_help = "CSV FORMAT:\n  \
    The first line is a header naming at least the columns core, year and width.\n  \
    Rows may appear in any order; each core must cover consecutive years.\n  \
    Cores with missing or repeated years are skipped with a warning.")]
struct Args {
    /// Input CSV file
    input: PathBuf,

    /// Output RWL file (defaults to the input with an .rwl extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Precision used to store widths
    #[arg(short, long, default_value = "4")]
    digits: u8,
}

/// One measured ring
#[derive(Debug, Deserialize)]
struct Row {
    core: String,
    year: i32,
    width: f64,
}

/// Group rows by core, dropping cores whose years are not contiguous
fn read_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut cores: BTreeMap<String, Vec<(i32, f64)>> = BTreeMap::new();
    for (index, row) in reader.deserialize::<Row>().enumerate() {
        // +2: header line and 1-based numbering
        let row = row.with_context(|| format!("{}: bad row on line {}", path.display(), index + 2))?;
        cores.entry(row.core).or_default().push((row.year, row.width));
    }

    let mut records = Vec::with_capacity(cores.len());
    for (core, mut rings) in cores {
        rings.sort_by_key(|&(year, _)| year);
        if rings.windows(2).any(|pair| pair[1].0 - pair[0].0 != 1) {
            warn!(core = %core, "years are not consecutive, skipping core");
            continue;
        }
        let first_year = rings[0].0;
        records.push(Record::new(core, first_year, rings.into_iter().map(|(_, width)| width).collect()));
    }
    Ok(records)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let output = args.output.clone().unwrap_or_else(|| args.input.with_extension("rwl"));

    let records = read_csv(&args.input)?;
    RwlWriter::new(WriteOptions::new().with_digits(args.digits))
        .write_path(&output, &records)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(series = records.len(), output = %output.display(), "wrote RWL file");
    Ok(())
}
