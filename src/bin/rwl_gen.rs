//! Generate synthetic ring-width series as an RWL file.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::Rng;
use ringwidth::{Record, RwlWriter, WriteOptions};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "rwl-gen")]
#[command(about = "Generate synthetic ring-width series for testing")]
struct Args {
    /// Output file path
    output: PathBuf,

    /// Number of series to generate
    #[arg(short, long, default_value = "20")]
    series: usize,

    /// Maximum number of years per series
    #[arg(short, long, default_value = "120")]
    years: usize,

    /// Latest possible last year of growth
    #[arg(long, default_value = "2020")]
    end: i32,

    /// Precision used to store widths
    #[arg(short, long, default_value = "4")]
    digits: u8,
}

/// Generate one series with an age trend and year-to-year noise
fn generate_series(rng: &mut impl Rng, name: String, args: &Args) -> Record {
    let nyears = rng.random_range(args.years.min(10).max(1)..=args.years);
    let last_year = args.end - rng.random_range(0..10);
    let first_year = last_year - nyears as i32 + 1;

    // Young trees grow wide rings that narrow with age
    let start: f64 = rng.random_range(1.5..4.0);
    let decay: f64 = rng.random_range(0.005..0.03);
    let widths = (0..nyears)
        .map(|age| {
            let trend = start * (-decay * age as f64).exp() + 0.3;
            let noise: f64 = rng.random_range(0.7..1.3);
            (trend * noise * 1000.0).round() / 1000.0
        })
        .collect();

    Record::new(name, first_year, widths)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    if args.years == 0 {
        bail!("--years must be at least 1");
    }

    let mut rng = rand::rng();
    let records: Vec<Record> = (0..args.series)
        .map(|i| generate_series(&mut rng, format!("GEN{:03}", i + 1), &args))
        .collect();

    RwlWriter::new(WriteOptions::new().with_digits(args.digits))
        .write_path(&args.output, &records)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Generated {} series", records.len());
    println!("Output: {}", args.output.display());
    Ok(())
}
