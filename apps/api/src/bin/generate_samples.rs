//! Offline sample-data generator for exercising both endpoints.
//!
//! Writes `count` pairs of files into `--out-dir`:
//! - `closest_pair_points_{i}.txt`: JSON array of 100–200 integer `[x, y]` points in [0, 1000]².
//! - `integer_multiplication_{i}.txt`: JSON `{"x", "y"}` with two 50–100 digit integers
//!   as decimal strings, ready to POST to `/karatsuba`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "generate-samples", about = "Generate random closest-pair and Karatsuba inputs")]
struct Args {
    /// Directory the sample files are written to (created if missing).
    #[arg(long, default_value = "data_files")]
    out_dir: PathBuf,

    /// Number of samples of each kind.
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Seed for reproducible output; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct OperandPair {
    x: String,
    y: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let written = generate(&args.out_dir, args.count, &mut rng)?;
    info!(
        files = written.len(),
        dir = %args.out_dir.display(),
        "Data files generated successfully"
    );
    Ok(())
}

/// Writes all sample files and returns their paths in creation order.
fn generate(out_dir: &Path, count: usize, rng: &mut StdRng) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(count * 2);
    for i in 1..=count {
        let n = rng.gen_range(100..=200);
        let points = random_points(rng, n);
        let path = out_dir.join(format!("closest_pair_points_{i}.txt"));
        write_json(&path, &points)?;
        written.push(path);

        let digits = rng.gen_range(50..=100);
        let pair = OperandPair {
            x: random_operand(rng, digits),
            y: random_operand(rng, digits),
        };
        let path = out_dir.join(format!("integer_multiplication_{i}.txt"));
        write_json(&path, &pair)?;
        written.push(path);
    }
    Ok(written)
}

fn random_points(rng: &mut StdRng, n: usize) -> Vec<[i64; 2]> {
    (0..n)
        .map(|_| [rng.gen_range(0..=1000), rng.gen_range(0..=1000)])
        .collect()
}

/// A uniformly random `digits`-digit decimal integer (no leading zero).
fn random_operand(rng: &mut StdRng, digits: usize) -> String {
    let mut s = String::with_capacity(digits);
    s.push(char::from(b'0' + rng.gen_range(1..=9u8)));
    for _ in 1..digits {
        s.push(char::from(b'0' + rng.gen_range(0..=9u8)));
    }
    s
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
