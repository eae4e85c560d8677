//! `gf2-tools`: a small CLI around the `gf2` crate for ad hoc rank checks,
//! multiplications, and throughput comparisons. The CLI is a harness on
//! top of the library, not part of its core API.

use clap::{Parser, Subcommand, ValueEnum};
use gf2::config::Cache;
use gf2::error::DimensionError;
use gf2::matrix::Matrix;
use gf2::mul::Algorithm;
use rand::SeedableRng;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "gf2-tools", about = "Dense GF(2) linear algebra command-line tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a random matrix and report its rank.
    Rank {
        rows: usize,
        cols: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Multiply two random matrices and print a checksum of the result.
    Mul {
        rows: usize,
        inner: usize,
        cols: usize,
        #[arg(long, value_enum, default_value_t = CliAlgorithm::Naive)]
        algo: CliAlgorithm,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Wall-clock-compare the three multiplication algorithms.
    Bench {
        rows: usize,
        cols: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CliAlgorithm {
    Naive,
    M4rm,
    Strassen,
}

impl From<CliAlgorithm> for Algorithm {
    fn from(a: CliAlgorithm) -> Algorithm {
        match a {
            CliAlgorithm::Naive => Algorithm::Naive,
            CliAlgorithm::M4rm => Algorithm::M4rm,
            CliAlgorithm::Strassen => Algorithm::Strassen,
        }
    }
}

fn main() -> Result<(), DimensionError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    gf2::lifecycle::init_library();

    match Cli::parse().command {
        Command::Rank { rows, cols, seed } => {
            let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
            let mut a = Matrix::new(rows, cols);
            a.randomize(&mut rng);
            let rank = gf2::echelon::rank(&a);
            println!("rank: {rank}");
        }
        Command::Mul { rows, inner, cols, algo, seed } => {
            let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
            let mut a = Matrix::new(rows, inner);
            a.randomize(&mut rng);
            let mut b = Matrix::new(inner, cols);
            b.randomize(&mut rng);

            let cache = Cache::default();
            let product = gf2::mul::checked_mul(&a, &b, algo.into(), &cache)?;
            println!("checksum: {:.6}", product.density(0));
        }
        Command::Bench { rows, cols, seed } => {
            let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
            let mut a = Matrix::new(rows, cols);
            a.randomize(&mut rng);
            let mut b = Matrix::new(cols, rows);
            b.randomize(&mut rng);
            let cache = Cache::default();

            for (name, algo) in [
                ("naive", Algorithm::Naive),
                ("m4rm", Algorithm::M4rm),
                ("strassen", Algorithm::Strassen),
            ] {
                let start = Instant::now();
                let product = gf2::mul::checked_mul(&a, &b, algo, &cache)?;
                let elapsed = start.elapsed();
                println!("{name}: {elapsed:?} (density {:.4})", product.density(0));
            }
        }
    }

    Ok(())
}
