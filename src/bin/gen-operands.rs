use std::io::{self, BufWriter};

use anyhow::Result;
use clap::Parser;
use divperf::generate::{Generator, NUMERATOR_BITS};
use divperf::logging;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Print random division operands, one `nbits dbits n d` line per pair.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Numerator bit lengths to sample
    #[arg(long, value_delimiter = ',', default_values_t = NUMERATOR_BITS)]
    bits: Vec<u64>,

    /// Seed for a reproducible operand file
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut generator = Generator::with_numerator_bits(rng, args.bits)?;

    let stdout = io::stdout();
    generator.write_to(BufWriter::new(stdout.lock()))?;
    Ok(())
}
