use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use divperf::logging;
use divperf::op::DivOp;
use divperf::timer::{Timer, DEFAULT_INPUT, DEFAULT_REPETITIONS};

/// Time big integer division for every operand line of a file.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Operand file written by gen-operands
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Divisions per operand pair
    #[arg(long, default_value_t = DEFAULT_REPETITIONS)]
    reps: u32,

    /// Division to time: div, rem, mod, divrem or divmod
    #[arg(long, default_value_t = DivOp::Div)]
    op: DivOp,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let timer = Timer::new(args.reps)?.with_op(args.op);
    timer.run_path(&args.input, io::stdout().lock())?;
    Ok(())
}
