use std::fs::File;
use std::hint::black_box;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use num_bigint::BigUint;
use num_traits::Zero;
use static_assertions::const_assert;
use tracing::{debug, info};

use crate::error::Error;
use crate::op::DivOp;
use crate::record::{OperandRecord, TimingRecord};

/// File the timer reads when no input is given
pub const DEFAULT_INPUT: &str = "rands.txt";

/// Divisions timed per record
pub const DEFAULT_REPETITIONS: u32 = 100;

const_assert!(DEFAULT_REPETITIONS > 0);

/// Applies `op` to `n` and `d` `reps` times and returns the average
/// wall-clock time of one application.
///
/// `d` must be non-zero and `reps` positive.
pub fn time_op(op: DivOp, n: &BigUint, d: &BigUint, reps: u32) -> Duration {
    let start = Instant::now();
    for _ in 0..reps {
        black_box(op.apply(n, d));
    }
    start.elapsed() / reps
}

pub struct Timer {
    reps: u32,
    op: DivOp,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            reps: DEFAULT_REPETITIONS,
            op: DivOp::default(),
        }
    }
}

impl Timer {
    pub fn new(reps: u32) -> Result<Self, Error> {
        if reps == 0 {
            return Err(Error::ZeroRepetitions);
        }
        Ok(Self {
            reps,
            op: DivOp::default(),
        })
    }

    pub fn with_op(mut self, op: DivOp) -> Self {
        self.op = op;
        self
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn op(&self) -> DivOp {
        self.op
    }

    /// Times the division of one record; `line` only labels the error.
    pub fn measure(&self, record: &OperandRecord, line: usize) -> Result<TimingRecord, Error> {
        if record.denominator.is_zero() {
            return Err(Error::DivisionByZero { line });
        }
        let per_op = time_op(self.op, &record.numerator, &record.denominator, self.reps);
        Ok(TimingRecord {
            nbits: record.nbits,
            dbits: record.dbits,
            nanos: u64::try_from(per_op.as_nanos()).unwrap_or(u64::MAX),
        })
    }

    /// Opens `path` and measures it with [`Timer::run`].
    ///
    /// A file that cannot be opened fails before anything is written.
    pub fn run_path<W: Write>(&self, path: &Path, out: W) -> Result<usize, Error> {
        let file = File::open(path).map_err(|source| Error::Input {
            path: path.to_path_buf(),
            source,
        })?;
        info!(input = %path.display(), reps = self.reps, op = %self.op, "timing divisions");
        self.run(BufReader::new(file), out)
    }

    /// Measures every line of `input` in order, writing one result line per
    /// record as soon as it is known.
    ///
    /// Stops at the first bad line. Results already written stay written.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut out: W) -> Result<usize, Error> {
        let mut measured = 0;
        for (index, line) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            let record: OperandRecord = line.parse().map_err(|source| Error::Record {
                line: line_no,
                source,
            })?;
            let timing = self.measure(&record, line_no)?;
            debug!(
                line = line_no,
                nbits = timing.nbits,
                dbits = timing.dbits,
                nanos = timing.nanos,
                op = %self.op,
                "timed division"
            );
            writeln!(out, "{}", timing)?;
            out.flush()?;
            measured += 1;
        }
        info!(records = measured, reps = self.reps, "timing run complete");
        Ok(measured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::generate::Generator;
    use num_bigint::RandBigInt;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn run_str(timer: &Timer, input: &str) -> (Result<usize, Error>, String) {
        let mut out = Vec::new();
        let result = timer.run(input.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn simple_record() {
        let (result, out) = run_str(&Timer::default(), "8 4 200 10\n");
        assert_eq!(result.unwrap(), 1);

        let fields: Vec<&str> = out.trim_end().split(' ').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], "8");
        assert_eq!(fields[1], "4");
        assert!(fields[2].parse::<u64>().is_ok());
    }

    #[test]
    fn measure_keeps_bit_lengths() {
        let record: OperandRecord = "8 4 200 10".parse().unwrap();
        let timing = Timer::new(3).unwrap().measure(&record, 1).unwrap();
        assert_eq!((timing.nbits, timing.dbits), (8, 4));
    }

    #[test]
    fn zero_denominator_aborts() {
        let input = "8 4 200 10\n4 4 5 0\n8 4 200 10\n";
        let (result, out) = run_str(&Timer::default(), input);
        assert!(matches!(result, Err(Error::DivisionByZero { line: 2 })));
        // the first line was reported before the failure, nothing after it
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("8 4 "));
    }

    #[test]
    fn malformed_line_aborts() {
        let input = "8 4 200 10\n8 4 200\n";
        let (result, out) = run_str(&Timer::default(), input);
        match result {
            Err(Error::Record { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(source, RecordError::FieldCount { found: 3 });
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn blank_line_is_malformed() {
        let (result, out) = run_str(&Timer::default(), "\n8 4 200 10\n");
        assert!(matches!(result, Err(Error::Record { line: 1, .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn empty_input() {
        let (result, out) = run_str(&Timer::default(), "");
        assert_eq!(result.unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn zero_reps_rejected() {
        assert!(matches!(Timer::new(0), Err(Error::ZeroRepetitions)));
    }

    #[test]
    fn output_follows_input_order() {
        let mut generator =
            Generator::with_numerator_bits(StdRng::seed_from_u64(7), vec![64, 128, 256]).unwrap();
        let input: String = generator
            .records()
            .filter(|r| !r.denominator.is_zero())
            .map(|r| format!("{}\n", r))
            .collect();
        let expected: Vec<(u64, u64)> = input
            .lines()
            .map(|l| {
                let r: OperandRecord = l.parse().unwrap();
                (r.nbits, r.dbits)
            })
            .collect();

        let timer = Timer::new(5).unwrap();
        let (result, out) = run_str(&timer, &input);
        assert_eq!(result.unwrap(), expected.len());

        let got: Vec<(u64, u64)> = out
            .lines()
            .map(|l| {
                let f: Vec<u64> = l.split(' ').map(|t| t.parse().unwrap()).collect();
                (f[0], f[1])
            })
            .collect();
        assert_eq!(got, expected);

        // bit length columns do not depend on the run
        let (_, again) = run_str(&timer, &input);
        let cols = |s: &str| -> Vec<String> {
            s.lines()
                .map(|l| l.rsplit_once(' ').unwrap().0.to_owned())
                .collect()
        };
        assert_eq!(cols(&out), cols(&again));
    }

    #[test]
    fn large_division_takes_measurable_time() {
        let mut rng = StdRng::seed_from_u64(11);
        let record = OperandRecord {
            nbits: 300000,
            dbits: 299999,
            numerator: rng.gen_biguint(300000),
            denominator: rng.gen_biguint(299999),
        };
        assert!(!record.denominator.is_zero());

        for op in DivOp::ALL {
            let timing = Timer::new(3).unwrap().with_op(op).measure(&record, 1).unwrap();
            assert!(timing.nanos > 0, "{} reported zero", op);
        }
    }

    #[test]
    fn every_op_reports_each_line() {
        let input = "8 4 200 10\n16 8 60000 7\n";
        for op in DivOp::ALL {
            let timer = Timer::new(2).unwrap().with_op(op);
            let (result, out) = run_str(&timer, input);
            assert_eq!(result.unwrap(), 2);
            let cols: Vec<_> = out
                .lines()
                .map(|l| l.rsplit_once(' ').unwrap().0.to_owned())
                .collect();
            assert_eq!(cols, vec!["8 4", "16 8"]);
        }
    }

    #[test]
    fn every_op_refuses_zero_denominator() {
        for op in DivOp::ALL {
            let timer = Timer::default().with_op(op);
            let (result, out) = run_str(&timer, "4 4 5 0\n");
            assert!(matches!(result, Err(Error::DivisionByZero { line: 1 })));
            assert!(out.is_empty());
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("divperf-{}-{}", std::process::id(), name))
    }

    #[test]
    fn missing_input_fails_before_output() {
        let path = scratch_path("does-not-exist.txt");
        let mut out = Vec::new();
        match Timer::default().run_path(&path, &mut out) {
            Err(Error::Input { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn run_path_reads_file() {
        let path = scratch_path("operands.txt");
        std::fs::write(&path, "8 4 200 10\n32 16 4000000000 65535\n").unwrap();
        let mut out = Vec::new();
        let result = Timer::new(4).unwrap().run_path(&path, &mut out);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(result.unwrap(), 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("8 4 "));
        assert_eq!(text.lines().count(), 2);
    }
}
