use std::io::Write;

use num_bigint::RandBigInt;
use rand::Rng;
use static_assertions::const_assert;
use tracing::{debug, info};

use crate::error::Error;
use crate::record::OperandRecord;

/// Numerator bit lengths sampled when none are given
pub const NUMERATOR_BITS: [u64; 4] = [1000, 10000, 100000, 300000];

/// Number of denominator sizes paired with every numerator size
pub const FRACTIONS: usize = 5;

const fn all_positive(bits: &[u64]) -> bool {
    let mut i = 0;
    while i < bits.len() {
        if bits[i] == 0 {
            return false;
        }
        i += 1;
    }
    true
}

const_assert!(all_positive(&NUMERATOR_BITS));

/// Denominator bit lengths paired with a numerator of `nbits` bits:
/// a tenth, a third, a half, three quarters, and one bit short.
///
/// Every entry is strictly below `nbits`. A zero `nbits` has no such
/// entries and is rejected.
pub fn denominator_bits(nbits: u64) -> Result<[u64; FRACTIONS], Error> {
    if nbits == 0 {
        return Err(Error::InvalidBitLength(nbits));
    }
    Ok([
        nbits / 10,
        nbits / 3,
        nbits / 2,
        (3 * nbits as u128 / 4) as u64,
        nbits - 1,
    ])
}

/// All `(nbits, dbits)` pairs in output order. A zero numerator length
/// contributes no pairs.
pub fn bit_matrix(numerator_bits: &[u64]) -> impl Iterator<Item = (u64, u64)> + '_ {
    numerator_bits.iter().flat_map(|&nbits| {
        denominator_bits(nbits)
            .into_iter()
            .flatten()
            .map(move |dbits| (nbits, dbits))
    })
}

/// Samples operand pairs over a matrix of bit lengths.
///
/// Each operand is uniform over `[0, 2^bits)`, so a denominator of zero is
/// possible for small bit lengths and is emitted as is.
pub struct Generator<R> {
    rng: R,
    numerator_bits: Vec<u64>,
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            numerator_bits: NUMERATOR_BITS.to_vec(),
        }
    }

    pub fn with_numerator_bits(rng: R, numerator_bits: Vec<u64>) -> Result<Self, Error> {
        if let Some(&bad) = numerator_bits.iter().find(|&&nbits| nbits == 0) {
            return Err(Error::InvalidBitLength(bad));
        }
        Ok(Self {
            rng,
            numerator_bits,
        })
    }

    pub fn numerator_bits(&self) -> &[u64] {
        &self.numerator_bits
    }

    /// Number of records a full pass produces
    pub fn len(&self) -> usize {
        self.numerator_bits.len() * FRACTIONS
    }

    pub fn is_empty(&self) -> bool {
        self.numerator_bits.is_empty()
    }

    pub fn records(&mut self) -> impl Iterator<Item = OperandRecord> + '_ {
        let Self {
            rng,
            numerator_bits,
        } = self;
        bit_matrix(numerator_bits).map(move |(nbits, dbits)| OperandRecord {
            nbits,
            dbits,
            numerator: rng.gen_biguint(nbits),
            denominator: rng.gen_biguint(dbits),
        })
    }

    /// Writes one line per record and returns how many were written.
    pub fn write_to<W: Write>(&mut self, mut out: W) -> Result<usize, Error> {
        let mut written = 0;
        for record in self.records() {
            debug!(
                nbits = record.nbits,
                dbits = record.dbits,
                numerator_bits = record.numerator.bits(),
                denominator_bits = record.denominator.bits(),
                "sampled operands"
            );
            writeln!(out, "{}", record)?;
            written += 1;
        }
        out.flush()?;
        info!(records = written, "generated operand pairs");
        Ok(written)
    }
}
