use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::RecordError;

const FIELDS: usize = 4;

/// One division case: the bit lengths the operands were sampled with,
/// followed by the sampled operands themselves.
///
/// The bit lengths describe the sampling domain only. A sampled value may
/// have leading zero bits, so `numerator.bits()` can be below `nbits`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandRecord {
    pub nbits: u64,
    pub dbits: u64,
    pub numerator: BigUint,
    pub denominator: BigUint,
}

impl fmt::Display for OperandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.nbits, self.dbits, self.numerator, self.denominator
        )
    }
}

impl FromStr for OperandRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
        if tokens.len() != FIELDS {
            return Err(RecordError::FieldCount {
                found: tokens.len(),
            });
        }

        Ok(Self {
            nbits: parse_field("nbits", tokens[0])?,
            dbits: parse_field("dbits", tokens[1])?,
            numerator: parse_field("numerator", tokens[2])?,
            denominator: parse_field("denominator", tokens[3])?,
        })
    }
}

fn parse_field<T: FromStr>(field: &'static str, token: &str) -> Result<T, RecordError> {
    token.parse().map_err(|_| RecordError::InvalidField {
        field,
        token: token.to_owned(),
    })
}

/// Average cost of a single division for one operand record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingRecord {
    pub nbits: u64,
    pub dbits: u64,
    pub nanos: u64,
}

impl fmt::Display for TimingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.nbits, self.dbits, self.nanos)
    }
}
