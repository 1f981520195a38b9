use std::fmt;
use std::hint::black_box;
use std::str::FromStr;

use num_bigint::BigUint;
use num_integer::Integer;

use crate::error::Error;

/// A member of the big integer division family.
///
/// Operands are never negative here, so truncating and flooring agree:
/// `Rem` and `Mod` give the same value and differ only in how they are
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivOp {
    /// Floor quotient
    #[default]
    Div,
    /// Truncating remainder
    Rem,
    /// Floor modulus
    Mod,
    /// Truncating quotient and remainder in one pass
    DivRem,
    /// Floor quotient and modulus in one pass
    DivMod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DivOutput {
    Single(BigUint),
    Pair(BigUint, BigUint),
}

impl DivOp {
    pub const ALL: [DivOp; 5] = [
        DivOp::Div,
        DivOp::Rem,
        DivOp::Mod,
        DivOp::DivRem,
        DivOp::DivMod,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DivOp::Div => "div",
            DivOp::Rem => "rem",
            DivOp::Mod => "mod",
            DivOp::DivRem => "divrem",
            DivOp::DivMod => "divmod",
        }
    }

    /// Panics if `d` is zero.
    pub fn apply(self, n: &BigUint, d: &BigUint) -> DivOutput {
        let (n, d) = (black_box(n), black_box(d));
        match self {
            DivOp::Div => DivOutput::Single(n.div_floor(d)),
            DivOp::Rem => DivOutput::Single(n % d),
            DivOp::Mod => DivOutput::Single(n.mod_floor(d)),
            DivOp::DivRem => {
                let (q, r) = n.div_rem(d);
                DivOutput::Pair(q, r)
            }
            DivOp::DivMod => {
                let (q, r) = n.div_mod_floor(d);
                DivOutput::Pair(q, r)
            }
        }
    }
}

impl fmt::Display for DivOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DivOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DivOp::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| Error::UnknownOp(s.to_owned()))
    }
}
