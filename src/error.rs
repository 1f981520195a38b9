use std::path::PathBuf;

use thiserror::Error;

/// A line of operand text that could not be read as a record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 4 fields, found {found}")]
    FieldCount { found: usize },

    #[error("invalid {field} `{token}`")]
    InvalidField { field: &'static str, token: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("line {line}: division by zero")]
    DivisionByZero { line: usize },

    #[error("cannot open {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown division op `{0}`, expected one of div, rem, mod, divrem, divmod")]
    UnknownOp(String),

    #[error("numerator bit length must be positive, got {0}")]
    InvalidBitLength(u64),

    #[error("repetition count must be positive")]
    ZeroRepetitions,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
