//! Measure the cost of big integer division as operand bit lengths vary.
//!
//! [`generate`] samples operand pairs over a matrix of bit lengths and
//! writes them as text lines. [`timer`] reads those lines back, times
//! repeated floor divisions, and reports the average cost of one.

pub mod error;
pub mod generate;
pub mod logging;
pub mod op;
pub mod record;
pub mod timer;

pub use error::{Error, RecordError};
pub use generate::Generator;
pub use op::DivOp;
pub use record::{OperandRecord, TimingRecord};
pub use timer::Timer;
