//! Split module
//!
//! Keeps every data file under the size threshold.
//!
//! # Overview
//!
//! The split module provides:
//! - `SizeEstimator` - approximate serialized size of a record
//! - `RecordSplitter` - rewrites an oversized CSV into numbered parts
//! - `ThresholdEvaluator` - decides whether a batch is oversized

mod estimator;
mod rows;
mod splitter;
mod threshold;
mod types;

pub use estimator::{SizeEstimator, SIZE_VARIANCE};
pub use splitter::RecordSplitter;
pub use threshold::ThresholdEvaluator;
pub use types::{part_path, SplitOutcome, SplitPart};

#[cfg(test)]
mod tests;
