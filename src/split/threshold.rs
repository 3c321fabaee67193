//! Batch threshold evaluation
//!
//! Pre-flight check deciding whether a batch is treated as oversized.

use crate::batch::list_files;
use crate::error::Result;
use std::path::Path;

/// Decides whether a batch needs the split-and-archive-per-file path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdEvaluator {
    max_bytes: u64,
}

impl ThresholdEvaluator {
    /// Create an evaluator for `max_bytes`
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// True if any file, or the running total of files, reaches the threshold
    ///
    /// A missing directory is not oversized; the manifest step creates it.
    pub fn is_oversized(&self, dir: &Path) -> Result<bool> {
        if !dir.exists() {
            tracing::debug!(dir = %dir.display(), "Batch directory missing, nothing to split");
            return Ok(false);
        }

        let mut total: u64 = 0;
        for entry in list_files(dir)? {
            total = total.saturating_add(entry.size);
            if entry.size >= self.max_bytes || total >= self.max_bytes {
                tracing::debug!(
                    file = %entry.name,
                    size = entry.size,
                    total,
                    max_bytes = self.max_bytes,
                    "Batch exceeds size threshold"
                );
                return Ok(true);
            }
        }

        Ok(false)
    }
}
