//! Record-preserving CSV splitter
//!
//! Rewrites an oversized CSV file into numbered parts, each starting with
//! the source header. Parts are bounded by the running [`SizeEstimator`]
//! total: the row that reaches the threshold is kept in the current part
//! and the next row opens a new one. Blank source lines are carried into
//! the current part as empty rows that add nothing to the estimate.
//!
//! Splitting is two-phase. All parts are written and flushed first; only
//! then is the source removed. A failure part-way leaves the source and any
//! parts already written on disk, and the caller must clean the directory
//! before retrying.

use super::estimator::SizeEstimator;
use super::rows::{BlankLineTracker, SourceRow, SourceRows};
use super::types::{part_path, SplitOutcome, SplitPart};
use crate::error::{Error, Result};
use crate::output::{create_file, CreateMode};
use crate::types::DEFAULT_MAX_PARTS;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Splits CSV files into size-bounded parts
#[derive(Debug, Clone)]
pub struct RecordSplitter {
    max_bytes: u64,
    max_parts: usize,
    mode: CreateMode,
    estimator: SizeEstimator,
}

impl RecordSplitter {
    /// Create a splitter bounding parts at `max_bytes`
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            max_parts: DEFAULT_MAX_PARTS,
            mode: CreateMode::default(),
            estimator: SizeEstimator::default(),
        }
    }

    /// Set the maximum number of parts per source
    #[must_use]
    pub fn with_max_parts(mut self, max_parts: usize) -> Self {
        self.max_parts = max_parts.max(1);
        self
    }

    /// Set the part file creation mode
    #[must_use]
    pub fn with_mode(mut self, mode: CreateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use a custom size estimator
    #[must_use]
    pub fn with_estimator(mut self, estimator: SizeEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Size threshold in bytes
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Whether a file of `size` bytes must be split
    pub fn needs_split(&self, size: u64) -> bool {
        size >= self.max_bytes
    }

    /// Split `source` into parts next to it, then remove `source`
    pub fn split(&self, source: &Path) -> Result<SplitOutcome> {
        let (parts, capped) = self.write_parts(source)?;

        fs::remove_file(source).map_err(|e| Error::file_io(source, e))?;

        tracing::info!(
            source = %source.display(),
            parts = parts.len(),
            "Split files: {:?}",
            parts.iter().map(|p| p.path.display().to_string()).collect::<Vec<_>>()
        );

        Ok(SplitOutcome {
            source: source.to_path_buf(),
            parts,
            capped,
        })
    }

    /// Write every part; the reader is closed when this returns
    fn write_parts(&self, source: &Path) -> Result<(Vec<SplitPart>, bool)> {
        let file = File::open(source).map_err(|e| Error::file_io(source, e))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BlankLineTracker::new(BufReader::new(file)));

        let header = reader.headers()?.clone();
        if header.is_empty() {
            return Err(Error::split(source, "file has no header row"));
        }
        tracing::debug!(header = ?header, "Header");

        let mut rows = SourceRows::new(reader);
        let mut parts = Vec::new();
        let mut number = 1;

        loop {
            let part = self.write_part(&part_path(source, number), number, &header, &mut rows)?;
            parts.push(part);

            if !rows.has_more()? {
                return Ok((parts, false));
            }

            if number >= self.max_parts {
                tracing::warn!(
                    source = %source.display(),
                    max_parts = self.max_parts,
                    "Part limit reached, remaining rows are not written"
                );
                return Ok((parts, true));
            }

            number += 1;
        }
    }

    fn write_part<R: BufRead>(
        &self,
        path: &Path,
        number: usize,
        header: &StringRecord,
        source_rows: &mut SourceRows<R>,
    ) -> Result<SplitPart> {
        let file = create_file(path, self.mode)?;
        tracing::info!(path = %path.display(), part = number, "Writing new file");

        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(BufWriter::new(file));
        writer.write_record(header)?;

        let threshold = self.max_bytes as f64;
        let mut estimate = 0.0;
        let mut rows = 0u64;

        while let Some(row) = source_rows.next_row()? {
            match row {
                // Written raw: an empty csv record would come out as `""`
                SourceRow::Blank => {
                    writer.flush().map_err(|e| Error::file_io(path, e))?;
                    writer
                        .get_ref()
                        .get_ref()
                        .write_all(b"\n")
                        .map_err(|e| Error::file_io(path, e))?;
                }
                SourceRow::Record(record) => {
                    writer.write_record(&record)?;
                    estimate += self.estimator.estimate(record.iter());
                }
            }
            rows += 1;

            tracing::trace!(estimate, "file size (est)");
            if estimate >= threshold {
                break;
            }
        }

        writer.flush().map_err(|e| Error::file_io(path, e))?;
        tracing::debug!(path = %path.display(), rows, estimate, "Completed part");

        Ok(SplitPart {
            number,
            path: path.to_path_buf(),
            rows,
            estimated_bytes: estimate,
        })
    }
}
