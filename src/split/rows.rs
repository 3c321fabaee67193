//! Source rows including blank lines
//!
//! The `csv` reader drops empty lines. A blank line in a usage report is
//! still a row of the source, so the reader is fed through
//! [`BlankLineTracker`], which removes blank lines outside quoted fields
//! and remembers how many preceded each record. [`SourceRows`] merges them
//! back in order.

use crate::error::Result;
use csv::{Reader, StringRecord};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Read};

/// One row of the source after the header
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SourceRow {
    /// An empty line
    Blank,
    /// A parsed record
    Record(StringRecord),
}

// ============================================================================
// Blank Line Tracker
// ============================================================================

/// Byte filter that strips and counts blank lines outside quoted fields
///
/// Blanks are keyed by the index of the record that follows them, where the
/// header is record 0. Blanks after the last record are keyed by the total
/// record count.
#[derive(Debug)]
pub(crate) struct BlankLineTracker<R> {
    inner: R,
    in_quotes: bool,
    line_start: bool,
    started: u64,
    blanks: BTreeMap<u64, u64>,
}

impl<R: BufRead> BlankLineTracker<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            in_quotes: false,
            line_start: true,
            started: 0,
            blanks: BTreeMap::new(),
        }
    }

    /// Remove and return the blank count recorded before record `index`
    pub(crate) fn take_blanks(&mut self, index: u64) -> u64 {
        self.blanks.remove(&index).unwrap_or(0)
    }
}

impl<R: BufRead> Read for BlankLineTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let input = self.inner.fill_buf()?;
            if input.is_empty() {
                return Ok(0);
            }

            let (mut consumed, mut written) = (0, 0);
            while consumed < input.len() && written < buf.len() {
                let byte = input[consumed];
                consumed += 1;

                if self.line_start && !self.in_quotes {
                    match byte {
                        b'\n' => {
                            *self.blanks.entry(self.started).or_default() += 1;
                            continue;
                        }
                        // CR of a CRLF blank line
                        b'\r' => continue,
                        _ => {
                            self.started += 1;
                            self.line_start = false;
                        }
                    }
                }

                match byte {
                    b'"' => self.in_quotes = !self.in_quotes,
                    b'\n' if !self.in_quotes => self.line_start = true,
                    _ => {}
                }
                buf[written] = byte;
                written += 1;
            }
            self.inner.consume(consumed);

            if written > 0 {
                return Ok(written);
            }
        }
    }
}

// ============================================================================
// Source Rows
// ============================================================================

/// Data rows of a CSV source in file order, blank lines included
pub(crate) struct SourceRows<R> {
    reader: Reader<BlankLineTracker<R>>,
    index: u64,
    blanks: u64,
    record: Option<StringRecord>,
    peeked: Option<SourceRow>,
    done: bool,
}

impl<R: BufRead> SourceRows<R> {
    /// Wrap a reader whose header has already been read
    pub(crate) fn new(reader: Reader<BlankLineTracker<R>>) -> Self {
        Self {
            reader,
            index: 1,
            blanks: 0,
            record: None,
            peeked: None,
            done: false,
        }
    }

    /// Next row, or `None` once the source is drained
    pub(crate) fn next_row(&mut self) -> Result<Option<SourceRow>> {
        if let Some(row) = self.peeked.take() {
            return Ok(Some(row));
        }
        self.read_row()
    }

    /// Whether another row remains
    pub(crate) fn has_more(&mut self) -> Result<bool> {
        if self.peeked.is_none() {
            self.peeked = self.read_row()?;
        }
        Ok(self.peeked.is_some())
    }

    fn read_row(&mut self) -> Result<Option<SourceRow>> {
        loop {
            if self.blanks > 0 {
                self.blanks -= 1;
                return Ok(Some(SourceRow::Blank));
            }
            if let Some(record) = self.record.take() {
                return Ok(Some(SourceRow::Record(record)));
            }
            if self.done {
                return Ok(None);
            }

            let mut record = StringRecord::new();
            if self.reader.read_record(&mut record)? {
                self.record = Some(record);
            } else {
                self.done = true;
            }
            self.blanks = self.reader.get_mut().take_blanks(self.index);
            self.index += 1;
        }
    }
}
