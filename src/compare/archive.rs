//! Entry-by-entry comparison of two zip containers.
//!
//! [`diff_archives`] opens both packages and returns an [`ArchiveDiff`], a
//! lazy iterator of [`EntryDiscrepancy`] values. Discrepancies come out in
//! three passes:
//!
//! 1. entries of `expected` that `actual` lacks, in expected's order
//! 2. entries of `actual` that `expected` lacks, in actual's order
//! 3. entries present in both whose length or bytes differ, in expected's order
//!
//! Nothing is collected up front, so a caller that only needs to know
//! whether any difference exists can stop after the first item.

use crate::common::{Error, Result};
use crate::compare::package::ArchivePackage;
use crate::compare::stream::{DEFAULT_CHUNK_SIZE, LabeledReader, streams_equal_with_chunk};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::iter::FusedIterator;
use std::path::Path;

/// Why an entry differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscrepancyKind {
    /// Present in expected, absent from actual
    MissingInActual,
    /// Present in actual, absent from expected
    MissingInExpected,
    /// Uncompressed lengths differ; content was not scanned
    LengthMismatch { expected: u64, actual: u64 },
    /// Same length, different bytes
    ContentMismatch,
}

/// A single difference between two packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDiscrepancy {
    /// Full entry path inside the archive
    pub entry_path: String,
    pub kind: DiscrepancyKind,
}

impl EntryDiscrepancy {
    pub fn new(entry_path: impl Into<String>, kind: DiscrepancyKind) -> Self {
        Self {
            entry_path: entry_path.into(),
            kind,
        }
    }
}

impl fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscrepancyKind::MissingInActual => f.write_str("File present in expected, not in actual"),
            DiscrepancyKind::MissingInExpected => f.write_str("File present in actual, not in expected"),
            DiscrepancyKind::LengthMismatch { expected, actual } => {
                write!(f, "Different Length: {} vs. {}", expected, actual)
            },
            DiscrepancyKind::ContentMismatch => f.write_str("Content differs"),
        }
    }
}

impl fmt::Display for EntryDiscrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entry_path, self.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    MissingInActual,
    MissingInExpected,
    Content,
    Done,
}

/// Lazy, single-pass sequence of discrepancies between two packages.
///
/// Each item is a `Result`: reading an entry can fail half-way through the
/// sequence. After an error the iterator is exhausted.
pub struct ArchiveDiff<R> {
    expected: ArchivePackage<R>,
    actual: ArchivePackage<R>,
    phase: Phase,
    /// Position inside the entry list of the current phase
    cursor: usize,
    chunk_size: usize,
    content_scans: usize,
}

/// Open two packages from disk and diff them.
///
/// # Errors
///
/// Fails before yielding anything if either file is missing, unreadable, or
/// not a zip container.
///
/// # Examples
///
/// ```rust,no_run
/// use docx_compare::compare::diff_archives;
///
/// for discrepancy in diff_archives("expected.docx", "actual.docx")? {
///     println!("{}", discrepancy?);
/// }
/// # Ok::<(), docx_compare::Error>(())
/// ```
pub fn diff_archives<P: AsRef<Path>, Q: AsRef<Path>>(
    expected_path: P,
    actual_path: Q,
) -> Result<ArchiveDiff<BufReader<File>>> {
    let expected = ArchivePackage::open(expected_path)?;
    let actual = ArchivePackage::open(actual_path)?;
    Ok(ArchiveDiff::new(expected, actual))
}

impl<R: Read + Seek> ArchiveDiff<R> {
    /// Diff two already opened packages.
    pub fn new(expected: ArchivePackage<R>, actual: ArchivePackage<R>) -> Self {
        Self {
            expected,
            actual,
            phase: Phase::MissingInActual,
            cursor: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            content_scans: 0,
        }
    }

    /// Use a different chunk size for entry content comparison.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Number of entries whose content has been streamed so far.
    ///
    /// Entries rejected on length alone are not counted.
    #[inline]
    pub fn content_scans(&self) -> usize {
        self.content_scans
    }

    /// Whether at least one discrepancy exists.
    ///
    /// Stops at the first one found.
    pub fn has_discrepancies(&mut self) -> Result<bool> {
        self.next().transpose().map(|first| first.is_some())
    }

    fn next_missing_in_actual(&mut self) -> Option<EntryDiscrepancy> {
        let names = self.expected.entry_names();
        while self.cursor < names.len() {
            let name = &names[self.cursor];
            self.cursor += 1;
            if !self.actual.contains(name) {
                return Some(EntryDiscrepancy::new(name.clone(), DiscrepancyKind::MissingInActual));
            }
        }
        None
    }

    fn next_missing_in_expected(&mut self) -> Option<EntryDiscrepancy> {
        let names = self.actual.entry_names();
        while self.cursor < names.len() {
            let name = &names[self.cursor];
            self.cursor += 1;
            if !self.expected.contains(name) {
                return Some(EntryDiscrepancy::new(name.clone(), DiscrepancyKind::MissingInExpected));
            }
        }
        None
    }

    fn next_content_mismatch(&mut self) -> Result<Option<EntryDiscrepancy>> {
        while self.cursor < self.expected.len() {
            let name = self.expected.entry_names()[self.cursor].clone();
            self.cursor += 1;
            if let Some(kind) = self.compare_entry(&name)? {
                return Ok(Some(EntryDiscrepancy::new(name, kind)));
            }
        }
        Ok(None)
    }

    fn compare_entry(&mut self, name: &str) -> Result<Option<DiscrepancyKind>> {
        let Some(actual_len) = self.actual.entry_len(name)? else {
            return Ok(None);
        };
        let Some(expected_len) = self.expected.entry_len(name)? else {
            return Ok(None);
        };

        if expected_len != actual_len {
            return Ok(Some(DiscrepancyKind::LengthMismatch {
                expected: expected_len,
                actual: actual_len,
            }));
        }

        self.content_scans += 1;
        let expected_path = self.expected.path().to_path_buf();
        let actual_path = self.actual.path().to_path_buf();
        let expected_entry = LabeledReader::archive_entry(self.expected.open_entry(name)?, &expected_path);
        let actual_entry = LabeledReader::archive_entry(self.actual.open_entry(name)?, &actual_path);
        let equal = streams_equal_with_chunk(expected_entry, actual_entry, self.chunk_size)
            .map_err(|e| Error::from_labeled_io(&expected_path, e))?;

        Ok((!equal).then_some(DiscrepancyKind::ContentMismatch))
    }

    fn advance(&mut self, phase: Phase) {
        self.phase = phase;
        self.cursor = 0;
    }
}

impl<R: Read + Seek> Iterator for ArchiveDiff<R> {
    type Item = Result<EntryDiscrepancy>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                Phase::MissingInActual => match self.next_missing_in_actual() {
                    Some(found) => return Some(Ok(found)),
                    None => self.advance(Phase::MissingInExpected),
                },
                Phase::MissingInExpected => match self.next_missing_in_expected() {
                    Some(found) => return Some(Ok(found)),
                    None => self.advance(Phase::Content),
                },
                Phase::Content => match self.next_content_mismatch() {
                    Ok(Some(found)) => {
                        log::debug!("{}", found);
                        return Some(Ok(found));
                    },
                    Ok(None) => self.advance(Phase::Done),
                    Err(e) => {
                        self.advance(Phase::Done);
                        return Some(Err(e));
                    },
                },
                Phase::Done => return None,
            }
        }
    }
}

impl<R: Read + Seek> FusedIterator for ArchiveDiff<R> {}

impl<R> fmt::Debug for ArchiveDiff<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveDiff")
            .field("expected", &self.expected.path())
            .field("actual", &self.actual.path())
            .field("phase", &self.phase)
            .field("content_scans", &self.content_scans)
            .finish()
    }
}
