//! Comparison decision engine.
//!
//! Escalates in three steps, stopping as soon as a verdict is certain:
//!
//! 1. whole-file byte equality
//! 2. zip entry comparison, stopping at the first discrepancy
//! 3. semantic review, only when requested and entries differ
//!
//! The engine only reads its inputs. Replacing the expected file with the
//! actual one after an [`CompareVerdict::EquivalentContent`] verdict is left
//! to the caller.

use crate::common::{Error, Result};
use crate::compare::archive::ArchiveDiff;
use crate::compare::config::CompareOptions;
use crate::compare::file::{FileSource, sources_equal};
use crate::compare::package::ArchivePackage;
use crate::review::SemanticReviewer;
use std::fmt;
use std::path::{Path, PathBuf};

/// Tri-state comparison outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareVerdict {
    /// No content difference at all
    IdenticalBytes,
    /// Bytes differ but the semantic reviewer found no revisions
    EquivalentContent,
    /// Bytes differ and nothing overrides that
    Different,
}

impl CompareVerdict {
    /// Whether callers should treat the documents as matching.
    #[inline]
    pub fn is_match(self) -> bool {
        !matches!(self, CompareVerdict::Different)
    }
}

impl fmt::Display for CompareVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompareVerdict::IdenticalBytes => "identical",
            CompareVerdict::EquivalentContent => "equivalent",
            CompareVerdict::Different => "different",
        })
    }
}

/// Result of [`Comparer::compare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOutcome {
    pub verdict: CompareVerdict,
    /// Rendered difference document from the semantic reviewer
    pub diff_artifact: Option<PathBuf>,
    /// The files differ byte-wise although every entry matches, e.g. because
    /// of entry order or timestamps in the zip directory
    pub container_bytes_differ: bool,
}

impl CompareOutcome {
    fn new(verdict: CompareVerdict) -> Self {
        Self {
            verdict,
            diff_artifact: None,
            container_bytes_differ: false,
        }
    }
}

/// Compares an expected document package against an actual one.
///
/// # Examples
///
/// ```rust,no_run
/// use docx_compare::compare::{CompareOptions, CompareVerdict, Comparer};
///
/// let comparer = Comparer::new(CompareOptions::default());
/// let outcome = comparer.compare("expected.docx", "actual.docx")?;
/// if outcome.verdict == CompareVerdict::Different {
///     println!("Document content does not match");
/// }
/// # Ok::<(), docx_compare::Error>(())
/// ```
pub struct Comparer<'r> {
    options: CompareOptions,
    reviewer: Option<&'r dyn SemanticReviewer>,
}

impl<'r> Comparer<'r> {
    pub fn new(options: CompareOptions) -> Self {
        Self {
            options,
            reviewer: None,
        }
    }

    /// Attach the reviewer consulted when semantic review is enabled.
    pub fn with_reviewer(mut self, reviewer: &'r dyn SemanticReviewer) -> Self {
        self.reviewer = Some(reviewer);
        self
    }

    #[inline]
    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compare using the configured [`CompareOptions::semantic_review`] flag.
    pub fn compare<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        expected: P,
        actual: Q,
    ) -> Result<CompareOutcome> {
        self.compare_with_review(expected, actual, self.options.semantic_review)
    }

    /// Compare, choosing per call whether semantic review is requested.
    ///
    /// # Errors
    ///
    /// I/O and archive format failures propagate unchanged. A reviewer
    /// failure propagates as [`Error::ExternalTool`], as does requesting a
    /// review without a reviewer attached (only when a review is needed).
    pub fn compare_with_review<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        expected: P,
        actual: Q,
        request_semantic_review: bool,
    ) -> Result<CompareOutcome> {
        let expected = expected.as_ref();
        let actual = actual.as_ref();

        if sources_equal(
            &FileSource::new(expected),
            &FileSource::new(actual),
            self.options.chunk_size,
        )? {
            log::debug!("{} and {} are byte identical", expected.display(), actual.display());
            return Ok(CompareOutcome::new(CompareVerdict::IdenticalBytes));
        }

        let mut entries = ArchiveDiff::new(ArchivePackage::open(expected)?, ArchivePackage::open(actual)?)
            .with_chunk_size(self.options.chunk_size);
        let first = entries.next().transpose()?;

        let Some(first) = first else {
            log::info!(
                "{} and {} differ at container level but all entries match",
                expected.display(),
                actual.display()
            );
            return Ok(CompareOutcome {
                container_bytes_differ: true,
                ..CompareOutcome::new(CompareVerdict::IdenticalBytes)
            });
        };
        log::debug!("First entry discrepancy: {}", first);
        // Release both archives before handing the files to a reviewer.
        drop(entries);

        if !request_semantic_review {
            return Ok(CompareOutcome::new(CompareVerdict::Different));
        }

        let reviewer = self
            .reviewer
            .ok_or_else(|| Error::external_tool("semantic reviewer", "no reviewer configured"))?;
        let review = reviewer.review_semantically(expected, actual)?;

        if review.is_equivalent() {
            log::info!("Reviewer found no revisions between {} and {}", expected.display(), actual.display());
            Ok(CompareOutcome::new(CompareVerdict::EquivalentContent))
        } else {
            Ok(CompareOutcome {
                diff_artifact: review.diff_artifact,
                ..CompareOutcome::new(CompareVerdict::Different)
            })
        }
    }
}

impl fmt::Debug for Comparer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparer")
            .field("options", &self.options)
            .field("has_reviewer", &self.reviewer.is_some())
            .finish()
    }
}

/// Compare two packages with default options and no semantic review.
#[inline]
pub fn compare<P: AsRef<Path>, Q: AsRef<Path>>(expected: P, actual: Q) -> Result<CompareOutcome> {
    Comparer::new(CompareOptions::default()).compare(expected, actual)
}
