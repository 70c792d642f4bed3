//! Semantic review of packages that differ at the byte level.
//!
//! Byte and entry comparison cannot tell a meaningful edit from a harmless
//! re-serialization. A [`SemanticReviewer`] is asked to make that call: it
//! reports how many revisions it found and, when there are any, where it
//! wrote a rendered difference document.
//!
//! The comparison engine only ever talks to the trait. [`ExternalCommandReviewer`]
//! drives an external program; tests supply their own implementations.

pub mod command;

pub use command::ExternalCommandReviewer;

use crate::common::Result;
use std::path::{Path, PathBuf};

/// Outcome of a semantic review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticReview {
    /// Number of revisions the reviewer found; zero means equivalent content
    pub revision_count: usize,
    /// Rendered difference document, only when `revision_count > 0`
    pub diff_artifact: Option<PathBuf>,
}

impl SemanticReview {
    /// A review that found nothing.
    pub fn equivalent() -> Self {
        Self {
            revision_count: 0,
            diff_artifact: None,
        }
    }

    /// A review that found `revision_count` revisions, rendered at `artifact`.
    pub fn with_revisions(revision_count: usize, artifact: impl Into<PathBuf>) -> Self {
        Self {
            revision_count,
            diff_artifact: Some(artifact.into()),
        }
    }

    #[inline]
    pub fn is_equivalent(&self) -> bool {
        self.revision_count == 0
    }
}

/// Capability to judge whether two packages differ in a meaningful way.
///
/// Implementations own whatever external application they drive and must
/// release it on every exit path, errors included.
pub trait SemanticReviewer {
    /// Review `expected` against `actual`.
    ///
    /// # Errors
    ///
    /// [`Error::ExternalTool`](crate::Error::ExternalTool) when the reviewer
    /// is unavailable or fails.
    fn review_semantically(&self, expected: &Path, actual: &Path) -> Result<SemanticReview>;
}

impl<T: SemanticReviewer + ?Sized> SemanticReviewer for &T {
    fn review_semantically(&self, expected: &Path, actual: &Path) -> Result<SemanticReview> {
        (**self).review_semantically(expected, actual)
    }
}

impl<T: SemanticReviewer + ?Sized> SemanticReviewer for Box<T> {
    fn review_semantically(&self, expected: &Path, actual: &Path) -> Result<SemanticReview> {
        (**self).review_semantically(expected, actual)
    }
}

/// Where the rendered difference for `actual` is written.
///
/// `reports/out.docx` becomes `reports/out.diff.docx`.
pub fn diff_artifact_path(actual: &Path) -> PathBuf {
    actual.with_extension("diff.docx")
}
