//! Configuration options for document comparison.

use crate::compare::stream::DEFAULT_CHUNK_SIZE;

/// Options controlling a [`Comparer`](crate::compare::Comparer).
///
/// # Examples
///
/// ```rust
/// use docx_compare::compare::CompareOptions;
///
/// let options = CompareOptions::new()
///     .with_semantic_review(true)
///     .with_chunk_size(64 * 1024);
/// assert!(options.semantic_review);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    /// Ask the semantic reviewer to judge byte-level differences
    pub semantic_review: bool,
    /// Bytes read per step when streaming content
    pub chunk_size: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            semantic_review: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl CompareOptions {
    /// Create a new `CompareOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether differing packages are handed to the semantic reviewer.
    ///
    /// When disabled, any entry discrepancy makes the verdict
    /// [`Different`](crate::compare::CompareVerdict::Different).
    #[inline]
    pub fn with_semantic_review(mut self, enabled: bool) -> Self {
        self.semantic_review = enabled;
        self
    }

    /// Set the chunk size for streamed comparison.
    ///
    /// Zero is raised to one.
    #[inline]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}
