//! Docx Compare - content comparison for Office document packages
//!
//! Decides whether two document packages (.docx, .xlsx, .pptx and other
//! zip-based containers) hold the same content and, if not, where they
//! differ.
//!
//! # Features
//!
//! - **Byte fast path**: whole-file comparison with a length short-circuit
//! - **Entry diff**: lazy, ordered enumeration of missing, extra, resized and
//!   changed zip entries
//! - **Semantic review**: optional hand-off to a pluggable reviewer that can
//!   declare byte differences immaterial and render a difference document
//! - **Bounded memory**: every comparison streams in fixed-size chunks
//!
//! # Example - Comparing two documents
//!
//! ```no_run
//! use docx_compare::compare::{compare, CompareVerdict};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let outcome = compare("expected.docx", "actual.docx")?;
//! match outcome.verdict {
//!     CompareVerdict::IdenticalBytes => println!("Document content is identical"),
//!     CompareVerdict::EquivalentContent => println!("Equivalent content"),
//!     CompareVerdict::Different => println!("Document content does not match"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Listing every entry difference
//!
//! ```no_run
//! use docx_compare::compare::diff_archives;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! for discrepancy in diff_archives("expected.docx", "actual.docx")? {
//!     println!("{}", discrepancy?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Semantic review through an external program
//!
//! ```no_run
//! use docx_compare::compare::{CompareOptions, Comparer};
//! use docx_compare::review::ExternalCommandReviewer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reviewer = ExternalCommandReviewer::new("word-compare");
//! let outcome = Comparer::new(CompareOptions::new().with_semantic_review(true))
//!     .with_reviewer(&reviewer)
//!     .compare("expected.docx", "actual.docx")?;
//! if let Some(diff) = outcome.diff_artifact {
//!     println!("Differences between documents are stored as: {}", diff.display());
//! }
//! # Ok(())
//! # }
//! ```

/// Error types shared by all modules
pub mod common;

/// Stream, file and package comparison
///
/// Holds the comparison engine and its building blocks, from chunked stream
/// equality up to the verdict.
pub mod compare;

/// Semantic review seam
pub mod review;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use compare::{CompareOptions, CompareOutcome, CompareVerdict, Comparer, EntryDiscrepancy};
pub use review::{SemanticReview, SemanticReviewer};
