//! Content comparison for document packages.
//!
//! The pieces build on each other:
//!
//! - [`stream`]: lock-step chunked equality of two readers
//! - [`file`]: whole-file comparison with a length short-circuit
//! - [`package`]: read-only view over a zip container
//! - [`archive`]: lazy entry-by-entry diff of two containers
//! - [`engine`]: the decision protocol producing a [`CompareVerdict`]

pub mod archive;
pub mod config;
pub mod engine;
pub mod file;
pub mod package;
pub mod stream;

pub use archive::{ArchiveDiff, DiscrepancyKind, EntryDiscrepancy, diff_archives};
pub use config::CompareOptions;
pub use engine::{CompareOutcome, CompareVerdict, Comparer, compare};
pub use file::{ByteSource, FileSource, files_equal, sources_equal};
pub use package::ArchivePackage;
pub use stream::{DEFAULT_CHUNK_SIZE, bytes_equal, streams_equal, streams_equal_with_chunk};
