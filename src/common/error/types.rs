//! Comparison error taxonomy.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for comparison operations.
///
/// None of these are recovered inside the library; they all propagate to the
/// immediate caller.
#[derive(Error, Debug)]
pub enum Error {
    /// An input path does not exist
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Read failure on an existing path
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid zip container
    #[error("Invalid archive {}: {source}", .path.display())]
    ArchiveFormat {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Semantic review tool unavailable or failed
    #[error("External tool '{tool}' failed: {message}")]
    ExternalTool { tool: String, message: String },
}

impl Error {
    /// Path the failure relates to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::NotFound { path } | Error::Io { path, .. } | Error::ArchiveFormat { path, .. } => {
                Some(path)
            },
            Error::ExternalTool { .. } => None,
        }
    }
}

/// Result type for comparison operations.
pub type Result<T> = std::result::Result<T, Error>;
