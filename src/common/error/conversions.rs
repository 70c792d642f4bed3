//! Constructors that attach path context to lower-level errors.
//!
//! `std::io::Error` and `ZipError` carry no file name, so these are used
//! instead of blanket `From` impls.

use super::types::Error;
use crate::compare::stream::ReadFailure;
use std::io;
use std::path::Path;
use zip::result::ZipError;

impl Error {
    /// Wrap an I/O error raised while touching `path`.
    ///
    /// `NotFound` kinds become [`Error::NotFound`].
    pub fn from_io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound { path },
            _ => Error::Io { path, source: err },
        }
    }

    /// Wrap a zip error raised while parsing or reading the archive at `path`.
    ///
    /// Plain I/O failures stay I/O failures; anything else means the
    /// container itself is malformed.
    pub fn from_zip(path: impl AsRef<Path>, err: ZipError) -> Self {
        match err {
            ZipError::Io(io) => Self::from_io(path, io),
            other => Error::ArchiveFormat {
                path: path.as_ref().to_path_buf(),
                source: other,
            },
        }
    }

    /// Wrap an I/O error raised while streaming two labeled readers.
    ///
    /// Failures tagged by a [`LabeledReader`](crate::compare::stream::LabeledReader)
    /// keep their own path; anything else is reported against `fallback`.
    pub fn from_labeled_io(fallback: impl AsRef<Path>, err: io::Error) -> Self {
        if !err.get_ref().is_some_and(|inner| inner.is::<ReadFailure>()) {
            return Self::from_io(fallback, err);
        }
        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<ReadFailure>()) {
            Some(Ok(failure)) => Self::from(*failure),
            Some(Err(other)) => Self::from_io(fallback, io::Error::new(kind, other)),
            None => Self::from_io(fallback, io::Error::from(kind)),
        }
    }

    /// Build an [`Error::ExternalTool`].
    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

impl From<ReadFailure> for Error {
    fn from(failure: ReadFailure) -> Self {
        let ReadFailure {
            path,
            archive_entry,
            source,
        } = failure;
        if archive_entry && source.kind() == io::ErrorKind::InvalidData {
            Error::ArchiveFormat {
                path,
                source: ZipError::Io(source),
            }
        } else {
            Self::from_io(path, source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_kind_maps_to_not_found() {
        let err = Error::from_io("missing.docx", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::NotFound { ref path } if path == Path::new("missing.docx")));
    }

    #[test]
    fn test_other_io_kind_keeps_source() {
        let err = Error::from_io("a.docx", io::Error::from(io::ErrorKind::PermissionDenied));
        match err {
            Error::Io { path, source } => {
                assert_eq!(path, Path::new("a.docx"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            },
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zip_io_is_not_a_format_error() {
        let err = Error::from_zip(
            "a.docx",
            ZipError::Io(io::Error::from(io::ErrorKind::UnexpectedEof)),
        );
        assert!(matches!(err, Error::Io { .. }));
    }

    fn labeled(path: &str, archive_entry: bool, kind: io::ErrorKind) -> io::Error {
        io::Error::new(
            kind,
            ReadFailure {
                path: path.into(),
                archive_entry,
                source: io::Error::new(kind, "Invalid checksum"),
            },
        )
    }

    #[test]
    fn test_labeled_failure_keeps_its_own_path() {
        let err = Error::from_labeled_io(
            "expected.docx",
            labeled("actual.docx", false, io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, Error::Io { ref path, .. } if path == Path::new("actual.docx")));
    }

    #[test]
    fn test_corrupt_entry_is_a_format_error() {
        let err = Error::from_labeled_io(
            "expected.docx",
            labeled("actual.docx", true, io::ErrorKind::InvalidData),
        );
        assert!(matches!(err, Error::ArchiveFormat { ref path, .. } if path == Path::new("actual.docx")));
    }

    #[test]
    fn test_invalid_data_in_plain_file_stays_io() {
        let err = Error::from_labeled_io(
            "expected.docx",
            labeled("actual.docx", false, io::ErrorKind::InvalidData),
        );
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_unlabeled_error_uses_fallback() {
        let err = Error::from_labeled_io("expected.docx", io::Error::other("boom"));
        assert!(matches!(err, Error::Io { ref path, .. } if path == Path::new("expected.docx")));
    }

    #[test]
    fn test_message_names_path() {
        let err = Error::NotFound {
            path: "expected.docx".into(),
        };
        assert_eq!(err.to_string(), "File not found: expected.docx");
        assert_eq!(err.path(), Some(Path::new("expected.docx")));
    }
}
