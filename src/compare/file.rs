//! Whole-file fast path.
//!
//! Lengths are compared before any content is opened, so files that already
//! differ in size (truncated writes, for instance) are rejected without a
//! byte scan.

use crate::common::{Error, Result};
use crate::compare::stream::{LabeledReader, streams_equal_with_chunk};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Something with a known byte length that can be opened as a stream.
///
/// Files are the production source; tests plug in instrumented sources to
/// observe whether content was ever opened.
pub trait ByteSource {
    /// Reader yielded by [`ByteSource::open`].
    type Reader: Read;

    /// Total length in bytes.
    fn byte_len(&self) -> Result<u64>;

    /// Open the content from the start.
    fn open(&self) -> Result<Self::Reader>;

    /// Path used in error messages.
    fn path(&self) -> &Path;
}

/// A file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ByteSource for FileSource {
    type Reader = BufReader<File>;

    fn byte_len(&self) -> Result<u64> {
        std::fs::metadata(&self.path)
            .map(|meta| meta.len())
            .map_err(|e| Error::from_io(&self.path, e))
    }

    fn open(&self) -> Result<Self::Reader> {
        File::open(&self.path)
            .map(BufReader::new)
            .map_err(|e| Error::from_io(&self.path, e))
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Compare two files byte for byte.
///
/// # Errors
///
/// [`Error::NotFound`] if either path is missing, [`Error::Io`] on any
/// other read failure.
#[inline]
pub fn files_equal<P: AsRef<Path>, Q: AsRef<Path>>(path_a: P, path_b: Q) -> Result<bool> {
    sources_equal(
        &FileSource::new(path_a),
        &FileSource::new(path_b),
        super::stream::DEFAULT_CHUNK_SIZE,
    )
}

/// Compare two byte sources, short-circuiting on a length mismatch.
pub fn sources_equal<A: ByteSource, B: ByteSource>(a: &A, b: &B, chunk_size: usize) -> Result<bool> {
    let len_a = a.byte_len()?;
    let len_b = b.byte_len()?;
    if len_a != len_b {
        log::debug!(
            "Length mismatch: {} ({} bytes) vs. {} ({} bytes)",
            a.path().display(),
            len_a,
            b.path().display(),
            len_b
        );
        return Ok(false);
    }

    let reader_a = LabeledReader::new(a.open()?, a.path());
    let reader_b = LabeledReader::new(b.open()?, b.path());
    streams_equal_with_chunk(reader_a, reader_b, chunk_size)
        .map_err(|e| Error::from_labeled_io(a.path(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::tempdir;

    /// In-memory source that counts how often its content is opened.
    struct CountingSource {
        data: Vec<u8>,
        opens: Cell<usize>,
    }

    impl CountingSource {
        fn new(data: &[u8]) -> Self {
            Self {
                data: data.to_vec(),
                opens: Cell::new(0),
            }
        }
    }

    impl ByteSource for CountingSource {
        type Reader = Cursor<Vec<u8>>;

        fn byte_len(&self) -> Result<u64> {
            Ok(self.data.len() as u64)
        }

        fn open(&self) -> Result<Self::Reader> {
            self.opens.set(self.opens.get() + 1);
            Ok(Cursor::new(self.data.clone()))
        }

        fn path(&self) -> &Path {
            Path::new("<memory>")
        }
    }

    /// Source whose reads fail after a fixed number of bytes.
    struct BrokenSource {
        path: PathBuf,
        len: u64,
    }

    struct BrokenReader {
        left: u64,
    }

    impl Read for BrokenReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.left == 0 {
                return Err(std::io::Error::other("device went away"));
            }
            let n = buf.len().min(self.left as usize);
            buf[..n].fill(b'x');
            self.left -= n as u64;
            Ok(n)
        }
    }

    impl ByteSource for BrokenSource {
        type Reader = BrokenReader;

        fn byte_len(&self) -> Result<u64> {
            Ok(self.len)
        }

        fn open(&self) -> Result<Self::Reader> {
            Ok(BrokenReader { left: self.len / 2 })
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).expect("create file");
        file.write_all(content).expect("write file");
        path
    }

    #[test]
    fn test_length_mismatch_never_opens_content() {
        let a = CountingSource::new(b"short");
        let b = CountingSource::new(b"a bit longer");
        assert!(!sources_equal(&a, &b, 4096).unwrap());
        assert_eq!(a.opens.get(), 0);
        assert_eq!(b.opens.get(), 0);
    }

    #[test]
    fn test_same_length_opens_each_once() {
        let a = CountingSource::new(b"abcdef");
        let b = CountingSource::new(b"abcxef");
        assert!(!sources_equal(&a, &b, 2).unwrap());
        assert_eq!(a.opens.get(), 1);
        assert_eq!(b.opens.get(), 1);
    }

    #[test]
    fn test_identical_files() {
        let dir = tempdir().expect("create temp dir");
        let content: Vec<u8> = (0..1024u32).map(|i| (i % 251) as u8).collect();
        let a = write_file(dir.path(), "a.bin", &content);
        let b = write_file(dir.path(), "b.bin", &content);
        assert!(files_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_same_size_different_content() {
        let dir = tempdir().expect("create temp dir");
        let a = write_file(dir.path(), "a.bin", b"0123456789");
        let b = write_file(dir.path(), "b.bin", b"0123456780");
        assert!(!files_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_read_failure_names_failing_source() {
        let good = CountingSource::new(&[b'x'; 64]);
        let broken = BrokenSource {
            path: PathBuf::from("second.bin"),
            len: 64,
        };
        match sources_equal(&good, &broken, 8) {
            Err(Error::Io { path, source }) => {
                assert_eq!(path, Path::new("second.bin"));
                assert_eq!(source.kind(), std::io::ErrorKind::Other);
            },
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().expect("create temp dir");
        let a = write_file(dir.path(), "a.bin", b"x");
        let missing = dir.path().join("missing.bin");
        match files_equal(&a, &missing) {
            Err(Error::NotFound { path }) => assert_eq!(path, missing),
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
