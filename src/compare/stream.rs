//! Chunked equality check for byte streams.
//!
//! Both streams are read in lock-step, one chunk at a time, so neither side is
//! ever held fully in memory. The check only looks at the logical byte
//! sequence each reader yields: a plain file and a decompressing zip entry
//! compare equal when they produce the same bytes, regardless of how their
//! reads are buffered.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Default chunk size for lock-step reads.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Compare two streams for exact byte equality using [`DEFAULT_CHUNK_SIZE`].
///
/// Both streams are advanced until the first mismatch or until both are
/// exhausted. Neither is closed; that stays with the caller.
///
/// # Examples
///
/// ```rust
/// use docx_compare::compare::streams_equal;
///
/// let same = streams_equal(&b"hello"[..], &b"hello"[..])?;
/// assert!(same);
/// # Ok::<(), std::io::Error>(())
/// ```
#[inline]
pub fn streams_equal<A: Read, B: Read>(a: A, b: B) -> io::Result<bool> {
    streams_equal_with_chunk(a, b, DEFAULT_CHUNK_SIZE)
}

/// Compare two streams using an explicit chunk size.
///
/// A chunk size of zero is treated as one.
pub fn streams_equal_with_chunk<A: Read, B: Read>(
    mut a: A,
    mut b: B,
    chunk_size: usize,
) -> io::Result<bool> {
    let chunk_size = chunk_size.max(1);
    let mut buf_a = vec![0u8; chunk_size];
    let mut buf_b = vec![0u8; chunk_size];

    loop {
        let count_a = read_chunk(&mut a, &mut buf_a)?;
        let count_b = read_chunk(&mut b, &mut buf_b)?;

        if count_a != count_b {
            return Ok(false);
        }

        if count_a == 0 {
            return Ok(true);
        }

        if buf_a[..count_a] != buf_b[..count_b] {
            return Ok(false);
        }
    }
}

/// Exact equality of two byte slices, lengths included.
#[inline]
pub fn bytes_equal(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a == b
}

/// Read adapter that tags failures with the path of the stream they came from.
///
/// [`streams_equal`] only returns an `io::Error`, which does not say which of
/// the two inputs failed. Wrapping each side lets the caller recover the
/// right path with [`Error::from_labeled_io`](crate::Error::from_labeled_io).
#[derive(Debug)]
pub struct LabeledReader<R> {
    inner: R,
    path: PathBuf,
    archive_entry: bool,
}

impl<R: Read> LabeledReader<R> {
    /// Wrap a plain file stream.
    pub fn new<P: AsRef<Path>>(inner: R, path: P) -> Self {
        Self {
            inner,
            path: path.as_ref().to_path_buf(),
            archive_entry: false,
        }
    }

    /// Wrap a decompressing zip entry stream of the archive at `path`.
    ///
    /// `InvalidData` failures (bad checksum, corrupt deflate data) then
    /// report a malformed container instead of a read failure.
    pub fn archive_entry<P: AsRef<Path>>(inner: R, path: P) -> Self {
        Self {
            archive_entry: true,
            ..Self::new(inner, path)
        }
    }
}

impl<R: Read> Read for LabeledReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::Interrupted {
                return e;
            }
            let kind = e.kind();
            io::Error::new(
                kind,
                ReadFailure {
                    path: self.path.clone(),
                    archive_entry: self.archive_entry,
                    source: e,
                },
            )
        })
    }
}

/// Payload carried inside the `io::Error` raised by a [`LabeledReader`].
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", .path.display())]
pub struct ReadFailure {
    pub(crate) path: PathBuf,
    pub(crate) archive_entry: bool,
    #[source]
    pub(crate) source: io::Error,
}

/// Fill `buf` as far as the reader allows.
///
/// Short reads are retried so that the returned count is only smaller than
/// `buf.len()` at end of stream.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    /// Reader that hands out at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        interrupt_next: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.interrupt_next = true;
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_empty_streams_are_equal() {
        assert!(streams_equal(io::empty(), io::empty()).unwrap());
    }

    #[test]
    fn test_length_difference_detected() {
        assert!(!streams_equal(&b"abc"[..], &b"abcd"[..]).unwrap());
        assert!(!streams_equal(&b"abcd"[..], &b"abc"[..]).unwrap());
    }

    #[test]
    fn test_last_byte_difference_detected() {
        let a = vec![7u8; 10_000];
        let mut b = a.clone();
        b[9_999] = 8;
        assert!(!streams_equal(Cursor::new(&a), Cursor::new(&b)).unwrap());
    }

    #[test]
    fn test_short_reads_do_not_cause_false_mismatch() {
        let data: Vec<u8> = (0..=255u8).cycle().take(9_000).collect();
        let trickle = Trickle {
            data: &data,
            step: 7,
            interrupt_next: false,
        };
        assert!(streams_equal(trickle, Cursor::new(&data)).unwrap());
    }

    #[test]
    fn test_stops_at_first_mismatch() {
        let a = vec![0u8; 3 * DEFAULT_CHUNK_SIZE];
        let mut b = a.clone();
        b[0] = 1;
        let mut cursor_a = Cursor::new(&a);
        let mut cursor_b = Cursor::new(&b);
        assert!(!streams_equal(&mut cursor_a, &mut cursor_b).unwrap());
        assert_eq!(cursor_a.position(), DEFAULT_CHUNK_SIZE as u64);
        assert_eq!(cursor_b.position(), DEFAULT_CHUNK_SIZE as u64);
    }

    #[test]
    fn test_read_error_propagates() {
        let err = streams_equal(Failing, &b"x"[..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_zero_chunk_size_is_usable() {
        assert!(streams_equal_with_chunk(&b"abc"[..], &b"abc"[..], 0).unwrap());
    }

    #[test]
    fn test_labeled_reader_keeps_kind_and_path() {
        let err = streams_equal(&b"x"[..], LabeledReader::new(Failing, "right.bin")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        let failure = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<ReadFailure>())
            .expect("labeled failure");
        assert_eq!(failure.path, Path::new("right.bin"));
        assert!(!failure.archive_entry);
    }

    #[test]
    fn test_labeled_reader_passes_interrupted_through() {
        let data = b"interrupted reads are retried".to_vec();
        let trickle = Trickle {
            data: &data,
            step: 3,
            interrupt_next: true,
        };
        assert!(streams_equal(LabeledReader::archive_entry(trickle, "a.docx"), &data[..]).unwrap());
    }

    #[test]
    fn test_bytes_equal() {
        assert!(bytes_equal(b"", b""));
        assert!(bytes_equal(b"docx", b"docx"));
        assert!(!bytes_equal(b"docx", b"docx "));
        assert!(!bytes_equal(b"docx", b"DOCX"));
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in proptest::collection::vec(any::<u8>(), 0..2048),
                          b in proptest::collection::vec(any::<u8>(), 0..2048),
                          chunk in 1usize..300) {
            let ab = streams_equal_with_chunk(&a[..], &b[..], chunk).unwrap();
            let ba = streams_equal_with_chunk(&b[..], &a[..], chunk).unwrap();
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn prop_reflexive(a in proptest::collection::vec(any::<u8>(), 0..4096),
                          chunk in 1usize..600) {
            prop_assert!(streams_equal_with_chunk(&a[..], &a[..], chunk).unwrap());
        }

        #[test]
        fn prop_equal_iff_same_bytes(a in proptest::collection::vec(0u8..4, 0..64),
                                     b in proptest::collection::vec(0u8..4, 0..64),
                                     chunk in 1usize..20) {
            let equal = streams_equal_with_chunk(&a[..], &b[..], chunk).unwrap();
            prop_assert_eq!(equal, a == b);
        }
    }
}
