//! Read-only view over a zip-based document package.
//!
//! Only entry names, uncompressed lengths and entry content are consumed.
//! Timestamps, permissions and compression methods are never inspected.

use crate::common::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

/// A zip container opened for comparison.
///
/// Entry paths are kept in the archive's own order and matched by exact,
/// case-sensitive string equality. The package is never mutated.
pub struct ArchivePackage<R> {
    /// Where the archive came from, for error context
    path: PathBuf,
    archive: zip::ZipArchive<R>,
    /// Entry paths in central directory order
    entries: Vec<String>,
    /// Same paths, for membership tests
    index: HashSet<String>,
}

impl ArchivePackage<BufReader<File>> {
    /// Open the package stored at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] or [`Error::Io`] if the file cannot be opened,
    /// [`Error::ArchiveFormat`] if it is not a zip container.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
        Self::from_reader(BufReader::new(file), path)
    }
}

impl<R: Read + Seek> ArchivePackage<R> {
    /// Open a package from any seekable reader.
    ///
    /// `path` is only used to label errors.
    pub fn from_reader<P: AsRef<Path>>(reader: R, path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let archive = zip::ZipArchive::new(reader).map_err(|source| Error::ArchiveFormat {
            path: path.clone(),
            source,
        })?;

        let entries: Vec<String> = (0..archive.len())
            .filter_map(|i| archive.name_for_index(i).map(String::from))
            .collect();
        let index = entries.iter().cloned().collect();

        log::debug!("Opened {} with {} entries", path.display(), entries.len());

        Ok(Self {
            path,
            archive,
            entries,
            index,
        })
    }

    /// Uncompressed length of an entry, read from the archive metadata.
    ///
    /// Returns `None` if no entry has that name.
    pub fn entry_len(&mut self, name: &str) -> Result<Option<u64>> {
        let Some(idx) = self.archive.index_for_name(name) else {
            return Ok(None);
        };
        let entry = self
            .archive
            .by_index_raw(idx)
            .map_err(|e| Error::from_zip(&self.path, e))?;
        Ok(Some(entry.size()))
    }

    /// Open an entry's decompressed content.
    ///
    /// The returned reader borrows the package and is released when dropped.
    pub fn open_entry(&mut self, name: &str) -> Result<impl Read + '_> {
        self.archive
            .by_name(name)
            .map_err(|e| Error::from_zip(&self.path, e))
    }
}

impl<R> ArchivePackage<R> {
    /// Path this package was opened from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry paths in archive order.
    #[inline]
    pub fn entry_names(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no entries at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-match membership test.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }
}

impl<R> std::fmt::Debug for ArchivePackage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchivePackage")
            .field("path", &self.path)
            .field("entries", &self.entries)
            .finish()
    }
}
