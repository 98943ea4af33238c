use crate::error::Result;
use std::path::Path;
use walkdir::WalkDir;

/// One directory-listing entry, in the collaborator's stable order.
#[derive(Debug, Clone)]
pub struct FsEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Filesystem collaborator. The codec core only touches listings and
/// whole byte buffers through this seam; everything on the other side of
/// it is plain in-memory data, so tests can swap in a fake tree.
///
/// `list_entries` must return a stable order across the scan-then-read
/// sequence of a build.
pub trait EntryStore {
    fn list_entries(&self, path: &Path) -> Result<Vec<FsEntry>>;
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()>;
    fn create_dir(&self, path: &Path) -> Result<()>;
}

/// Real filesystem backend.
pub struct OsEntryStore;

impl EntryStore for OsEntryStore {
    fn list_entries(&self, path: &Path) -> Result<Vec<FsEntry>> {
        let mut entries = Vec::new();
        for e in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .follow_links(false)
        {
            let e = e.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            entries.push(FsEntry {
                name: e.file_name().to_string_lossy().into_owned(),
                is_dir: e.file_type().is_dir(),
            });
        }
        Ok(entries)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        Ok(std::fs::write(path, bytes)?)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        Ok(std::fs::create_dir_all(path)?)
    }
}
