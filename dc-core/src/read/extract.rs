//! Archive decoding and materialization.

use crate::codec::node::TreeNode;
use crate::codec::{data, tree};
use crate::error::Result;
use crate::flags::WidthFlags;
use crate::fs::EntryStore;
use crate::util::cursor::ByteCursor;
use crate::walk::TreeWalker;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A fully decoded archive: flags, the flat node array (files first),
/// and one content buffer per file node, in the same order.
pub struct Archive {
    pub flags: WidthFlags,
    pub nodes: Vec<TreeNode>,
    pub file_data: Vec<Vec<u8>>,
}

impl Archive {
    /// The files/directories boundary in the flat node array, taken
    /// from the data section's file count.
    pub fn file_count(&self) -> u64 {
        self.file_data.len() as u64
    }
}

/// Parse a blob. There is no magic number: any byte sequence is
/// attempted, and corrupt input surfaces as `Truncated` or
/// `InvalidName`.
pub fn decode(blob: Vec<u8>) -> Result<Archive> {
    let mut cursor = ByteCursor::new(blob);
    let flags = WidthFlags::from_byte(cursor.peek("flags byte")?);
    cursor.advance(false, "flags byte")?;

    let nodes = tree::decode(&mut cursor, flags)?;
    let file_data = data::decode(&mut cursor, flags)?;

    Ok(Archive {
        flags,
        nodes,
        file_data,
    })
}

/// Recreate the archive's tree under `dest` through the collaborator.
pub fn materialize(store: &dyn EntryStore, archive: &Archive, dest: &Path) -> Result<()> {
    store.create_dir(dest)?;
    let walker = TreeWalker::new(&archive.nodes, archive.file_count());
    walker.walk(|path, is_dir, index| {
        let target = safe_join(dest, path)?;
        if is_dir {
            store.create_dir(&target)
        } else {
            store.write_bytes(&target, &archive.file_data[index])
        }
    })?;
    debug!(entries = archive.nodes.len(), dest = %dest.display(), "archive materialized");
    Ok(())
}

/// Read, decode and materialize in one step.
pub fn extract(store: &dyn EntryStore, archive: &Path, dest: &Path) -> Result<()> {
    let blob = store.read_bytes(archive)?;
    let parsed = decode(blob)?;
    materialize(store, &parsed, dest)
}

/// Join a decoded entry path under the destination root, refusing
/// absolute paths and `..` components from hostile blobs.
fn safe_join(root: &Path, entry_path: &str) -> Result<PathBuf> {
    let rel = entry_path.trim_start_matches('/');
    if Path::new(rel).is_absolute() || rel.split('/').any(|part| part == "..") {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("unsafe path in archive: {entry_path}"),
        )
        .into());
    }
    Ok(root.join(rel))
}
