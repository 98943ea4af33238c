use crate::error::Result;
use crate::fs::EntryStore;
use crate::read::extract::decode;
use crate::walk::TreeWalker;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ListEntry {
    pub path: String,
    pub is_dir: bool,
    pub size: u64,
}

/// Decode an archive and walk its tree without writing anything,
/// returning every entry in visit order.
pub fn list(store: &dyn EntryStore, archive: &Path) -> Result<Vec<ListEntry>> {
    let blob = store.read_bytes(archive)?;
    let parsed = decode(blob)?;

    let mut entries = Vec::new();
    let walker = TreeWalker::new(&parsed.nodes, parsed.file_count());
    walker.walk(|path, is_dir, index| {
        let size = if is_dir {
            0
        } else {
            parsed.file_data[index].len() as u64
        };
        entries.push(ListEntry {
            path: path.to_string(),
            is_dir,
            size,
        });
        Ok(())
    })?;
    Ok(entries)
}
