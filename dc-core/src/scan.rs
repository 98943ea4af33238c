//! Directory scanning: turns a real tree (seen through the collaborator)
//! into the flat node lists and file contents the encoders consume.

use crate::codec::node::TreeNode;
use crate::error::{DcError, Result};
use crate::fs::EntryStore;
use std::collections::HashSet;
use std::path::Path;

/// Pre-codec model of the directory being archived.
///
/// Parent indices are raw at this stage: files point at a directory's
/// index within the directory list (or their own file index when
/// top-level), and directories likewise. The final flat array stores
/// directories after all files, so `build_nodes` re-bases every
/// non-root parent by the file count.
pub struct ScannedTree {
    files: Vec<(String, u64)>,
    dirs: Vec<(String, u64)>,
    root_files: HashSet<u64>,
    pub file_data: Vec<Vec<u8>>,
    /// True when the scanned root contains any subdirectory; forces
    /// hierarchical mode for the whole archive.
    pub hierarchical: bool,
}

impl ScannedTree {
    pub fn scan(store: &dyn EntryStore, root: &Path) -> Result<ScannedTree> {
        let mut tree = ScannedTree {
            files: Vec::new(),
            dirs: Vec::new(),
            root_files: HashSet::new(),
            file_data: Vec::new(),
            hierarchical: false,
        };

        let entries = store.list_entries(root)?;
        tree.hierarchical = entries.iter().any(|e| e.is_dir);

        for entry in entries {
            let path = root.join(&entry.name);
            let name = checked_name(entry.name)?;
            if entry.is_dir {
                // A top-level directory is its own raw parent; after
                // re-basing that becomes the root sentinel.
                let dir_index = tree.dirs.len() as u64;
                tree.dirs.push((name, dir_index));
                tree.scan_dir(store, &path, dir_index)?;
            } else {
                let file_index = tree.files.len() as u64;
                tree.root_files.insert(file_index);
                tree.files.push((name, file_index));
                tree.file_data.push(store.read_bytes(&path)?);
            }
        }

        Ok(tree)
    }

    fn scan_dir(&mut self, store: &dyn EntryStore, path: &Path, parent: u64) -> Result<()> {
        for entry in store.list_entries(path)? {
            let child = path.join(&entry.name);
            let name = checked_name(entry.name)?;
            if entry.is_dir {
                let dir_index = self.dirs.len() as u64;
                self.dirs.push((name, parent));
                self.scan_dir(store, &child, dir_index)?;
            } else {
                self.files.push((name, parent));
                self.file_data.push(store.read_bytes(&child)?);
            }
        }
        Ok(())
    }

    pub fn file_count(&self) -> u64 {
        self.files.len() as u64
    }

    pub fn node_count(&self) -> u64 {
        (self.files.len() + self.dirs.len()) as u64
    }

    /// Build the flat node array (files first, directories after) for
    /// the node width currently selected in the flags. None means some
    /// index does not fit that width; the width search retries wider.
    pub fn build_nodes(&self, width: usize) -> Option<Vec<TreeNode>> {
        let mut file_nodes = Vec::with_capacity(self.files.len());
        for (name, raw_parent) in &self.files {
            file_nodes.push(TreeNode::new(name, width, *raw_parent)?);
        }
        let mut dir_nodes = Vec::with_capacity(self.dirs.len());
        for (name, raw_parent) in &self.dirs {
            dir_nodes.push(TreeNode::new(name, width, *raw_parent)?);
        }
        self.repair_parent_indices(&mut file_nodes, &mut dir_nodes)?;

        file_nodes.append(&mut dir_nodes);
        Some(file_nodes)
    }

    /// Re-base raw parent indices into the merged index space by adding
    /// the file count. Root files keep their self-sentinel untouched;
    /// root directories become self-sentinels through the shift.
    fn repair_parent_indices(
        &self,
        file_nodes: &mut [TreeNode],
        dir_nodes: &mut [TreeNode],
    ) -> Option<()> {
        let file_count = self.file_count();
        for (i, node) in file_nodes.iter_mut().enumerate() {
            if !self.root_files.contains(&(i as u64)) && !node.parent.checked_add(file_count) {
                return None;
            }
        }
        for node in dir_nodes.iter_mut() {
            if !node.parent.checked_add(file_count) {
                return None;
            }
        }
        Some(())
    }
}

fn checked_name(name: String) -> Result<String> {
    if name.is_empty() {
        return Err(DcError::InvalidName("empty entry name".into()));
    }
    if name.len() > 255 {
        return Err(DcError::InvalidName(format!(
            "entry name longer than 255 bytes: {name}"
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::testing::MemStore;

    #[test]
    fn flat_root_files_are_self_sentinels() {
        let store = MemStore::new();
        store.add_dir("/root");
        store.add_file("/root/a.txt", b"a");
        store.add_file("/root/b.txt", b"bb");

        let tree = ScannedTree::scan(&store, Path::new("/root")).unwrap();
        assert!(!tree.hierarchical);
        assert_eq!(tree.file_count(), 2);
        assert_eq!(tree.file_data, vec![b"a".to_vec(), b"bb".to_vec()]);

        let nodes = tree.build_nodes(1).unwrap();
        assert_eq!(nodes[0].parent.value(), 0);
        assert_eq!(nodes[1].parent.value(), 1);
    }

    #[test]
    fn subdirectory_forces_hierarchical_and_rebases_parents() {
        let store = MemStore::new();
        store.add_dir("/root");
        store.add_dir("/root/sub");
        store.add_file("/root/top.txt", b"t");
        store.add_file("/root/sub/inner.txt", b"i");

        let tree = ScannedTree::scan(&store, Path::new("/root")).unwrap();
        assert!(tree.hierarchical);
        assert_eq!(tree.node_count(), 3);

        // Listing order is name-sorted: "sub" before "top.txt", so the
        // scan sees inner.txt first. Flat array: [inner.txt, top.txt, sub].
        let nodes = tree.build_nodes(1).unwrap();
        assert_eq!(nodes[0].name, "inner.txt");
        assert_eq!(nodes[0].parent.value(), 2); // inside sub
        assert_eq!(nodes[1].name, "top.txt");
        assert_eq!(nodes[1].parent.value(), 1); // root sentinel
        assert_eq!(nodes[2].name, "sub");
        assert_eq!(nodes[2].parent.value(), 2); // root sentinel
    }

    #[test]
    fn nested_directories_point_at_their_parents() {
        let store = MemStore::new();
        store.add_dir("/root");
        store.add_dir("/root/a");
        store.add_dir("/root/a/b");
        store.add_file("/root/a/b/deep.txt", b"d");

        let tree = ScannedTree::scan(&store, Path::new("/root")).unwrap();
        let nodes = tree.build_nodes(1).unwrap();
        // Flat array: [deep.txt, a, b]; file_count = 1.
        assert_eq!(nodes[0].parent.value(), 2); // deep.txt in b
        assert_eq!(nodes[1].parent.value(), 1); // a is top-level
        assert_eq!(nodes[2].parent.value(), 1); // b in a
    }

    #[test]
    fn narrow_width_fails_and_wider_succeeds() {
        let store = MemStore::new();
        store.add_dir("/root");
        for i in 0..300 {
            store.add_file(&format!("/root/f{i:04}"), b"");
        }

        let tree = ScannedTree::scan(&store, Path::new("/root")).unwrap();
        // Raw self-sentinel indices up to 299 do not fit one byte.
        assert!(tree.build_nodes(1).is_none());
        assert!(tree.build_nodes(2).is_some());
    }

    #[test]
    fn zero_length_name_is_invalid() {
        assert!(matches!(
            checked_name(String::new()),
            Err(DcError::InvalidName(_))
        ));
    }

    #[test]
    fn oversized_name_is_invalid() {
        let store = MemStore::new();
        store.add_dir("/root");
        let long = "x".repeat(300);
        store.add_file(&format!("/root/{long}"), b"");
        assert!(matches!(
            ScannedTree::scan(&store, Path::new("/root")),
            Err(DcError::InvalidName(_))
        ));
    }

    #[test]
    fn empty_directory_scans_to_nothing() {
        let store = MemStore::new();
        store.add_dir("/root");
        let tree = ScannedTree::scan(&store, Path::new("/root")).unwrap();
        assert_eq!(tree.node_count(), 0);
        assert!(tree.build_nodes(1).unwrap().is_empty());
    }
}
