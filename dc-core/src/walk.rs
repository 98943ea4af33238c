//! Parent/child reconstruction over the flat node array.

use crate::codec::node::TreeNode;
use crate::error::Result;

/// Walks the flat node array as a directory tree and hands each entry's
/// full path to a visitor.
///
/// Each recursion level rescans the whole array looking for direct
/// children of the current parent. That is deliberate: no auxiliary
/// index structures, at a cost of O(nodes x directories), which is fine
/// for the small personal trees this format targets.
pub struct TreeWalker<'a> {
    nodes: &'a [TreeNode],
    file_count: u64,
}

impl<'a> TreeWalker<'a> {
    /// `nodes` must hold the `file_count` file nodes first, directories
    /// after.
    pub fn new(nodes: &'a [TreeNode], file_count: u64) -> Self {
        Self { nodes, file_count }
    }

    /// Depth-first visit of every reachable entry, top-level entries in
    /// flat-index order. The visitor receives `(path, is_dir, index)`.
    pub fn walk(&self, mut visit: impl FnMut(&str, bool, usize) -> Result<()>) -> Result<()> {
        self.walk_children("", None, &mut visit)
    }

    fn walk_children(
        &self,
        path: &str,
        parent: Option<u64>,
        visit: &mut impl FnMut(&str, bool, usize) -> Result<()>,
    ) -> Result<()> {
        for (index, node) in self.nodes.iter().enumerate() {
            let i = index as u64;
            let is_child = match parent {
                // Top level is the self-sentinel: parent == own index.
                None => node.parent.value() == i,
                Some(p) => node.parent.value() == p && node.parent.value() != i,
            };
            if !is_child {
                continue;
            }

            let full = format!("{path}/{}", node.name);
            let is_dir = i >= self.file_count;
            visit(&full, is_dir, index)?;
            if is_dir {
                self.walk_children(&full, Some(i), visit)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, parent: u64) -> TreeNode {
        TreeNode::new(name, 4, parent).unwrap()
    }

    fn collect(nodes: &[TreeNode], file_count: u64) -> Vec<(String, bool, usize)> {
        let mut seen = Vec::new();
        TreeWalker::new(nodes, file_count)
            .walk(|path, is_dir, index| {
                seen.push((path.to_string(), is_dir, index));
                Ok(())
            })
            .unwrap();
        seen
    }

    #[test]
    fn empty_array_visits_nothing() {
        assert!(collect(&[], 0).is_empty());
    }

    #[test]
    fn flat_files_visit_in_array_order() {
        let nodes = vec![node("a", 0), node("b", 1), node("c", 2), node("d", 3)];
        let seen = collect(&nodes, 4);
        assert_eq!(
            seen,
            vec![
                ("/a".to_string(), false, 0),
                ("/b".to_string(), false, 1),
                ("/c".to_string(), false, 2),
                ("/d".to_string(), false, 3),
            ]
        );
    }

    #[test]
    fn nested_tree_builds_full_paths() {
        // files: inner.txt (in sub), root.txt (top level)
        // dirs:  top (index 2, top level), sub (index 3, in top)
        let nodes = vec![
            node("inner.txt", 3),
            node("root.txt", 1),
            node("top", 2),
            node("sub", 2),
        ];
        let seen = collect(&nodes, 2);
        assert_eq!(
            seen,
            vec![
                ("/root.txt".to_string(), false, 1),
                ("/top".to_string(), true, 2),
                ("/top/sub".to_string(), true, 3),
                ("/top/sub/inner.txt".to_string(), false, 0),
            ]
        );
    }

    #[test]
    fn directory_classification_is_positional() {
        let nodes = vec![node("x", 0), node("x", 1)];
        let seen = collect(&nodes, 1);
        assert_eq!(seen[0].1, false);
        assert_eq!(seen[1].1, true);
    }

    #[test]
    fn visitor_errors_stop_the_walk() {
        let nodes = vec![node("a", 0), node("b", 1)];
        let mut calls = 0;
        let result = TreeWalker::new(&nodes, 2).walk(|_, _, _| {
            calls += 1;
            Err(crate::error::DcError::Truncated("boom"))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
