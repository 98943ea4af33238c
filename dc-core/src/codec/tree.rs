//! Flat-tree section: `[node_count][node_0]...[node_{n-1}]`.

use crate::codec::node::TreeNode;
use crate::error::Result;
use crate::flags::{Mode, WidthFlags};
use crate::util::cursor::ByteCursor;
use crate::util::varint::VarWidthInt;

/// Encode the node array. None means the node count does not fit the
/// current node width.
pub fn encode(nodes: &[TreeNode], flags: WidthFlags) -> Option<Vec<u8>> {
    let count = VarWidthInt::encode(nodes.len() as u64, flags.node_width())?;
    let mut out = Vec::new();
    out.extend_from_slice(count.bytes());
    for node in nodes {
        node.encode(flags, &mut out);
    }
    Some(out)
}

pub fn decode(cursor: &mut ByteCursor, flags: WidthFlags) -> Result<Vec<TreeNode>> {
    let count = VarWidthInt::decode(flags.node_width(), cursor, "node count")?;
    let mut nodes = Vec::new();
    for i in 0..count.value() {
        let mut node = TreeNode::decode(cursor, flags)?;
        if flags.is_off(Mode::Hierarchical) {
            // Flat mode stores no parent; every entry is its own parent
            // (the root sentinel). The index always fits because the
            // count did.
            node.set_parent(i);
        }
        nodes.push(node);
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_hierarchical() {
        let mut flags = WidthFlags::from_byte(0);
        flags.set_on(Mode::Hierarchical);
        let width = flags.node_width();

        let nodes = vec![
            TreeNode::new("a.txt", width, 2).unwrap(),
            TreeNode::new("b.txt", width, 1).unwrap(),
            TreeNode::new("sub", width, 2).unwrap(),
        ];
        let bytes = encode(&nodes, flags).unwrap();

        let mut cursor = ByteCursor::new(bytes);
        let back = decode(&mut cursor, flags).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back[0].name, "a.txt");
        assert_eq!(back[0].parent.value(), 2);
        assert_eq!(back[2].parent.value(), 2);
    }

    #[test]
    fn flat_mode_defaults_parent_to_own_index() {
        let flags = WidthFlags::from_byte(0);
        let width = flags.node_width();
        let nodes = vec![
            TreeNode::new("x", width, 0).unwrap(),
            TreeNode::new("y", width, 0).unwrap(),
        ];
        let bytes = encode(&nodes, flags).unwrap();

        let mut cursor = ByteCursor::new(bytes);
        let back = decode(&mut cursor, flags).unwrap();
        assert_eq!(back[0].parent.value(), 0);
        assert_eq!(back[1].parent.value(), 1);
    }

    #[test]
    fn count_overflow_asks_for_wider_width() {
        let flags = WidthFlags::from_byte(0); // node width 1
        let width = flags.node_width();
        let nodes: Vec<TreeNode> = (0..256)
            .map(|_| TreeNode::new("n", width, 0).unwrap())
            .collect();
        assert!(encode(&nodes, flags).is_none());
    }

    #[test]
    fn empty_array_is_just_the_count() {
        let flags = WidthFlags::from_byte(0);
        let bytes = encode(&[], flags).unwrap();
        assert_eq!(bytes, vec![0]);

        let mut cursor = ByteCursor::new(bytes);
        assert!(decode(&mut cursor, flags).unwrap().is_empty());
    }
}
