use crate::error::{DcError, Result};
use crate::flags::{Mode, WidthFlags};
use crate::util::cursor::ByteCursor;
use crate::util::varint::VarWidthInt;

/// One named entry in the flat node array.
///
/// Whether a node is a file or a directory is positional (the first
/// `file_count` entries are files), never stored here. `parent` is the
/// flat index of the parent directory, or the node's own index for
/// top-level entries — the root sentinel that makes membership
/// self-describing without a flag.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub parent: VarWidthInt,
}

impl TreeNode {
    /// Build-path constructor. None means `parent` does not fit the
    /// given node width and the builder must retry wider.
    pub fn new(name: &str, width: usize, parent: u64) -> Option<TreeNode> {
        let parent = VarWidthInt::encode(parent, width)?;
        Some(TreeNode {
            name: name.to_string(),
            parent,
        })
    }

    /// Wire form: `[parent bytes (hierarchical only)][len][name]`.
    /// The caller guarantees the name is 1..=255 bytes.
    pub fn encode(&self, flags: WidthFlags, out: &mut Vec<u8>) {
        if flags.is_on(Mode::Hierarchical) {
            out.extend_from_slice(self.parent.bytes());
        }
        out.push(self.name.len() as u8);
        out.extend_from_slice(self.name.as_bytes());
    }

    /// Decode one node. In flat mode the parent is left at zero; the
    /// caller fills in the own-index sentinel once it knows the index.
    pub fn decode(cursor: &mut ByteCursor, flags: WidthFlags) -> Result<TreeNode> {
        let width = flags.node_width();
        let parent = if flags.is_on(Mode::Hierarchical) {
            VarWidthInt::decode(width, cursor, "node parent index")?
        } else {
            VarWidthInt::zero(width)
        };

        let len = cursor.peek("node name length")?;
        if len == 0 {
            return Err(DcError::InvalidName("zero-length node name".into()));
        }
        cursor.advance(true, "node name")?;
        let raw = cursor.take(len as usize, "node name")?;

        Ok(TreeNode {
            name: String::from_utf8_lossy(&raw).into_owned(),
            parent,
        })
    }

    pub fn set_parent(&mut self, parent: u64) -> bool {
        self.parent.set(parent)
    }
}
