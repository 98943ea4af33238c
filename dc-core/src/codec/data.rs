//! Data section: `[file_count][file_0]...[file_{n-1}]`. The file count
//! shares the node width pair, and file `i` belongs to file-node `i` of
//! the flat node array.

use crate::codec::file;
use crate::error::Result;
use crate::flags::WidthFlags;
use crate::util::cursor::ByteCursor;
use crate::util::varint::VarWidthInt;

pub fn encode(files: &[Vec<u8>], flags: WidthFlags) -> Option<Vec<u8>> {
    let count = VarWidthInt::encode(files.len() as u64, flags.node_width())?;
    let mut out = Vec::new();
    out.extend_from_slice(count.bytes());
    for data in files {
        out.extend_from_slice(&file::encode(data, flags)?);
    }
    Some(out)
}

pub fn decode(cursor: &mut ByteCursor, flags: WidthFlags) -> Result<Vec<Vec<u8>>> {
    let count = VarWidthInt::decode(flags.node_width(), cursor, "file count")?;
    let mut files = Vec::new();
    for _ in 0..count.value() {
        files.push(file::decode(cursor, flags)?);
    }
    Ok(files)
}
