//! Archive building: width search, run-length decision, blob assembly.

use crate::codec::{data, tree};
use crate::error::{DcError, Result};
use crate::flags::{Mode, WidthFlags};
use crate::fs::EntryStore;
use crate::scan::ScannedTree;
use std::path::Path;
use tracing::debug;

pub const ARCHIVE_EXTENSION: &str = "dc";

/// Encode `dir` into a blob: `[flags byte][flat tree][data]`.
pub fn build(store: &dyn EntryStore, dir: &Path) -> Result<Vec<u8>> {
    let scanned = ScannedTree::scan(store, dir)?;

    let mut flags = WidthFlags::for_build();
    if scanned.hierarchical {
        flags.set_on(Mode::Hierarchical);
    }

    // Narrowest node width that fits every parent index and the counts.
    let mut node_bytes = Vec::new();
    let found = flags.search_widths(Mode::NodeShort, Mode::NodeInt, |flags| {
        let Some(nodes) = scanned.build_nodes(flags.node_width()) else {
            return false;
        };
        match tree::encode(&nodes, *flags) {
            Some(bytes) => {
                node_bytes = bytes;
                true
            }
            None => false,
        }
    });
    if !found {
        return Err(DcError::BuildFailed);
    }

    // Best of two data encodings: run-length on vs off. Run-length wins
    // only when strictly smaller; ties keep it off.
    let mut with_runs = flags;
    with_runs.set_on(Mode::RunLength);
    let run_bytes = encode_data(&scanned, &mut with_runs);

    let mut without_runs = flags;
    without_runs.set_off(Mode::RunLength);
    let raw_bytes = encode_data(&scanned, &mut without_runs);

    let (flags, data_bytes) = match (run_bytes, raw_bytes) {
        (None, None) => return Err(DcError::BuildFailed),
        (Some(run), None) => (with_runs, run),
        (None, Some(raw)) => (without_runs, raw),
        (Some(run), Some(raw)) => {
            if run.len() < raw.len() {
                debug!(run_length = run.len(), raw = raw.len(), "keeping run-length encoding");
                (with_runs, run)
            } else {
                debug!(run_length = run.len(), raw = raw.len(), "keeping raw encoding");
                (without_runs, raw)
            }
        }
    };

    let mut blob = Vec::with_capacity(1 + node_bytes.len() + data_bytes.len());
    blob.push(flags.byte());
    blob.extend_from_slice(&node_bytes);
    blob.extend_from_slice(&data_bytes);

    debug!(
        nodes = scanned.node_count(),
        files = scanned.file_count(),
        bytes = blob.len(),
        "archive built"
    );
    Ok(blob)
}

/// Nested search for the data section: repeat width outer, fragment
/// width inner, both ascending, first success kept.
fn encode_data(scanned: &ScannedTree, flags: &mut WidthFlags) -> Option<Vec<u8>> {
    let mut bytes = None;
    let found = flags.search_widths(Mode::RepeatShort, Mode::RepeatInt, |flags| {
        flags.search_widths(Mode::FragmentShort, Mode::FragmentInt, |flags| {
            match data::encode(&scanned.file_data, *flags) {
                Some(encoded) => {
                    bytes = Some(encoded);
                    true
                }
                None => false,
            }
        })
    });
    if found { bytes } else { None }
}

/// Build `dir` and hand the blob to the collaborator at `out`.
pub fn compress(store: &dyn EntryStore, dir: &Path, out: &Path) -> Result<()> {
    let blob = build(store, dir)?;
    store.write_bytes(out, &blob)
}
