//! Per-file fragment engine: `[fragment_count][fragment]...` where a
//! fragment is one raw byte, or a (byte, repeat count) pair in
//! run-length mode.

use crate::error::Result;
use crate::flags::{Mode, WidthFlags};
use crate::util::cursor::ByteCursor;
use crate::util::varint::VarWidthInt;

/// Encode one file's bytes under the current flags. None means the
/// fragment count or some run length overflowed its width, which sends
/// the builder to the next width combination rather than failing hard.
pub fn encode(data: &[u8], flags: WidthFlags) -> Option<Vec<u8>> {
    let run_length = flags.is_on(Mode::RunLength);
    let fragment_width = flags.fragment_width();
    let repeat_width = flags.repeat_width();
    let max_count = VarWidthInt::max_value(fragment_width);
    let max_repeat = VarWidthInt::max_value(repeat_width);

    let mut body = Vec::new();
    let mut count: u64 = 0;
    let mut i = 0usize;

    while i < data.len() {
        let byte = data[i];
        body.push(byte);
        count += 1;
        if count > max_count {
            return None;
        }

        if run_length {
            // Collapse the maximal run of this byte into one fragment.
            let mut run: u64 = 1;
            i += 1;
            while i < data.len() && data[i] == byte {
                run += 1;
                if run > max_repeat {
                    return None;
                }
                i += 1;
            }
            let repeat = VarWidthInt::encode(run, repeat_width)?;
            body.extend_from_slice(repeat.bytes());
        } else {
            i += 1;
        }
    }

    let fragment_count = VarWidthInt::encode(count, fragment_width)?;
    let mut out = Vec::with_capacity(fragment_width + body.len());
    out.extend_from_slice(fragment_count.bytes());
    out.extend_from_slice(&body);
    Some(out)
}

/// Decode one file's content, expanding runs in run-length mode.
pub fn decode(cursor: &mut ByteCursor, flags: WidthFlags) -> Result<Vec<u8>> {
    let run_length = flags.is_on(Mode::RunLength);
    let fragment_width = flags.fragment_width();
    let repeat_width = flags.repeat_width();

    let count = VarWidthInt::decode(fragment_width, cursor, "fragment count")?;
    let mut out = Vec::new();

    for i in 0..count.value() {
        let not_last = i + 1 < count.value();
        let byte = cursor.peek("fragment byte")?;

        if run_length {
            cursor.advance(not_last, "fragment repeat count")?;
            let repeat = VarWidthInt::decode(repeat_width, cursor, "fragment repeat count")?;
            for _ in 0..repeat.value() {
                out.push(byte);
            }
        } else {
            out.push(byte);
            cursor.advance(not_last, "fragment byte")?;
        }
    }

    Ok(out)
}
