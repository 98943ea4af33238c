use crate::error::{DcError, Result};

/// Forward-only byte reader with one byte of lookahead. Every decoder in
/// the crate consumes its input through one of these; the cursor is moved
/// by exactly the number of bytes each part needs, so the next decoder
/// picks up where the previous one stopped.
///
/// Construction performs the first advance: a fresh cursor already points
/// at byte 0 of a non-empty input.
#[derive(Debug)]
pub struct ByteCursor {
    bytes: Vec<u8>,
    pos: usize,
    live: bool,
}

impl ByteCursor {
    pub fn new(bytes: Vec<u8>) -> Self {
        let live = !bytes.is_empty();
        Self {
            bytes,
            pos: 0,
            live,
        }
    }

    /// Move to the next byte. When `required` is set, exhaustion is a
    /// decode failure; otherwise it just returns false and leaves the
    /// cursor exhausted.
    pub fn advance(&mut self, required: bool, what: &'static str) -> Result<bool> {
        if self.live && self.pos + 1 < self.bytes.len() {
            self.pos += 1;
            return Ok(true);
        }
        self.live = false;
        if required {
            return Err(DcError::Truncated(what));
        }
        Ok(false)
    }

    /// Current byte without moving.
    pub fn peek(&self, what: &'static str) -> Result<u8> {
        if self.live {
            Ok(self.bytes[self.pos])
        } else {
            Err(DcError::Truncated(what))
        }
    }

    /// Read exactly `n` bytes. The advance past the last byte is not
    /// required: an input may end exactly on the final byte of a read.
    pub fn take(&mut self, n: usize, what: &'static str) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(self.peek(what)?);
            self.advance(i + 1 < n, what)?;
        }
        Ok(out)
    }
}
