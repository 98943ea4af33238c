use crate::error::Result;
use crate::util::cursor::ByteCursor;

/// Non-negative integer with a fixed serialization width of 1, 2, 4 or 8
/// bytes, stored big-endian and zero-padded on the wire. Setting a value
/// that needs more bytes than the width allows fails instead of
/// truncating; that failure is the signal the width search retries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarWidthInt {
    width: usize,
    value: u64,
    bytes: Vec<u8>,
}

impl VarWidthInt {
    pub fn zero(width: usize) -> Self {
        Self {
            width,
            value: 0,
            bytes: vec![0; width],
        }
    }

    /// Encode `value` into `width` bytes, or None on overflow.
    pub fn encode(value: u64, width: usize) -> Option<Self> {
        let mut v = Self::zero(width);
        v.set(value).then_some(v)
    }

    /// Read exactly `width` bytes from the cursor.
    pub fn decode(width: usize, cursor: &mut ByteCursor, what: &'static str) -> Result<Self> {
        let bytes = cursor.take(width, what)?;
        let mut value = 0u64;
        for &b in &bytes {
            value = value << 8 | b as u64;
        }
        Ok(Self {
            width,
            value,
            bytes,
        })
    }

    /// Replace the value. False means the value does not fit this width
    /// and a wider one must be tried; the old state is kept.
    pub fn set(&mut self, value: u64) -> bool {
        if value > Self::max_value(self.width) {
            return false;
        }
        self.value = value;
        self.bytes = value.to_be_bytes()[8 - self.width..].to_vec();
        true
    }

    /// Add `increment` with an overflow check against the width. Used to
    /// re-base parent indices after the file/directory index spaces are
    /// merged.
    pub fn checked_add(&mut self, increment: u64) -> bool {
        if increment > Self::max_value(self.width) - self.value {
            return false;
        }
        self.set(self.value + increment)
    }

    /// Largest value representable in `width` bytes.
    pub fn max_value(width: usize) -> u64 {
        if width >= 8 {
            u64::MAX
        } else {
            (1u64 << (8 * width as u32)) - 1
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> usize {
        self.width
    }
}
