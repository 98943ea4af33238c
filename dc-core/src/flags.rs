//! The one-byte mode register at the front of every archive, and the
//! width search that drives every "pick the narrowest integer" decision.

/// Bit assignments are wire format and must not move.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// File fragments are (byte, count) pairs instead of raw bytes.
    RunLength = 0,
    /// Each node carries an explicit parent reference; off means every
    /// entry is top-level.
    Hierarchical = 1,
    // Each width below is selected by a (short, int) flag pair:
    // both off = 1 byte, short = 2, int = 4, both = 8.
    NodeShort = 2,
    NodeInt = 3,
    FragmentShort = 4,
    FragmentInt = 5,
    RepeatShort = 6,
    RepeatInt = 7,
}

/// Starting point for a build: run-length on and every count at its
/// widest. The search narrows from here; these are never the final
/// choice by themselves.
const DEFAULT_ON: [Mode; 4] = [
    Mode::RunLength,
    Mode::RepeatInt,
    Mode::FragmentInt,
    Mode::NodeInt,
];

/// Ascending byte widths: 1, 2, 4, 8. Order is part of the contract;
/// the search keeps the first combination that succeeds.
const WIDTH_COMBINATIONS: [(bool, bool); 4] =
    [(false, false), (true, false), (false, true), (true, true)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthFlags {
    byte: u8,
}

impl WidthFlags {
    /// Flags for a fresh build, with the defaults applied.
    pub fn for_build() -> Self {
        let mut flags = Self { byte: 0 };
        for mode in DEFAULT_ON {
            flags.set_on(mode);
        }
        flags
    }

    /// Flags as parsed from byte 0 of a blob.
    pub fn from_byte(byte: u8) -> Self {
        Self { byte }
    }

    pub fn byte(self) -> u8 {
        self.byte
    }

    pub fn is_on(self, mode: Mode) -> bool {
        self.byte & (1 << mode as u8) != 0
    }

    pub fn is_off(self, mode: Mode) -> bool {
        !self.is_on(mode)
    }

    pub fn set_on(&mut self, mode: Mode) -> &mut Self {
        self.byte |= 1 << mode as u8;
        self
    }

    pub fn set_off(&mut self, mode: Mode) -> &mut Self {
        self.byte &= !(1 << mode as u8);
        self
    }

    /// Byte width selected by a (short, int) flag pair.
    pub fn width_of(short_on: bool, int_on: bool) -> usize {
        match (short_on, int_on) {
            (false, false) => 1,
            (true, false) => 2,
            (false, true) => 4,
            (true, true) => 8,
        }
    }

    /// Width of node-count and parent-index integers. Also used for the
    /// file count, which shares the node width pair.
    pub fn node_width(self) -> usize {
        Self::width_of(self.is_on(Mode::NodeShort), self.is_on(Mode::NodeInt))
    }

    /// Width of the per-file fragment count.
    pub fn fragment_width(self) -> usize {
        Self::width_of(
            self.is_on(Mode::FragmentShort),
            self.is_on(Mode::FragmentInt),
        )
    }

    /// Width of run-length repeat counts.
    pub fn repeat_width(self) -> usize {
        Self::width_of(self.is_on(Mode::RepeatShort), self.is_on(Mode::RepeatInt))
    }

    /// Try the four width combinations for one (short, int) pair in
    /// ascending order, keeping the first that `attempt` accepts. The
    /// flags are left at the last combination tried, successful or not.
    pub fn search_widths(
        &mut self,
        short: Mode,
        int: Mode,
        mut attempt: impl FnMut(&mut WidthFlags) -> bool,
    ) -> bool {
        for (short_on, int_on) in WIDTH_COMBINATIONS {
            if short_on {
                self.set_on(short);
            } else {
                self.set_off(short);
            }
            if int_on {
                self.set_on(int);
            } else {
                self.set_off(int);
            }
            if attempt(self) {
                return true;
            }
            tracing::debug!(
                pair = ?short,
                width = Self::width_of(short_on, int_on),
                "width too narrow, widening"
            );
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_positions_are_wire_format() {
        let mut flags = WidthFlags::from_byte(0);
        flags.set_on(Mode::RunLength);
        assert_eq!(flags.byte(), 0b0000_0001);
        flags.set_on(Mode::Hierarchical);
        assert_eq!(flags.byte(), 0b0000_0011);
        flags.set_on(Mode::RepeatInt);
        assert_eq!(flags.byte(), 0b1000_0011);
        flags.set_off(Mode::RunLength);
        assert_eq!(flags.byte(), 0b1000_0010);
    }

    #[test]
    fn build_defaults() {
        let flags = WidthFlags::for_build();
        assert!(flags.is_on(Mode::RunLength));
        assert!(flags.is_off(Mode::Hierarchical));
        assert_eq!(flags.node_width(), 4);
        assert_eq!(flags.fragment_width(), 4);
        assert_eq!(flags.repeat_width(), 4);
    }

    #[test]
    fn width_pairs_map_to_bytes() {
        assert_eq!(WidthFlags::width_of(false, false), 1);
        assert_eq!(WidthFlags::width_of(true, false), 2);
        assert_eq!(WidthFlags::width_of(false, true), 4);
        assert_eq!(WidthFlags::width_of(true, true), 8);
    }

    #[test]
    fn search_tries_ascending_and_keeps_first_success() {
        let mut flags = WidthFlags::for_build();
        let mut seen = Vec::new();
        let ok = flags.search_widths(Mode::FragmentShort, Mode::FragmentInt, |f| {
            seen.push(f.fragment_width());
            f.fragment_width() >= 4
        });
        assert!(ok);
        assert_eq!(seen, vec![1, 2, 4]);
        assert_eq!(flags.fragment_width(), 4);
    }

    #[test]
    fn exhausted_search_leaves_widest_and_reports_failure() {
        let mut flags = WidthFlags::for_build();
        let ok = flags.search_widths(Mode::NodeShort, Mode::NodeInt, |_| false);
        assert!(!ok);
        assert_eq!(flags.node_width(), 8);
    }
}
