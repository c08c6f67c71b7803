//! Codepoint windows mapped onto grid cells.

use core::fmt;

/// The codepoint of the solid cursor glyph (ASCII `DEL`).
pub const SOLID_GLYPH_CODEPOINT: u32 = 0x7F;

/// A contiguous window of codepoints, the first of which occupies cell `0` of the grid.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Charset {
    /// The codepoint stored in the first cell.
    pub first: u32,
    /// The number of glyphs the window holds.
    pub count: usize,
}

impl Charset {
    /// The printable ASCII range, from `' '` through `'~'`.
    pub const ASCII_PRINTABLE: Self = Self {
        first: 0x20,
        count: 95,
    };

    /// Creates a new [`Charset`] starting at `first` and holding `count` glyphs.
    pub const fn new(first: u32, count: usize) -> Self {
        Self { first, count }
    }

    /// Returns the cell index at which `codepoint` is stored, or `None` if the codepoint lies
    /// below the window.
    ///
    /// Indices past [`Charset::count`] are returned as well; the solid glyph lives just past the
    /// printable range.
    pub const fn glyph_index(&self, codepoint: u32) -> Option<usize> {
        match codepoint.checked_sub(self.first) {
            Some(offset) => Some(offset as usize),
            None => None,
        }
    }

    /// Returns the cell index reserved for the solid cursor glyph.
    pub const fn solid_glyph_index(&self) -> Option<usize> {
        self.glyph_index(SOLID_GLYPH_CODEPOINT)
    }

    /// Returns the codepoint stored at cell `index`.
    pub const fn codepoint(&self, index: usize) -> u32 {
        self.first.saturating_add(index as u32)
    }

    /// Returns the last codepoint of the window.
    pub const fn last(&self) -> u32 {
        self.codepoint(self.count.saturating_sub(1))
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::ASCII_PRINTABLE
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.first, self.last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_glyph_follows_printable_ascii() {
        assert_eq!(Charset::ASCII_PRINTABLE.solid_glyph_index(), Some(95));
        assert_eq!(Charset::ASCII_PRINTABLE.last(), u32::from(b'~'));
    }

    #[test]
    fn codepoints_below_window_have_no_cell() {
        let charset = Charset::new(0x41, 26);

        assert_eq!(charset.glyph_index(0x40), None);
        assert_eq!(charset.glyph_index(0x41), Some(0));
        assert_eq!(charset.codepoint(25), u32::from(b'Z'));
    }
}
