//! Selection ranges and char/byte offset conversion.
//!
//! All editor offsets count chars, not bytes. The regex scans in
//! [`super::toggle`] work on byte offsets, so every boundary crossing goes
//! through [`char_to_byte`] and [`byte_to_char`].

/// A selection in the buffer, `start <= end`. A caret has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, swapping the ends if given in reverse.
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A zero-width selection at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub const fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// Clamp both ends to `max`.
    pub fn clamped(self, max: usize) -> Self {
        Self::new(self.start.min(max), self.end.min(max))
    }
}

/// Byte offset of the `char_idx`-th char in `s`, clamped to `s.len()`.
pub fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(b, _)| b)
}

/// Number of chars preceding byte offset `byte_idx` in `s`.
pub fn byte_to_char(s: &str, byte_idx: usize) -> usize {
    s[..byte_idx.min(s.len())].chars().count()
}
