//! Code-point cursor over the raw bytes of a manuscript.
//!
//! The cursor never fails. Bytes that do not decode as UTF-8 are read one at a
//! time as U+FFFD, so a damaged file still yields every line it contains.
//!
//! # Performance
//!
//! - Line reads find the newline with `memchr` (SIMD on supported platforms)
//! - Valid UTF-8 lines are copied out in one step; only damaged lines fall
//!   back to code-point decoding

use memchr::{memchr, memchr_iter, memrchr};

/// Location of the cursor within its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, counted in bytes.
    pub column: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Rune-level reader over an immutable byte sequence.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `bytes`.
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Total length of the input in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the input is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check if all input has been consumed.
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Current offset, line and column.
    #[inline]
    pub fn position(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    /// Move to `offset`, clamped to the end of the input.
    ///
    /// Line and column are recomputed from the bytes before the new offset.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset.min(self.bytes.len());

        let consumed = &self.bytes[..self.pos];
        let line_start = memrchr(b'\n', consumed).map_or(0, |i| i + 1);

        self.line = 1 + memchr_iter(b'\n', consumed).count() as u32;
        self.column = 1 + (self.pos - line_start) as u32;
    }

    /// Decode and consume the next code point.
    ///
    /// Returns `None` at end of input.
    #[inline]
    pub fn get(&mut self) -> Option<char> {
        let (c, width) = decode(&self.bytes[self.pos..])?;

        self.pos += width;

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += width as u32;
        }
        Some(c)
    }

    /// Consume everything up to and including the next newline.
    ///
    /// The newline, and a carriage return directly before it, are not part of
    /// the returned line. Returns `None` only when the cursor is already at
    /// end of input, so empty lines come back as `Some("")`.
    pub fn get_line(&mut self) -> Option<String> {
        if self.is_eof() {
            return None;
        }

        let rest = &self.bytes[self.pos..];
        let end = memchr(b'\n', rest).unwrap_or(rest.len());

        let text_end = if end > 0 && rest[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        let raw = &rest[..text_end];
        let line = match std::str::from_utf8(raw) {
            Ok(text) => text.to_owned(),
            Err(_) => {
                let mut inner = Cursor::new(raw);
                std::iter::from_fn(|| inner.get()).collect()
            }
        };

        if end < rest.len() {
            self.pos += end + 1;
            self.line += 1;
            self.column = 1;
        } else {
            self.pos += end;
            self.column += end as u32;
        }
        Some(line)
    }
}

/// Decode one code point from the front of `bytes`.
///
/// Invalid or truncated sequences decode as U+FFFD with a width of one byte.
#[inline(always)]
fn decode(bytes: &[u8]) -> Option<(char, usize)> {
    let &first = bytes.first()?;

    if first.is_ascii() {
        return Some((first as char, 1));
    }

    let width = match first {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Some((char::REPLACEMENT_CHARACTER, 1)),
    };

    if bytes.len() < width {
        return Some((char::REPLACEMENT_CHARACTER, 1));
    }

    match std::str::from_utf8(&bytes[..width]) {
        Ok(s) => s.chars().next().map(|c| (c, width)),
        Err(_) => Some((char::REPLACEMENT_CHARACTER, 1)),
    }
}
