//! Input cursor shared by every scan stage.
//!
//! All delimiter matching goes through [`scan_until`], which owns the escape
//! rule: a backslash shields the character after it from being taken as the
//! stop character. The backslash stays in the returned text; nothing is
//! unescaped.

use crate::constants::ESCAPE_CHAR;

/// Returns the text before the first unescaped `stop` in `input`.
///
/// Returns `None` when `stop` never occurs, or when the input ends on an
/// escape character with nothing left to protect.
pub(crate) fn scan_until(input: &str, stop: char) -> Option<&str> {
    let mut chars = input.char_indices();

    while let Some((idx, c)) = chars.next() {
        if c == stop {
            return Some(&input[..idx]);
        }
        if c == ESCAPE_CHAR {
            chars.next()?;
        }
    }

    None
}

/// Splits `input` around the first unescaped `stop`.
///
/// The stop character itself belongs to neither half.
pub(crate) fn split_once_unescaped(input: &str, stop: char) -> Option<(&str, &str)> {
    let head = scan_until(input, stop)?;
    Some((head, &input[head.len() + stop.len_utf8()..]))
}

/// A forward-only position over validated UTF-8 input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the unconsumed input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Moves forward by `len` bytes, clamped to the end of input.
    ///
    /// Callers only pass lengths of slices taken from [`Self::rest`] or of
    /// whole characters, so the new position stays on a char boundary.
    pub(crate) fn advance(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.input.len());
    }

    /// Consumes the next character if it equals `expected`.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance(expected.len_utf8());
            true
        } else {
            false
        }
    }

    /// Consumes `prefix` if the unconsumed input starts with it.
    pub(crate) fn eat_str(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.advance(prefix.len());
            true
        } else {
            false
        }
    }

    /// Returns the text before the next unescaped `stop` without consuming it.
    pub(crate) fn scan_until(&self, stop: char) -> Option<&'a str> {
        scan_until(self.rest(), stop)
    }

    /// Consumes and returns the text before the next unescaped `stop`,
    /// along with the stop character itself.
    pub(crate) fn take_through(&mut self, stop: char) -> Option<&'a str> {
        let head = self.scan_until(stop)?;
        self.advance(head.len() + stop.len_utf8());
        Some(head)
    }

    /// Consumes and returns everything that is left.
    pub(crate) fn take_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.pos = self.input.len();
        rest
    }
}
