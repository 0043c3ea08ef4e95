//! Fixed-capacity text helpers
//!
//! `heapless::String::push_str` refuses a string that does not fit as a
//! whole. Reports and shadow documents are instead cut at the capacity,
//! on the last whole UTF-8 character, and these helpers do that cutting.

use core::fmt;

use heapless::String;

/// Longest prefix of `text` no longer than `max` bytes that ends on a char
/// boundary.
pub fn floor_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Copy `text` into a bounded string, truncating when it does not fit.
///
/// Returns the string and whether anything was cut.
pub fn truncate_into<const N: usize>(text: &str) -> (String<N>, bool) {
    let mut writer = TruncatingWriter::<N>::new();
    // Never errors: the writer truncates instead
    let _ = fmt::Write::write_str(&mut writer, text);
    let truncated = writer.truncated();
    (writer.into_inner(), truncated)
}

/// `fmt::Write` sink that keeps what fits and drops the rest
///
/// Writing never fails, so a `write!` into it always runs to completion and
/// the output is simply the first `N` bytes of what would have been written.
#[derive(Debug, Default)]
pub struct TruncatingWriter<const N: usize> {
    buffer: String<N>,
    truncated: bool,
}

impl<const N: usize> TruncatingWriter<N> {
    /// Empty writer.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            truncated: false,
        }
    }

    /// Whether any input was dropped.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Written text.
    pub fn into_inner(self) -> String<N> {
        self.buffer
    }
}

impl<const N: usize> fmt::Write for TruncatingWriter<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        let room = N - self.buffer.len();
        let fitting = floor_char_boundary(s, room);
        if fitting.len() < s.len() {
            self.truncated = true;
        }
        // Fits by construction
        let _ = self.buffer.push_str(fitting);
        Ok(())
    }
}
