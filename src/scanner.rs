//! Line scanning for RWL text.
//!
//! Splits raw bytes into trimmed, non-blank lines and repairs rows where a
//! long series name runs straight into the year column.

use std::borrow::Cow;

use crate::constants::SEPARATOR_INDEX;

/// One non-blank physical line of an RWL file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// 1-based physical line number
    pub number: usize,
    /// Trimmed text with the name/year separator restored
    pub text: String,
}

impl ScannedLine {
    /// Whitespace separated fields
    pub fn fields(&self) -> std::str::SplitWhitespace<'_> {
        self.text.split_whitespace()
    }

    /// First field, normally the series name
    #[must_use]
    pub fn leading_token(&self) -> Option<&str> {
        self.fields().next()
    }
}

/// Scan `bytes` into lines
///
/// The returned iterator is lazy; scanning again starts from the beginning.
#[must_use]
pub fn scan(bytes: &[u8]) -> Lines<'_> {
    Lines {
        buf: bytes,
        pos: 0,
        number: 0,
    }
}

/// Iterator returned by [`scan`]
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    buf: &'a [u8],
    pos: usize,
    number: usize,
}

impl<'a> Lines<'a> {
    /// Next raw physical line; accepts `\r\n`, `\n` and lone `\r`
    fn next_raw(&mut self) -> Option<&'a [u8]> {
        let buf = self.buf;
        if self.pos >= buf.len() {
            return None;
        }
        let rest = &buf[self.pos..];
        match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                let mut advance = end + 1;
                if rest[end] == b'\r' && rest.get(end + 1) == Some(&b'\n') {
                    advance += 1;
                }
                self.pos += advance;
                Some(&rest[..end])
            }
            None => {
                self.pos = buf.len();
                Some(rest)
            }
        }
    }
}

impl Iterator for Lines<'_> {
    type Item = ScannedLine;

    fn next(&mut self) -> Option<ScannedLine> {
        loop {
            let raw = self.next_raw()?;
            self.number += 1;
            let text = String::from_utf8_lossy(raw);
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(ScannedLine {
                number: self.number,
                text: repair_separator(trimmed).into_owned(),
            });
        }
    }
}

/// Insert a space after the 8th character when it is not already a space
///
/// Some writers let an 8 character name touch the year, e.g.
/// `ABCDEFGH1950`; this turns it into `ABCDEFGH 1950`.
#[must_use]
pub fn repair_separator(line: &str) -> Cow<'_, str> {
    let mut chars = line.char_indices().skip(SEPARATOR_INDEX);
    let Some((_, c)) = chars.next() else {
        return Cow::Borrowed(line);
    };
    let Some((split, _)) = chars.next() else {
        return Cow::Borrowed(line);
    };
    if c == ' ' {
        return Cow::Borrowed(line);
    }
    let mut fixed = String::with_capacity(line.len() + 1);
    fixed.push_str(&line[..split]);
    fixed.push(' ');
    fixed.push_str(&line[split..]);
    Cow::Owned(fixed)
}
