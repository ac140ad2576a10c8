//! Byte decoding and line splitting for raw input.
//!
//! Decoding never fails: byte sequences that are invalid in the selected
//! encoding are replaced by U+FFFD.

use std::borrow::Cow;
use std::fmt;

/// Placeholder substituted for undecodable input.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Text encoding used to decode stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// UTF-8. Each maximal invalid subsequence becomes one replacement char.
    #[default]
    Utf8,
    /// 7-bit ASCII. Every byte >= 0x80 becomes one replacement char.
    Ascii,
    /// ISO-8859-1. Every byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    /// Look up an encoding by name.
    ///
    /// Matching is case-insensitive and accepts the common aliases
    /// (`utf8`, `us-ascii`, `latin1`, `iso-8859-1`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "ascii" | "us-ascii" => Some(Self::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Some(Self::Latin1),
            _ => None,
        }
    }

    /// Canonical name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
        }
    }

    /// Decode bytes, substituting [`REPLACEMENT_CHAR`] for invalid input.
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes),
            Self::Ascii => match std::str::from_utf8(bytes) {
                Ok(text) if bytes.is_ascii() => Cow::Borrowed(text),
                _ => Cow::Owned(
                    bytes
                        .iter()
                        .map(|&b| if b.is_ascii() { b as char } else { REPLACEMENT_CHAR })
                        .collect(),
                ),
            },
            Self::Latin1 => match std::str::from_utf8(bytes) {
                Ok(text) if bytes.is_ascii() => Cow::Borrowed(text),
                _ => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
            },
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Split text on `\n`, `\r\n` and `\r`.
///
/// A terminator at the very end does not produce a trailing empty line.
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: text }
}

/// Iterator returned by [`split_lines`].
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(|c: char| c == '\n' || c == '\r') {
            Some(pos) => {
                let line = &self.rest[..pos];
                let terminator = if self.rest[pos..].starts_with("\r\n") {
                    2
                } else {
                    1
                };
                self.rest = &self.rest[pos + terminator..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

impl std::iter::FusedIterator for SplitLines<'_> {}

/// Remove terminal colour escapes.
///
/// Handles CSI sequences (`ESC [ params final`), OSC sequences terminated by
/// BEL or `ESC \`, and two-character `ESC x` sequences.
pub fn strip_ansi_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains('\u{1b}') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\u{1b}' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('[') => {
                for seq_char in chars.by_ref() {
                    if is_csi_final_byte(seq_char) {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(seq_char) = chars.next() {
                    if seq_char == '\u{7}' {
                        break;
                    }
                    if seq_char == '\u{1b}' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            // Two-character escape (or a trailing ESC): drop it.
            Some(_) | None => {}
        }
    }

    Cow::Owned(out)
}

fn is_csi_final_byte(ch: char) -> bool {
    ('\u{40}'..='\u{7e}').contains(&ch)
}
