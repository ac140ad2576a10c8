//! Line input.
//!
//! This module owns the line store the rest of the application reads from:
//! - Decoding raw bytes with a replacement policy (never fails)
//! - Optional stripping of colour escapes
//! - Splitting on `\n`, `\r\n` and `\r`
//! - Deduplication that keeps the first occurrence

use std::collections::HashSet;

pub mod encoding;
pub mod stdin;

pub use encoding::{split_lines, strip_ansi_escapes, TextEncoding, REPLACEMENT_CHAR};
pub use stdin::{read_lines, read_stdin_lines};

/// How raw input bytes are turned into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Encoding used to decode the input.
    pub encoding: TextEncoding,
    /// Strip terminal colour escapes before splitting.
    pub strip_ansi: bool,
}

/// Ordered, deduplicated, immutable sequence of input lines.
///
/// # Invariants
///
/// - No two stored lines have equal text; the first occurrence wins.
/// - Indices are dense (`0..count()`) and never change after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<String>,
}

impl LineStore {
    /// Build a store from already split lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for line in lines {
            let line = line.into();
            if seen.insert(line.clone()) {
                unique.push(line);
            }
        }

        Self { lines: unique }
    }

    /// Decode, split and deduplicate raw input.
    pub fn load(raw: &[u8], options: LoadOptions) -> Self {
        let decoded = options.encoding.decode(raw);
        let text = if options.strip_ansi {
            strip_ansi_escapes(&decoded).into_owned()
        } else {
            decoded.into_owned()
        };

        Self::from_lines(split_lines(&text))
    }

    /// Number of unique lines.
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    /// True when the input contained no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of the line at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`. Indices come from the store itself,
    /// so an out-of-range index is a logic error in the caller.
    #[track_caller]
    pub fn get(&self, index: usize) -> &str {
        &self.lines[index]
    }

    /// `(index, text)` pairs in store order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.lines.iter().map(String::as_str).enumerate()
    }
}
