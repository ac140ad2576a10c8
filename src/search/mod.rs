//! Incremental substring matching.
//!
//! A query is split into whitespace-delimited terms; a line matches when
//! every term occurs in it as a literal substring. Each result carries the
//! character ranges to highlight, merged into maximal runs.

use crate::source::LineStore;
use std::iter::FusedIterator;

// ===== HighlightRange =====

/// Half-open character range `[start, end)` within a line.
///
/// Offsets count `char`s, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HighlightRange {
    /// First highlighted character.
    pub start: usize,
    /// One past the last highlighted character.
    pub end: usize,
}

impl HighlightRange {
    /// Range `[start, end)`; `start` must be below `end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "empty highlight range {start}..{end}");
        Self { start, end }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the range covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

// ===== MatchResult =====

/// A matching line and the ranges to highlight in it.
///
/// Ranges are ascending, disjoint and never touching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Index of the line in its store.
    pub line_index: usize,
    /// Characters to highlight.
    pub ranges: Vec<HighlightRange>,
}

// ===== QueryTerms =====

/// A parsed query: its terms and the case policy derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerms {
    terms: Vec<Vec<char>>,
    ignore_case: bool,
}

impl QueryTerms {
    /// Split `query` on whitespace.
    ///
    /// An all-lowercase query matches case-insensitively; a query containing
    /// any uppercase character is matched exactly.
    pub fn parse(query: &str) -> Self {
        Self {
            terms: query
                .split_whitespace()
                .map(|term| term.chars().collect())
                .collect(),
            ignore_case: query == query.to_lowercase(),
        }
    }

    /// True when the query has no terms and therefore matches everything.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether matching ignores case.
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Match one line. `None` when any term is absent.
    pub fn match_line(&self, line: &str) -> Option<Vec<HighlightRange>> {
        if self.terms.is_empty() {
            return Some(Vec::new());
        }

        let haystack: Vec<char> = if self.ignore_case {
            line.chars().map(lowercase_char).collect()
        } else {
            line.chars().collect()
        };
        let mut marks = vec![false; haystack.len()];

        for term in &self.terms {
            let mut from = 0;
            let mut found = false;
            while let Some(pos) = find_from(&haystack, term, from) {
                found = true;
                marks[pos..pos + term.len()].fill(true);
                from = pos + term.len();
            }
            if !found {
                return None;
            }
        }

        Some(mark_runs(&marks))
    }
}

/// Lowercase a single char without changing the char count of the line.
///
/// Characters whose lowercase form expands to several chars keep only the
/// first, so highlight offsets stay aligned with the original text.
fn lowercase_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

/// Compress a mark bitmap into maximal runs.
fn mark_runs(marks: &[bool]) -> Vec<HighlightRange> {
    let mut ranges = Vec::new();
    let mut run_start = None;

    for (index, &marked) in marks.iter().enumerate() {
        match (marked, run_start) {
            (true, None) => run_start = Some(index),
            (false, Some(start)) => {
                ranges.push(HighlightRange::new(start, index));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        ranges.push(HighlightRange::new(start, marks.len()));
    }

    ranges
}

// ===== Search Execution =====

/// Lazily match `query` against every line of `store`, in index order.
///
/// Lines are only examined as results are pulled, so taking the first N
/// results never looks past the N-th match.
pub fn search<'a>(store: &'a LineStore, query: &str) -> Matches<'a> {
    Matches {
        store,
        terms: QueryTerms::parse(query),
        next_index: 0,
    }
}

/// Iterator returned by [`search`].
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    store: &'a LineStore,
    terms: QueryTerms,
    next_index: usize,
}

impl Matches<'_> {
    /// Number of lines examined so far.
    pub fn lines_scanned(&self) -> usize {
        self.next_index
    }
}

impl Iterator for Matches<'_> {
    type Item = MatchResult;

    fn next(&mut self) -> Option<MatchResult> {
        while self.next_index < self.store.count() {
            let line_index = self.next_index;
            self.next_index += 1;

            if let Some(ranges) = self.terms.match_line(self.store.get(line_index)) {
                return Some(MatchResult { line_index, ranges });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.store.count() - self.next_index))
    }
}

impl FusedIterator for Matches<'_> {}

// ===== LineMatcher =====

/// Search strategy injected into the controller.
pub trait LineMatcher {
    /// Lazily yield the lines of `store` matching `query`, in store order.
    fn search<'a>(
        &self,
        store: &'a LineStore,
        query: &str,
    ) -> Box<dyn Iterator<Item = MatchResult> + 'a>;
}

/// Literal multi-term substring matching via [`search`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl LineMatcher for SubstringMatcher {
    fn search<'a>(
        &self,
        store: &'a LineStore,
        query: &str,
    ) -> Box<dyn Iterator<Item = MatchResult> + 'a> {
        Box::new(search(store, query))
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
