//! Pure query editing operations.

/// Remove the last word of `query`.
///
/// Trailing whitespace is ignored, then everything after the last space is
/// dropped. A single trailing space is kept when anything remains, so the
/// next typed character starts a new term.
pub fn strip_last_word(query: &str) -> String {
    let trimmed = query.trim_end();
    match trimmed.rfind(' ') {
        Some(pos) => format!("{} ", &trimmed[..pos]),
        None => String::new(),
    }
}

/// Remove the last character of `query`. Returns false if it was empty.
pub fn delete_last_char(query: &mut String) -> bool {
    query.pop().is_some()
}

/// Whether `c` may be appended to the query.
pub fn is_insertable(c: char) -> bool {
    !c.is_control()
}
