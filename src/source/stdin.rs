//! Stdin-based line source for piped input.
//!
//! The whole stream is read before the UI starts; the selector needs every
//! candidate up front, so there is no incremental polling.

use super::{LineStore, LoadOptions};
use crate::model::error::InputError;
use std::io::{IsTerminal, Read};
use tracing::debug;

/// Read all of stdin into a [`LineStore`].
///
/// # Errors
///
/// Returns `InputError::NoInput` if stdin is a TTY (interactive terminal).
/// This prevents the selector from blocking on the keyboard when the user
/// forgot to pipe data.
/// Returns `InputError::Io` for read failures.
pub fn read_stdin_lines(options: LoadOptions) -> Result<LineStore, InputError> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(InputError::NoInput);
    }

    read_lines(stdin.lock(), options)
}

/// Read all bytes from `reader` into a [`LineStore`].
///
/// # Errors
///
/// Returns `InputError::Io` for read failures. Undecodable bytes are never
/// an error.
pub fn read_lines<R: Read>(mut reader: R, options: LoadOptions) -> Result<LineStore, InputError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;

    debug!(
        bytes = raw.len(),
        encoding = %options.encoding,
        strip_ansi = options.strip_ansi,
        "Read raw input"
    );

    Ok(LineStore::load(&raw, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TextEncoding;
    use std::io;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("broken pipe"))
        }
    }

    #[test]
    fn read_lines_builds_store_from_reader() {
        let data = b"line1\nline2\nline1\n";
        let store = read_lines(&data[..], LoadOptions::default()).unwrap();

        assert_eq!(store.count(), 2);
        assert_eq!(store.get(0), "line1");
        assert_eq!(store.get(1), "line2");
    }

    #[test]
    fn read_lines_handles_empty_input() {
        let data = b"";
        let store = read_lines(&data[..], LoadOptions::default()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn read_lines_applies_encoding() {
        let data = b"caf\xE9";
        let options = LoadOptions {
            encoding: TextEncoding::Latin1,
            strip_ansi: false,
        };
        let store = read_lines(&data[..], options).unwrap();
        assert_eq!(store.get(0), "café");
    }

    #[test]
    fn read_lines_propagates_io_errors() {
        let result = read_lines(FailingReader, LoadOptions::default());
        assert!(
            matches!(result, Err(InputError::Io(_))),
            "Expected Io error, got: {:?}",
            result
        );
    }

    #[test]
    fn no_input_error_message_is_user_friendly() {
        // A piped or inherited stdin would be read to EOF and could block.
        if !std::io::stdin().is_terminal() {
            return;
        }

        let msg = read_stdin_lines(LoadOptions::default())
            .unwrap_err()
            .to_string();
        assert!(
            msg.contains("No input"),
            "Error message should mention missing input, got: {}",
            msg
        );
    }
}
