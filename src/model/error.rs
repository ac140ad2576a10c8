//! Error types for linesel.
//!
//! Errors are `thiserror` enums, one per concern, composed into [`AppError`]
//! through `From` conversions so that `?` carries them to `main`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`InputError`] - stdin reading failures
//!   - [`ConfigError`] - configuration file and value failures
//!   - [`LoggingError`] - log file setup failures (reported, never fatal)
//!   - [`TuiError`] - terminal acquisition and drawing failures
//!   - `std::io::Error` - writing the selection to stdout
//!
//! # Recovery Strategy
//!
//! Malformed input bytes are never an error: they decode to U+FFFD. Everything
//! that reaches `AppError` ends the run with exit code 2 after the terminal
//! has been restored.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use linesel::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _lines = read_input()?;
///     Ok(())
/// }
/// # fn read_input() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or contains an invalid value.
    ///
    /// **Recovery**: None. The message names the offending key or file.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Failed to read the candidate lines.
    #[error("{0}")]
    Input(#[from] InputError),

    /// Log file setup failed.
    ///
    /// Only used for reporting; `main` continues without logging.
    #[error("Logging disabled: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal setup, event reading or drawing failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),

    /// Writing the selection to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Errors encountered when reading candidate lines from stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// Stdin is an interactive terminal, so there is nothing to select from.
    ///
    /// **When this occurs**: At startup, when `linesel` is run without a pipe.
    ///
    /// **Recovery**: Exit with status 2; the message shows the expected usage.
    ///
    /// # Examples
    ///
    /// ```
    /// use linesel::model::error::InputError;
    ///
    /// let msg = InputError::NoInput.to_string();
    /// assert!(msg.contains("pipe"));
    /// ```
    #[error("No input: pipe the lines to select from into stdin")]
    NoInput,

    /// Reading stdin failed.
    ///
    /// Decoding problems never end up here; only OS-level read failures do.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
