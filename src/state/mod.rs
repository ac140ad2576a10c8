//! Selection state machine (pure).
//!
//! All state transitions are plain methods testable without a terminal;
//! drawing goes through the `ScreenSurface` trait.

pub mod controller;
pub mod query_edit;

// Re-export for convenience
pub use controller::{format_count, Controller, ControllerOptions, RESERVED_ROWS};
pub use query_edit::strip_last_word;
