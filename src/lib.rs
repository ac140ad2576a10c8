//! linesel: interactive line selector
//!
//! Reads lines from stdin, filters them as the user types, and hands the
//! chosen line back to the caller. Matching and interaction state are pure;
//! terminal access lives in `view`.

pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod source;
pub mod state;
pub mod view;
