//! Domain model types (pure).
//!
//! All types in this module are plain data shared by the controller, the
//! key bindings and `main`.

pub mod action;
pub mod error;
pub mod key_action;

// Re-export for convenience
pub use action::{Action, ActionName, Selection};
pub use error::{AppError, InputError};
pub use key_action::KeyAction;
