//! Core module - settings, persistence, logging and core errors
//!
//! - [`GameSettings`] - user preferences (clock, AI strength, side, name)
//! - [`settings_persistence`] - JSON load/save of [`GameSettings`]
//! - [`logging`] - tracing subscriber installation
//! - [`CoreError`] - errors from the above

pub mod error;
pub mod logging;
pub mod resources;
pub mod settings_persistence;

// Re-export commonly used items
pub use error::{CoreError, CoreResult};
pub use resources::*;
