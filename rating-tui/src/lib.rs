//! rating-tui library
//!
//! Exports the app model, key mapping and rendering for testing.

pub mod app;
pub mod error;
pub mod event;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{map_key, App, Input, UiConfig};
pub use error::{Result, TuiError};
