//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod auth;
pub mod calendar;
pub mod content;
pub mod export;
pub mod insights;
pub mod library;
pub mod reminders;
pub mod uploads;

// Re-export all handlers for use in router
pub use auth::*;
pub use calendar::*;
pub use content::*;
pub use export::*;
pub use insights::*;
pub use library::*;
pub use reminders::*;
pub use uploads::*;
