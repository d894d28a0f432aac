//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, status) and shared utilities (open_db)
//! - `export` - Content CSV export
//! - `remind` - Manual reminder pass
//! - `serve` - Web server command
//! - `users` - User management commands (list, add)

pub mod core;
pub mod export;
pub mod remind;
pub mod serve;
pub mod users;

// Re-export command functions for main.rs
pub use core::*;
pub use export::*;
pub use remind::*;
pub use serve::*;
pub use users::*;
