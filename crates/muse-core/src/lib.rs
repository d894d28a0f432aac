//! Muse Core Library
//!
//! Shared functionality for the Muse content planner:
//! - Database access and migrations (users, sessions, content, library)
//! - The insights aggregator (weekly series, platform breakdown, latency)
//! - Reminder digest construction
//! - Pluggable mail delivery (HTTP mail API)
//! - Content CSV export
//! - Schedule-time parsing helpers

pub mod db;
pub mod error;
pub mod export;
pub mod insights;
pub mod mail;
pub mod models;
pub mod reminders;
pub mod time;

pub use db::Database;
pub use error::{Error, Result};
pub use insights::{compute_insights, week_floor};
pub use mail::{HttpMailer, Mailer};
pub use models::{
    CalendarEvent, ContentItem, ContentStatus, ContentUpdate, InsightsReport, LibraryItem,
    NewContentItem, NewLibraryItem, PlatformBucket, User, WeekSummary, WeeklyBucket,
};
pub use reminders::{digest_body, preview_body, DigestPlan, DIGEST_SUBJECT};
