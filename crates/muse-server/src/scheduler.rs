//! Background task scheduler for reminder digests
//!
//! Optional scheduled reminder emails, enabled via environment variables:
//!
//! - `MUSE_REMINDER_SCHEDULE`: Interval in minutes (e.g., "15")
//! - `MUSE_REMINDER_LOOKAHEAD_HOURS`: How far ahead to look for scheduled
//!   posts (default: 24)
//!
//! The scheduler is stateless: each tick runs one pass over the database and
//! the injected mailer. Nothing is kept between runs, so the same pass can be
//! driven manually from the CLI.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::time::interval;
use tracing::{error, info, warn};

use muse_core::mail::Mailer;
use muse_core::reminders::{digest_body, group_by_user, DIGEST_SUBJECT};
use muse_core::Database;

/// Configuration for scheduled reminders
#[derive(Debug, Clone)]
pub struct ReminderScheduleConfig {
    /// Interval between passes in minutes
    pub interval_minutes: u64,
    /// Size of the upcoming-post window in hours
    pub lookahead_hours: i64,
}

impl ReminderScheduleConfig {
    /// Parse configuration from environment variables
    ///
    /// Returns None if scheduling is not configured (MUSE_REMINDER_SCHEDULE
    /// not set)
    pub fn from_env() -> Option<Self> {
        let interval_minutes: u64 = std::env::var("MUSE_REMINDER_SCHEDULE")
            .ok()
            .and_then(|s| s.parse().ok())?;

        if interval_minutes == 0 {
            warn!("MUSE_REMINDER_SCHEDULE is 0, reminder emails disabled");
            return None;
        }

        let lookahead_hours = std::env::var("MUSE_REMINDER_LOOKAHEAD_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24);

        Some(Self {
            interval_minutes,
            lookahead_hours,
        })
    }
}

/// Start the reminder scheduler as a background task
///
/// Spawns a tokio task that runs indefinitely, sending digests at the
/// configured interval.
pub fn start_reminder_scheduler(
    db: Database,
    mailer: Arc<dyn Mailer>,
    config: ReminderScheduleConfig,
) {
    info!(
        "Starting reminder scheduler: every {} minutes, {}h lookahead",
        config.interval_minutes, config.lookahead_hours
    );

    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(config.interval_minutes * 60));

        // Skip the first immediate tick - we don't want to email on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let now = chrono::Utc::now().naive_utc();
            match run_reminder_pass(&db, mailer.as_ref(), now, config.lookahead_hours).await {
                Ok(sent) if sent > 0 => {
                    info!("Reminder pass complete: {} digest(s) sent", sent);
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Reminder pass failed: {}", e);
                }
            }
        }
    });
}

/// Run a single reminder pass
///
/// Collects Scheduled items inside `[now, now + lookahead]`, groups them per
/// user, and sends one digest per opted-in user. A delivery failure is logged
/// and does not abort the rest of the pass. Returns the number of digests
/// sent.
pub async fn run_reminder_pass(
    db: &Database,
    mailer: &dyn Mailer,
    now: NaiveDateTime,
    lookahead_hours: i64,
) -> muse_core::Result<usize> {
    let window_end = now + chrono::Duration::hours(lookahead_hours);
    let upcoming = db.list_upcoming_scheduled(now, window_end)?;

    let mut sent = 0;
    for plan in group_by_user(upcoming) {
        // Skip if user missing or opted out of reminders.
        let user = match db.get_user(plan.user_id)? {
            Some(user) if user.reminders_enabled => user,
            _ => continue,
        };

        let body = digest_body(&plan.items);
        match mailer.send(&user.email, DIGEST_SUBJECT, &body).await {
            Ok(()) => {
                info!(to = %user.email, items = plan.items.len(), "Reminder digest sent");
                sent += 1;
            }
            Err(e) => {
                // Log and continue; one bad address must not starve the rest.
                error!(to = %user.email, error = %e, "Failed to send reminder digest");
            }
        }
    }

    Ok(sent)
}
