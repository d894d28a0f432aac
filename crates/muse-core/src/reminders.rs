//! Reminder digest construction
//!
//! Pure helpers shared by the scheduler task and the manual test-send
//! endpoint. Grouping and formatting happen here; querying and delivery stay
//! with the callers.

use crate::models::ContentItem;
use crate::time::format_utc_z;

/// Subject line for reminder digests
pub const DIGEST_SUBJECT: &str = "Muse reminder: upcoming scheduled posts";

/// Items for one user's digest, in schedule order
#[derive(Debug, Clone)]
pub struct DigestPlan {
    pub user_id: i64,
    pub items: Vec<ContentItem>,
}

/// Group a user-ordered item list into per-user digest plans
///
/// Input must already be sorted by user id (the reminder query orders by
/// user, then schedule time); each run of equal user ids becomes one plan.
pub fn group_by_user(items: Vec<ContentItem>) -> Vec<DigestPlan> {
    let mut plans: Vec<DigestPlan> = Vec::new();
    for item in items {
        match plans.last_mut() {
            Some(plan) if plan.user_id == item.user_id => plan.items.push(item),
            _ => plans.push(DigestPlan {
                user_id: item.user_id,
                items: vec![item],
            }),
        }
    }
    plans
}

fn format_line(item: &ContentItem) -> Option<String> {
    let when = item.scheduled_time?;
    Some(format!(
        "- {} ({}) at {}",
        item.title,
        item.platform,
        format_utc_z(when)
    ))
}

/// Plain-text digest body for the scheduled reminder email
pub fn digest_body(items: &[ContentItem]) -> String {
    let mut lines = vec![
        "Heads up! You have posts scheduled in the next 24 hours:".to_string(),
        String::new(),
    ];
    lines.extend(items.iter().filter_map(format_line));
    lines.push(String::new());
    lines.push("Open the Muse calendar to review or adjust.".to_string());
    lines.join("\n")
}

/// Body for the manual test-send endpoint
pub fn preview_body(items: &[ContentItem]) -> String {
    if items.is_empty() {
        return "No upcoming scheduled posts found. Schedule one and try again.".to_string();
    }
    let mut lines = vec!["Your next scheduled posts:".to_string(), String::new()];
    lines.extend(items.iter().filter_map(format_line));
    lines.join("\n")
}
