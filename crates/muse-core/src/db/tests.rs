//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn new_item(title: &str, status: ContentStatus, scheduled: Option<NaiveDateTime>) -> NewContentItem {
        NewContentItem {
            title: title.to_string(),
            platform: "Instagram".to_string(),
            scheduled_time: scheduled,
            status,
            details: String::new(),
            thumbnail_url: None,
        }
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_users().unwrap().is_empty());
    }

    #[test]
    fn test_create_user_and_authenticate() {
        let db = Database::in_memory().unwrap();

        let user = db.create_user("maya", "maya@example.com", "pw123").unwrap();
        assert!(user.id > 0);
        assert!(user.reminders_enabled);
        // Never the raw password, always a PHC string.
        assert!(user.password_hash.starts_with("$argon2"));

        assert!(db.authenticate("maya", "pw123").unwrap().is_some());
        assert!(db.authenticate("maya", "wrong").unwrap().is_none());
        assert!(db.authenticate("nobody", "pw123").unwrap().is_none());
    }

    #[test]
    fn test_create_user_validation() {
        let db = Database::in_memory().unwrap();

        assert!(matches!(
            db.create_user("", "a@b.com", "pw"),
            Err(crate::error::Error::InvalidData(_))
        ));
        assert!(matches!(
            db.create_user("maya", "not-an-email", "pw"),
            Err(crate::error::Error::InvalidData(_))
        ));

        db.create_user("maya", "maya@example.com", "pw").unwrap();
        // Duplicate name and duplicate email both collide.
        assert!(matches!(
            db.create_user("maya", "other@example.com", "pw"),
            Err(crate::error::Error::Conflict(_))
        ));
        assert!(matches!(
            db.create_user("other", "maya@example.com", "pw"),
            Err(crate::error::Error::Conflict(_))
        ));
    }

    #[test]
    fn test_email_normalized_to_lowercase() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("maya", "Maya@Example.COM", "pw").unwrap();
        assert_eq!(user.email, "maya@example.com");
    }

    #[test]
    fn test_session_lifecycle() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("maya", "maya@example.com", "pw").unwrap();
        let now = at(2025, 6, 9, 12, 0);

        let token = db.create_session(user.id, now).unwrap();
        assert!(!token.is_empty());

        let resolved = db.session_user(&token, now).unwrap().unwrap();
        assert_eq!(resolved.id, user.id);

        // Unknown token resolves to nothing.
        assert!(db.session_user("bogus", now).unwrap().is_none());

        // Expired sessions stop resolving and can be purged.
        let later = now + Duration::days(SESSION_TTL_DAYS + 1);
        assert!(db.session_user(&token, later).unwrap().is_none());
        assert_eq!(db.purge_expired_sessions(later).unwrap(), 1);

        // Logout revokes immediately.
        let token2 = db.create_session(user.id, now).unwrap();
        db.delete_session(&token2).unwrap();
        assert!(db.session_user(&token2, now).unwrap().is_none());
    }

    #[test]
    fn test_content_crud() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("maya", "maya@example.com", "pw").unwrap();

        let created = db
            .create_content(
                user.id,
                &new_item("Launch teaser", ContentStatus::Idea, None),
            )
            .unwrap();
        assert_eq!(created.title, "Launch teaser");
        assert_eq!(created.status, ContentStatus::Idea);
        assert!(created.scheduled_time.is_none());

        let listed = db.list_content(user.id).unwrap();
        assert_eq!(listed.len(), 1);

        db.delete_content(user.id, created.id).unwrap();
        assert!(db.list_content(user.id).unwrap().is_empty());
        assert!(db.delete_content(user.id, created.id).is_err());
    }

    #[test]
    fn test_content_requires_title() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("maya", "maya@example.com", "pw").unwrap();
        assert!(matches!(
            db.create_content(user.id, &new_item("   ", ContentStatus::Idea, None)),
            Err(crate::error::Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_content_ownership_scoping() {
        let db = Database::in_memory().unwrap();
        let maya = db.create_user("maya", "maya@example.com", "pw").unwrap();
        let noah = db.create_user("noah", "noah@example.com", "pw").unwrap();

        let item = db
            .create_content(maya.id, &new_item("Private", ContentStatus::Idea, None))
            .unwrap();

        // Another user's queries cannot see or touch it.
        assert!(db.get_content(noah.id, item.id).unwrap().is_none());
        assert!(db.list_content(noah.id).unwrap().is_empty());
        assert!(db.delete_content(noah.id, item.id).is_err());
        assert!(db
            .update_content(
                noah.id,
                item.id,
                &ContentUpdate {
                    title: Some("Hijacked".to_string()),
                    ..Default::default()
                }
            )
            .is_err());
    }

    #[test]
    fn test_partial_update() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("maya", "maya@example.com", "pw").unwrap();
        let when = at(2025, 6, 10, 9, 0);
        let item = db
            .create_content(user.id, &new_item("Post", ContentStatus::Idea, Some(when)))
            .unwrap();

        // Only status changes; everything else stays.
        let updated = db
            .update_content(
                user.id,
                item.id,
                &ContentUpdate {
                    status: Some(ContentStatus::Scheduled),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, ContentStatus::Scheduled);
        assert_eq!(updated.title, "Post");
        assert_eq!(updated.scheduled_time, Some(when));

        // Clearing the schedule via Some(None).
        let cleared = db
            .update_content(
                user.id,
                item.id,
                &ContentUpdate {
                    scheduled_time: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(cleared.scheduled_time.is_none());

        // Empty title is rejected.
        assert!(db
            .update_content(
                user.id,
                item.id,
                &ContentUpdate {
                    title: Some("  ".to_string()),
                    ..Default::default()
                }
            )
            .is_err());
    }

    #[test]
    fn test_calendar_events_filtering() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("maya", "maya@example.com", "pw").unwrap();
        let earlier = at(2025, 6, 10, 9, 0);
        let later = at(2025, 6, 11, 9, 0);

        db.create_content(user.id, &new_item("B", ContentStatus::Scheduled, Some(later)))
            .unwrap();
        db.create_content(user.id, &new_item("A", ContentStatus::Posted, Some(earlier)))
            .unwrap();
        // Neither of these may appear: one has no time, one is a raw idea.
        db.create_content(user.id, &new_item("No time", ContentStatus::Posted, None))
            .unwrap();
        db.create_content(user.id, &new_item("Idea", ContentStatus::Idea, Some(earlier)))
            .unwrap();

        let events = db.list_calendar_events(user.id).unwrap();
        assert_eq!(events.len(), 2);
        // Chronological, not insertion, order.
        assert_eq!(events[0].title, "A");
        assert_eq!(events[1].title, "B");
        assert_eq!(events[0].start, earlier);
    }

    #[test]
    fn test_upcoming_scheduled_window() {
        let db = Database::in_memory().unwrap();
        let maya = db.create_user("maya", "maya@example.com", "pw").unwrap();
        let noah = db.create_user("noah", "noah@example.com", "pw").unwrap();
        let now = at(2025, 6, 9, 12, 0);

        db.create_content(
            maya.id,
            &new_item("Soon", ContentStatus::Scheduled, Some(now + Duration::hours(2))),
        )
        .unwrap();
        db.create_content(
            noah.id,
            &new_item("Also soon", ContentStatus::Scheduled, Some(now + Duration::hours(20))),
        )
        .unwrap();
        // Outside the window or wrong status:
        db.create_content(
            maya.id,
            &new_item("Too far", ContentStatus::Scheduled, Some(now + Duration::hours(48))),
        )
        .unwrap();
        db.create_content(
            maya.id,
            &new_item("Past", ContentStatus::Scheduled, Some(now - Duration::hours(1))),
        )
        .unwrap();
        db.create_content(
            maya.id,
            &new_item("Posted", ContentStatus::Posted, Some(now + Duration::hours(3))),
        )
        .unwrap();

        let upcoming = db
            .list_upcoming_scheduled(now, now + Duration::hours(24))
            .unwrap();
        assert_eq!(upcoming.len(), 2);
        // Grouped by user id, then chronological.
        assert_eq!(upcoming[0].user_id, maya.id);
        assert_eq!(upcoming[1].user_id, noah.id);

        let mine = db.list_upcoming_for_user(maya.id, now, 5).unwrap();
        let titles: Vec<&str> = mine.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Soon", "Too far"]);
    }

    #[test]
    fn test_library_crud() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("maya", "maya@example.com", "pw").unwrap();

        let item = db
            .create_library_item(
                user.id,
                &NewLibraryItem {
                    title: "Summer Promo".to_string(),
                    caption: "Hot deals!".to_string(),
                    hashtags: "#summer #promo".to_string(),
                    category: "Campaign".to_string(),
                },
            )
            .unwrap();
        assert!(item.id > 0);

        let listed = db.list_library_items(user.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].hashtags, "#summer #promo");

        // Scoped to owner.
        let noah = db.create_user("noah", "noah@example.com", "pw").unwrap();
        assert!(db.list_library_items(noah.id).unwrap().is_empty());
        assert!(db.delete_library_item(noah.id, item.id).is_err());

        db.delete_library_item(user.id, item.id).unwrap();
        assert!(db.list_library_items(user.id).unwrap().is_empty());
    }

    #[test]
    fn test_counts() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("maya", "maya@example.com", "pw").unwrap();
        db.create_content(user.id, &new_item("One", ContentStatus::Idea, None))
            .unwrap();
        db.create_library_item(
            user.id,
            &NewLibraryItem {
                title: "Snippet".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(db.count_content().unwrap(), 1);
        assert_eq!(db.count_library_items().unwrap(), 1);
    }
}
