//! Content item operations
//!
//! Every query is scoped by the owning user id; there is no ambient
//! current-user state anywhere in this layer.

use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Row};

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{CalendarEvent, ContentItem, ContentStatus, ContentUpdate, NewContentItem};

const CONTENT_COLUMNS: &str =
    "id, user_id, title, platform, scheduled_time, status, details, thumbnail_url, created_at";

fn map_content(row: &Row) -> rusqlite::Result<ContentItem> {
    let status: String = row.get(5)?;
    let status: ContentStatus = status.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, e.into())
    })?;
    Ok(ContentItem {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        platform: row.get(3)?,
        scheduled_time: row
            .get::<_, Option<String>>(4)?
            .map(|s| parse_datetime(&s)),
        status,
        details: row.get(6)?,
        thumbnail_url: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

impl Database {
    /// Create a content item for a user
    pub fn create_content(&self, user_id: i64, item: &NewContentItem) -> Result<ContentItem> {
        if item.title.trim().is_empty() {
            return Err(Error::InvalidData("Title is required".to_string()));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO content (user_id, title, platform, scheduled_time, status, details, thumbnail_url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                user_id,
                item.title.trim(),
                item.platform.trim(),
                item.scheduled_time.map(format_datetime),
                item.status.as_str(),
                item.details,
                item.thumbnail_url,
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_content(user_id, id)?
            .ok_or_else(|| Error::NotFound("Content not found after creation".to_string()))
    }

    /// List a user's content, newest first
    pub fn list_content(&self, user_id: i64) -> Result<Vec<ContentItem>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM content WHERE user_id = ?1 ORDER BY id DESC",
            CONTENT_COLUMNS
        ))?;
        let items = stmt
            .query_map(params![user_id], map_content)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Fetch one item, scoped to its owner (wrong owner reads as missing)
    pub fn get_content(&self, user_id: i64, id: i64) -> Result<Option<ContentItem>> {
        let conn = self.conn()?;
        let item = conn
            .query_row(
                &format!(
                    "SELECT {} FROM content WHERE id = ?1 AND user_id = ?2",
                    CONTENT_COLUMNS
                ),
                params![id, user_id],
                map_content,
            )
            .optional()?;
        Ok(item)
    }

    /// Apply a partial update; only provided fields change
    pub fn update_content(
        &self,
        user_id: i64,
        id: i64,
        update: &ContentUpdate,
    ) -> Result<ContentItem> {
        // Existence/ownership check first so callers get a clean 404.
        if self.get_content(user_id, id)?.is_none() {
            return Err(Error::NotFound(format!("Content {} not found", id)));
        }

        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidData("Title cannot be empty".to_string()));
            }
        }
        if let Some(platform) = &update.platform {
            if platform.trim().is_empty() {
                return Err(Error::InvalidData("Platform cannot be empty".to_string()));
            }
        }

        // Build the SET clause from whichever fields were provided.
        let mut sets: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(title) = &update.title {
            sets.push(format!("title = ?{}", values.len() + 1));
            values.push(Box::new(title.trim().to_string()));
        }
        if let Some(platform) = &update.platform {
            sets.push(format!("platform = ?{}", values.len() + 1));
            values.push(Box::new(platform.trim().to_string()));
        }
        if let Some(scheduled) = &update.scheduled_time {
            sets.push(format!("scheduled_time = ?{}", values.len() + 1));
            values.push(Box::new(scheduled.map(format_datetime)));
        }
        if let Some(status) = &update.status {
            sets.push(format!("status = ?{}", values.len() + 1));
            values.push(Box::new(status.as_str().to_string()));
        }
        if let Some(details) = &update.details {
            sets.push(format!("details = ?{}", values.len() + 1));
            values.push(Box::new(details.clone()));
        }
        if let Some(thumbnail_url) = &update.thumbnail_url {
            sets.push(format!("thumbnail_url = ?{}", values.len() + 1));
            values.push(Box::new(thumbnail_url.clone()));
        }

        if !sets.is_empty() {
            let sql = format!(
                "UPDATE content SET {} WHERE id = ?{} AND user_id = ?{}",
                sets.join(", "),
                values.len() + 1,
                values.len() + 2
            );
            values.push(Box::new(id));
            values.push(Box::new(user_id));
            let refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();

            let conn = self.conn()?;
            conn.execute(&sql, refs.as_slice())?;
        }

        self.get_content(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Content {} not found", id)))
    }

    /// Delete an item owned by the user
    pub fn delete_content(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM content WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Content {} not found", id)));
        }
        Ok(())
    }

    /// Calendar feed: Scheduled + Posted items that have a schedule time,
    /// chronological
    pub fn list_calendar_events(&self, user_id: i64) -> Result<Vec<CalendarEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM content
            WHERE user_id = ?1
              AND status IN ('Scheduled', 'Posted')
              AND scheduled_time IS NOT NULL
            ORDER BY scheduled_time ASC
            "#,
            CONTENT_COLUMNS
        ))?;
        let items = stmt
            .query_map(params![user_id], map_content)?
            .collect::<std::result::Result<Vec<ContentItem>, _>>()?;

        Ok(items
            .into_iter()
            .filter_map(|item| {
                let start = item.scheduled_time?;
                Some(CalendarEvent {
                    id: item.id,
                    title: item.title,
                    start,
                    platform: item.platform,
                    status: item.status,
                    thumbnail_url: item.thumbnail_url,
                    details: item.details,
                })
            })
            .collect())
    }

    /// Scheduled items across all users inside a time window, ordered by user
    /// then schedule time (reminder digest query)
    pub fn list_upcoming_scheduled(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<ContentItem>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM content
            WHERE status = 'Scheduled'
              AND scheduled_time IS NOT NULL
              AND scheduled_time >= ?1
              AND scheduled_time <= ?2
            ORDER BY user_id ASC, scheduled_time ASC
            "#,
            CONTENT_COLUMNS
        ))?;
        let items = stmt
            .query_map(
                params![format_datetime(from), format_datetime(to)],
                map_content,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// A user's next scheduled items from `from` onward, capped at `limit`
    pub fn list_upcoming_for_user(
        &self,
        user_id: i64,
        from: NaiveDateTime,
        limit: i64,
    ) -> Result<Vec<ContentItem>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM content
            WHERE user_id = ?1
              AND status = 'Scheduled'
              AND scheduled_time IS NOT NULL
              AND scheduled_time >= ?2
            ORDER BY scheduled_time ASC
            LIMIT ?3
            "#,
            CONTENT_COLUMNS
        ))?;
        let items = stmt
            .query_map(params![user_id, format_datetime(from), limit], map_content)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Total content rows (CLI status)
    pub fn count_content(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM content", [], |row| row.get(0))?)
    }
}
