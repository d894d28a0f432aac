//! Library snippet operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{LibraryItem, NewLibraryItem};

const LIBRARY_COLUMNS: &str = "id, user_id, title, caption, hashtags, category, created_at";

fn map_library_item(row: &Row) -> rusqlite::Result<LibraryItem> {
    Ok(LibraryItem {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        caption: row.get(3)?,
        hashtags: row.get(4)?,
        category: row.get(5)?,
        created_at: parse_datetime(&row.get::<_, String>(6)?),
    })
}

impl Database {
    /// Create a library item for a user
    pub fn create_library_item(&self, user_id: i64, item: &NewLibraryItem) -> Result<LibraryItem> {
        if item.title.trim().is_empty() {
            return Err(Error::InvalidData("Title is required".to_string()));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO library_items (user_id, title, caption, hashtags, category) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                item.title.trim(),
                item.caption,
                item.hashtags,
                item.category,
            ],
        )?;
        let id = conn.last_insert_rowid();

        let created = conn
            .query_row(
                &format!("SELECT {} FROM library_items WHERE id = ?1", LIBRARY_COLUMNS),
                params![id],
                map_library_item,
            )
            .optional()?;
        created.ok_or_else(|| Error::NotFound("Library item not found after creation".to_string()))
    }

    /// List a user's library items, newest first
    pub fn list_library_items(&self, user_id: i64) -> Result<Vec<LibraryItem>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM library_items WHERE user_id = ?1 ORDER BY id DESC",
            LIBRARY_COLUMNS
        ))?;
        let items = stmt
            .query_map(params![user_id], map_library_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Delete a library item owned by the user
    pub fn delete_library_item(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM library_items WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Library item {} not found", id)));
        }
        Ok(())
    }

    /// Total library rows (CLI status)
    pub fn count_library_items(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM library_items", [], |row| row.get(0))?)
    }
}
