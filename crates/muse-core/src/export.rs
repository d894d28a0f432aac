//! Content export

use std::io::Write;

use crate::error::Result;
use crate::models::ContentItem;
use crate::time::format_utc_z;

/// Write a user's content items as CSV
///
/// Optional timestamps render as empty cells; present ones use ISO-8601 Z.
pub fn export_content_csv<W: Write>(items: &[ContentItem], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "id",
        "title",
        "platform",
        "status",
        "scheduled_time",
        "details",
        "thumbnail_url",
        "created_at",
    ])?;

    for item in items {
        csv_writer.write_record([
            item.id.to_string(),
            item.title.clone(),
            item.platform.clone(),
            item.status.as_str().to_string(),
            item.scheduled_time.map(format_utc_z).unwrap_or_default(),
            item.details.clone(),
            item.thumbnail_url.clone().unwrap_or_default(),
            format_utc_z(item.created_at),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_export_shape() {
        let items = vec![ContentItem {
            id: 7,
            user_id: 1,
            title: "Launch teaser".to_string(),
            platform: "Instagram".to_string(),
            scheduled_time: NaiveDate::from_ymd_opt(2025, 6, 9)
                .unwrap()
                .and_hms_opt(9, 0, 0),
            status: ContentStatus::Scheduled,
            details: "Short cut of the trailer".to_string(),
            thumbnail_url: None,
            created_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        }];

        let mut out = Vec::new();
        export_content_csv(&items, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "id,title,platform,status,scheduled_time,details,thumbnail_url,created_at"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("7,Launch teaser,Instagram,Scheduled,2025-06-09T09:00:00Z"));
        assert!(row.ends_with("2025-06-01T08:00:00Z"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_export_empty_is_header_only() {
        let mut out = Vec::new();
        export_content_csv(&[], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
