//! Domain models for Muse

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An application user
///
/// Owns content items and library snippets. `reminders_enabled` toggles the
/// email digest without deleting the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2id PHC string, never exposed over the API
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub reminders_enabled: bool,
    pub created_at: NaiveDateTime,
}

/// Lifecycle status of a content item
///
/// Idea -> In Progress -> Scheduled -> Posted. Only Scheduled and Posted
/// items participate in posting metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentStatus {
    Idea,
    #[serde(rename = "In Progress")]
    InProgress,
    Scheduled,
    Posted,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::InProgress => "In Progress",
            Self::Scheduled => "Scheduled",
            Self::Posted => "Posted",
        }
    }
}

impl std::str::FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "idea" => Ok(Self::Idea),
            "in progress" | "in_progress" => Ok(Self::InProgress),
            "scheduled" => Ok(Self::Scheduled),
            "posted" => Ok(Self::Posted),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An idea/post card in the planner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    /// Free text (e.g. Instagram, TikTok); defaulted to "General" on create
    pub platform: String,
    /// Naive UTC; optional, raw ideas are unscheduled
    #[serde(default, with = "utc_z_opt")]
    pub scheduled_time: Option<NaiveDateTime>,
    pub status: ContentStatus,
    pub details: String,
    pub thumbnail_url: Option<String>,
    /// Naive UTC; drives the idea-to-post latency metric
    #[serde(with = "utc_z")]
    pub created_at: NaiveDateTime,
}

/// Fields for creating a content item
#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub title: String,
    pub platform: String,
    pub scheduled_time: Option<NaiveDateTime>,
    pub status: ContentStatus,
    pub details: String,
    pub thumbnail_url: Option<String>,
}

/// Partial update of a content item
///
/// `None` means "leave unchanged". For `scheduled_time`, `Some(None)` clears
/// the schedule.
#[derive(Debug, Clone, Default)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub platform: Option<String>,
    pub scheduled_time: Option<Option<NaiveDateTime>>,
    pub status: Option<ContentStatus>,
    pub details: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl ContentUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.platform.is_none()
            && self.scheduled_time.is_none()
            && self.status.is_none()
            && self.details.is_none()
            && self.thumbnail_url.is_none()
    }
}

/// A reusable content snippet/asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryItem {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub caption: String,
    pub hashtags: String,
    pub category: String,
    pub created_at: NaiveDateTime,
}

/// Fields for creating a library item
#[derive(Debug, Clone, Default)]
pub struct NewLibraryItem {
    pub title: String,
    pub caption: String,
    pub hashtags: String,
    pub category: String,
}

/// A calendar entry derived from a Scheduled or Posted item
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    #[serde(with = "utc_z")]
    pub start: NaiveDateTime,
    pub platform: String,
    pub status: ContentStatus,
    pub thumbnail_url: Option<String>,
    pub details: String,
}

// ============================================================================
// Insights payload types
// ============================================================================

/// This-week vs last-week posting counts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekSummary {
    pub this_week: i64,
    pub last_week: i64,
    pub delta: i64,
}

/// One week of the continuous posting series
///
/// `week_start` is the Monday midnight opening the week; serialized as plain
/// ISO-8601 (consumers treat it as UTC).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyBucket {
    pub week_start: NaiveDateTime,
    pub count: i64,
}

/// Per-platform posting counts over the rolling 30-day window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformBucket {
    pub platform: String,
    pub count: i64,
    /// Share of the window total, rounded to one decimal place
    pub percent: f64,
}

/// The full analytics payload, recomputed fresh on every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    pub week_summary: WeekSummary,
    /// Exactly 8 entries, chronological, zero-filled
    pub weekly_series: Vec<WeeklyBucket>,
    pub platform_breakdown: Vec<PlatformBucket>,
    /// Mean days from creation to posting, 2 decimal places; null without data
    pub avg_idea_to_post_days: Option<f64>,
    pub suggestions: Vec<String>,
}

// ============================================================================
// Serde helpers for naive-UTC timestamps
// ============================================================================

/// Serialize a naive-UTC timestamp with an explicit trailing `Z`
pub mod utc_z {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(de)?;
        super::parse_utc_z(&s).ok_or_else(|| serde::de::Error::custom("invalid timestamp"))
    }
}

/// Like [`utc_z`] but for optional timestamps (absent serializes as null)
pub mod utc_z_opt {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        dt: &Option<NaiveDateTime>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => ser.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let s: Option<String> = Option::deserialize(de)?;
        match s {
            None => Ok(None),
            Some(s) => super::parse_utc_z(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom("invalid timestamp")),
        }
    }
}

fn parse_utc_z(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}
