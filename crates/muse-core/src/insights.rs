//! Posting analytics
//!
//! [`compute_insights`] folds a user's full content collection into the
//! insights payload: an 8-week posting series, a week-over-week delta, a
//! rolling 30-day platform breakdown, the mean idea-to-post latency, and a
//! fixed-order list of suggestion strings. The computation is a pure function
//! of the items and the supplied instant; it never fails, and absent data
//! degrades to zeros/empties/null.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDateTime};

use crate::models::{
    ContentItem, ContentStatus, InsightsReport, PlatformBucket, WeekSummary, WeeklyBucket,
};

/// Number of weekly buckets in the posting series
const WEEKS_BACK: i64 = 8;

/// Monday midnight opening the week containing `t` (ISO convention, Monday=0)
pub fn week_floor(t: NaiveDateTime) -> NaiveDateTime {
    let midnight = t.date().and_hms_opt(0, 0, 0).unwrap();
    midnight - Duration::days(t.date().weekday().num_days_from_monday() as i64)
}

/// The instant an item counts as posted, if any.
///
/// Posted items fall back to their creation time when no schedule was set;
/// Scheduled items without a schedule time (bad data) are excluded; ideas and
/// in-progress items never contribute to posting metrics.
fn post_instant(item: &ContentItem) -> Option<NaiveDateTime> {
    match item.status {
        ContentStatus::Posted => item.scheduled_time.or(Some(item.created_at)),
        ContentStatus::Scheduled => item.scheduled_time,
        ContentStatus::Idea | ContentStatus::InProgress => None,
    }
}

/// Blank/whitespace platform labels collapse into a shared bucket
fn normalize_platform(platform: &str) -> String {
    let trimmed = platform.trim();
    if trimmed.is_empty() {
        "Other".to_string()
    } else {
        trimmed.to_string()
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Compute the insights report for one user's content collection.
///
/// `now` is naive UTC. Tie-breaks are explicit: platforms with equal counts
/// keep first-encountered-in-input order, and an equal-count weekday maximum
/// resolves to the earliest weekday (Monday-first scan).
pub fn compute_insights(items: &[ContentItem], now: NaiveDateTime) -> InsightsReport {
    // Histogram window opens at midnight of the day 8 weeks back.
    let window_start = (now - Duration::weeks(WEEKS_BACK)).date().and_hms_opt(0, 0, 0).unwrap();
    let last_30_days = now - Duration::days(30);

    // Weekly and weekday histograms over the window.
    let mut week_counts: HashMap<NaiveDateTime, i64> = HashMap::new();
    let mut weekday_counts = [0i64; 7];
    for item in items {
        if let Some(dt) = post_instant(item) {
            if dt >= window_start {
                *week_counts.entry(week_floor(dt)).or_insert(0) += 1;
                weekday_counts[dt.date().weekday().num_days_from_monday() as usize] += 1;
            }
        }
    }

    // Continuous series: exactly WEEKS_BACK buckets ending at the current week.
    let weekly_series: Vec<WeeklyBucket> = (0..WEEKS_BACK)
        .map(|w| {
            let week_start = week_floor(now - Duration::weeks(WEEKS_BACK - 1 - w));
            WeeklyBucket {
                week_start,
                count: week_counts.get(&week_start).copied().unwrap_or(0),
            }
        })
        .collect();

    let this_week = week_floor(now);
    let last_week = this_week - Duration::weeks(1);
    let this_week_count = week_counts.get(&this_week).copied().unwrap_or(0);
    let last_week_count = week_counts.get(&last_week).copied().unwrap_or(0);
    let delta = this_week_count - last_week_count;

    // Platform breakdown over the last 30 days. Accumulation preserves input
    // order so the stable sort leaves equal counts in first-seen order.
    let mut platform_counts: Vec<(String, i64)> = Vec::new();
    let mut total_in_window = 0i64;
    for item in items {
        if let Some(dt) = post_instant(item) {
            if dt >= last_30_days {
                let name = normalize_platform(&item.platform);
                match platform_counts.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, count)) => *count += 1,
                    None => platform_counts.push((name, 1)),
                }
                total_in_window += 1;
            }
        }
    }
    platform_counts.sort_by(|a, b| b.1.cmp(&a.1));
    let platform_breakdown: Vec<PlatformBucket> = platform_counts
        .into_iter()
        .map(|(platform, count)| {
            let percent = if total_in_window > 0 {
                round1(count as f64 / total_in_window as f64 * 100.0)
            } else {
                0.0
            };
            PlatformBucket {
                platform,
                count,
                percent,
            }
        })
        .collect();

    // Mean idea-to-post latency in days. Negative gaps are bad data (clock
    // skew, backfilled rows) and are discarded rather than averaged in.
    let mut day_samples: Vec<f64> = Vec::new();
    for item in items {
        if item.status == ContentStatus::Posted {
            if let Some(posted) = post_instant(item) {
                let days = (posted - item.created_at).num_seconds() as f64 / 86_400.0;
                if days >= 0.0 {
                    day_samples.push(days);
                }
            }
        }
    }
    let avg_idea_to_post_days = if day_samples.is_empty() {
        None
    } else {
        Some(round2(
            day_samples.iter().sum::<f64>() / day_samples.len() as f64,
        ))
    };

    // Suggestion heuristics, fixed order; each fires independently.
    let mut suggestions: Vec<String> = Vec::new();
    if delta < 0 {
        suggestions.push(
            "Your posting volume is down versus last week. Try batching two quick posts to catch up."
                .to_string(),
        );
    } else if delta == 0 && this_week_count < 3 && !items.is_empty() {
        // A brand-new account has no trend to comment on; stay quiet.
        suggestions.push(
            "Steady week. Consider scheduling 1-2 more posts to keep momentum.".to_string(),
        );
    }

    let weekday_total: i64 = weekday_counts.iter().sum();
    if weekday_total >= 6 {
        // Earliest weekday wins a tied maximum.
        let mut top_weekday = 0usize;
        for (idx, count) in weekday_counts.iter().enumerate() {
            if *count > weekday_counts[top_weekday] {
                top_weekday = idx;
            }
        }
        // Monday=0 ... Sunday=6, so >= 4 is Friday through Sunday.
        if top_weekday >= 4 {
            suggestions.push(
                "Most of your posts cluster late in the week. Try scheduling more Mon-Wed."
                    .to_string(),
            );
        }
    }

    if let Some(top) = platform_breakdown.first() {
        if top.percent >= 70.0 && platform_breakdown.len() >= 2 {
            suggestions.push(format!(
                "You rely heavily on {}. Consider reusing content on other platforms.",
                top.platform
            ));
        }
    }

    if let Some(avg) = avg_idea_to_post_days {
        if avg < 1.0 {
            suggestions.push(
                "You often post within 24 hours of ideation. Try drafting earlier to avoid last-minute rush."
                    .to_string(),
            );
        }
    }

    InsightsReport {
        week_summary: WeekSummary {
            this_week: this_week_count,
            last_week: last_week_count,
            delta,
        },
        weekly_series,
        platform_breakdown,
        avg_idea_to_post_days,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn item(
        status: ContentStatus,
        platform: &str,
        scheduled_time: Option<NaiveDateTime>,
        created_at: NaiveDateTime,
    ) -> ContentItem {
        ContentItem {
            id: 0,
            user_id: 1,
            title: "post".to_string(),
            platform: platform.to_string(),
            scheduled_time,
            status,
            details: String::new(),
            thumbnail_url: None,
            created_at,
        }
    }

    // Monday noon, used as "now" in most tests.
    fn monday_noon() -> NaiveDateTime {
        at(2025, 6, 9, 12, 0)
    }

    #[test]
    fn test_week_floor_is_monday_midnight() {
        // 2025-06-12 is a Thursday.
        let floored = week_floor(at(2025, 6, 12, 17, 45));
        assert_eq!(floored, at(2025, 6, 9, 0, 0));
        assert_eq!(floored.date().weekday(), Weekday::Mon);

        // A Monday floors to its own midnight.
        assert_eq!(week_floor(at(2025, 6, 9, 0, 0)), at(2025, 6, 9, 0, 0));
        // Sunday still belongs to the preceding Monday.
        assert_eq!(week_floor(at(2025, 6, 15, 23, 59)), at(2025, 6, 9, 0, 0));
    }

    #[test]
    fn test_empty_input_yields_zeroed_report() {
        let report = compute_insights(&[], monday_noon());

        assert_eq!(report.week_summary.this_week, 0);
        assert_eq!(report.week_summary.last_week, 0);
        assert_eq!(report.week_summary.delta, 0);
        assert_eq!(report.weekly_series.len(), 8);
        assert!(report.weekly_series.iter().all(|b| b.count == 0));
        assert!(report.platform_breakdown.is_empty());
        assert_eq!(report.avg_idea_to_post_days, None);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_weekly_series_shape_invariant() {
        // Arbitrary mid-week instant plus scattered items.
        let now = at(2025, 3, 19, 8, 30);
        let items = vec![
            item(ContentStatus::Posted, "Instagram", Some(at(2025, 3, 18, 10, 0)), at(2025, 3, 1, 0, 0)),
            item(ContentStatus::Scheduled, "TikTok", Some(at(2025, 2, 4, 10, 0)), at(2025, 2, 1, 0, 0)),
            item(ContentStatus::Idea, "YouTube", None, at(2025, 3, 10, 0, 0)),
        ];
        let report = compute_insights(&items, now);

        assert_eq!(report.weekly_series.len(), 8);
        for pair in report.weekly_series.windows(2) {
            assert_eq!(pair[1].week_start - pair[0].week_start, Duration::weeks(1));
        }
        for bucket in &report.weekly_series {
            assert_eq!(bucket.week_start.date().weekday(), Weekday::Mon);
            assert_eq!(bucket.week_start.time(), chrono::NaiveTime::MIN);
        }
        assert_eq!(
            report.weekly_series.last().unwrap().week_start,
            week_floor(now)
        );
    }

    #[test]
    fn test_percent_sums_to_about_100() {
        let now = monday_noon();
        let mut items = Vec::new();
        for (platform, count) in [("Instagram", 3), ("TikTok", 2), ("YouTube", 2)] {
            for _ in 0..count {
                items.push(item(
                    ContentStatus::Posted,
                    platform,
                    Some(now - Duration::days(3)),
                    now - Duration::days(5),
                ));
            }
        }
        let report = compute_insights(&items, now);

        let sum: f64 = report.platform_breakdown.iter().map(|p| p.percent).sum();
        assert!((sum - 100.0).abs() < 0.1, "percent sum was {}", sum);
    }

    #[test]
    fn test_ideas_never_contribute() {
        let now = monday_noon();
        // An idea with every timestamp filled in still counts nowhere.
        let items = vec![item(
            ContentStatus::Idea,
            "Instagram",
            Some(now - Duration::days(1)),
            now - Duration::days(2),
        )];
        let report = compute_insights(&items, now);

        assert!(report.weekly_series.iter().all(|b| b.count == 0));
        assert!(report.platform_breakdown.is_empty());
        assert_eq!(report.avg_idea_to_post_days, None);
    }

    #[test]
    fn test_negative_latency_discarded() {
        let now = monday_noon();
        // Posted "before" it was created: clock skew, not a sample.
        let skewed = item(
            ContentStatus::Posted,
            "Instagram",
            Some(now - Duration::days(3)),
            now - Duration::days(1),
        );
        let report = compute_insights(&[skewed], now);
        assert_eq!(report.avg_idea_to_post_days, None);

        // With one clean sample alongside, only the clean one is averaged.
        let clean = item(
            ContentStatus::Posted,
            "Instagram",
            Some(now - Duration::days(1)),
            now - Duration::days(3),
        );
        let skewed = item(
            ContentStatus::Posted,
            "Instagram",
            Some(now - Duration::days(3)),
            now - Duration::days(1),
        );
        let report = compute_insights(&[clean, skewed], now);
        assert_eq!(report.avg_idea_to_post_days, Some(2.0));
    }

    #[test]
    fn test_single_post_scenario() {
        // now = 2025-06-09T12:00:00 (a Monday); one item posted that morning,
        // created the day before.
        let now = monday_noon();
        let items = vec![item(
            ContentStatus::Posted,
            "Instagram",
            Some(at(2025, 6, 9, 9, 0)),
            at(2025, 6, 8, 9, 0),
        )];
        let report = compute_insights(&items, now);

        assert_eq!(report.week_summary.this_week, 1);
        assert_eq!(report.avg_idea_to_post_days, Some(1.0));
        let last = report.weekly_series.last().unwrap();
        assert_eq!(last.week_start, at(2025, 6, 9, 0, 0));
        assert_eq!(last.count, 1);
    }

    #[test]
    fn test_volume_down_suggestion_first() {
        let now = monday_noon();
        // Two posts last week, none this week: delta = -2.
        let last_week_day = at(2025, 6, 4, 10, 0);
        let items = vec![
            item(ContentStatus::Posted, "Instagram", Some(last_week_day), at(2025, 6, 1, 0, 0)),
            item(ContentStatus::Posted, "TikTok", Some(last_week_day), at(2025, 6, 1, 0, 0)),
        ];
        let report = compute_insights(&items, now);

        assert_eq!(report.week_summary.delta, -2);
        assert!(report.suggestions[0].starts_with("Your posting volume is down"));
    }

    #[test]
    fn test_platform_dominance() {
        let now = monday_noon();
        let mut items = Vec::new();
        for _ in 0..8 {
            items.push(item(
                ContentStatus::Posted,
                "Instagram",
                Some(now - Duration::days(10)),
                now - Duration::days(12),
            ));
        }
        for _ in 0..2 {
            items.push(item(
                ContentStatus::Posted,
                "TikTok",
                Some(now - Duration::days(10)),
                now - Duration::days(12),
            ));
        }
        let report = compute_insights(&items, now);

        assert_eq!(report.platform_breakdown[0].platform, "Instagram");
        assert_eq!(report.platform_breakdown[0].percent, 80.0);
        assert!(report
            .suggestions
            .iter()
            .any(|s| s.contains("rely heavily on Instagram")));
    }

    #[test]
    fn test_platform_tie_keeps_input_order() {
        let now = monday_noon();
        let when = Some(now - Duration::days(2));
        let created = now - Duration::days(4);
        let items = vec![
            item(ContentStatus::Posted, "TikTok", when, created),
            item(ContentStatus::Posted, "Instagram", when, created),
            item(ContentStatus::Posted, "Instagram", when, created),
            item(ContentStatus::Posted, "TikTok", when, created),
            item(ContentStatus::Posted, "YouTube", when, created),
        ];
        let report = compute_insights(&items, now);

        let names: Vec<&str> = report
            .platform_breakdown
            .iter()
            .map(|p| p.platform.as_str())
            .collect();
        // TikTok and Instagram tie at 2; TikTok was seen first.
        assert_eq!(names, vec!["TikTok", "Instagram", "YouTube"]);
    }

    #[test]
    fn test_blank_platform_becomes_other() {
        let now = monday_noon();
        let items = vec![
            item(ContentStatus::Posted, "  ", Some(now - Duration::days(1)), now - Duration::days(2)),
            item(ContentStatus::Posted, "", Some(now - Duration::days(1)), now - Duration::days(2)),
        ];
        let report = compute_insights(&items, now);

        assert_eq!(report.platform_breakdown.len(), 1);
        assert_eq!(report.platform_breakdown[0].platform, "Other");
        assert_eq!(report.platform_breakdown[0].count, 2);
    }

    #[test]
    fn test_late_week_cluster_suggestion() {
        let now = monday_noon();
        // Six posts on the previous Friday (weekday index 4).
        let friday = at(2025, 6, 6, 18, 0);
        let items: Vec<ContentItem> = (0..6)
            .map(|_| item(ContentStatus::Posted, "Instagram", Some(friday), at(2025, 6, 1, 0, 0)))
            .collect();
        let report = compute_insights(&items, now);

        assert!(report
            .suggestions
            .iter()
            .any(|s| s.contains("cluster late in the week")));
    }

    #[test]
    fn test_late_week_needs_six_samples() {
        let now = monday_noon();
        let friday = at(2025, 6, 6, 18, 0);
        let items: Vec<ContentItem> = (0..5)
            .map(|_| item(ContentStatus::Posted, "Instagram", Some(friday), at(2025, 6, 1, 0, 0)))
            .collect();
        let report = compute_insights(&items, now);

        assert!(!report
            .suggestions
            .iter()
            .any(|s| s.contains("cluster late in the week")));
    }

    #[test]
    fn test_fast_posting_suggestion() {
        let now = monday_noon();
        // Posted two hours after creation.
        let items = vec![item(
            ContentStatus::Posted,
            "Instagram",
            Some(now - Duration::hours(1)),
            now - Duration::hours(3),
        )];
        let report = compute_insights(&items, now);

        assert!(report.avg_idea_to_post_days.unwrap() < 1.0);
        assert!(report
            .suggestions
            .iter()
            .any(|s| s.contains("within 24 hours of ideation")));
    }

    #[test]
    fn test_scheduled_without_time_is_excluded() {
        let now = monday_noon();
        let items = vec![item(
            ContentStatus::Scheduled,
            "Instagram",
            None,
            now - Duration::days(1),
        )];
        let report = compute_insights(&items, now);

        assert!(report.weekly_series.iter().all(|b| b.count == 0));
        assert!(report.platform_breakdown.is_empty());
    }

    #[test]
    fn test_posted_falls_back_to_created_at() {
        let now = monday_noon();
        let items = vec![item(
            ContentStatus::Posted,
            "Instagram",
            None,
            at(2025, 6, 9, 8, 0),
        )];
        let report = compute_insights(&items, now);

        assert_eq!(report.week_summary.this_week, 1);
        // Latency collapses to zero when the post instant is the creation time.
        assert_eq!(report.avg_idea_to_post_days, Some(0.0));
    }

    #[test]
    fn test_old_posts_fall_outside_window() {
        let now = monday_noon();
        let items = vec![item(
            ContentStatus::Posted,
            "Instagram",
            Some(now - Duration::weeks(20)),
            now - Duration::weeks(21),
        )];
        let report = compute_insights(&items, now);

        assert!(report.weekly_series.iter().all(|b| b.count == 0));
        assert!(report.platform_breakdown.is_empty());
        // Latency has no window; the old post still counts there.
        assert_eq!(report.avg_idea_to_post_days, Some(7.0));
    }

    #[test]
    fn test_steady_week_suggestion() {
        let now = monday_noon();
        // One post in each of this week and last week: delta = 0, this week < 3.
        let items = vec![
            item(ContentStatus::Posted, "Instagram", Some(at(2025, 6, 9, 9, 0)), at(2025, 6, 8, 0, 0)),
            item(ContentStatus::Posted, "Instagram", Some(at(2025, 6, 3, 9, 0)), at(2025, 6, 2, 0, 0)),
        ];
        let report = compute_insights(&items, now);

        assert_eq!(report.week_summary.delta, 0);
        assert!(report.suggestions[0].starts_with("Steady week"));
    }
}
