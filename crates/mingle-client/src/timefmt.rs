//! Timestamp labels for the transcript.
//!
//! A message gets a label only when it opens the transcript or falls in a
//! different minute than the message right before it; runs within the same
//! minute collapse into the preceding label. Label text depends on how old
//! the message is relative to "now": today shows the time alone, the last
//! seven days add the weekday, anything older adds the date.
//!
//! Timestamps are UTC-normalized before formatting: the message's own
//! timezone offset is subtracted, so the rendered wall clock is the UTC
//! wall clock.

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};

use mingle_types::api::MessageRecord;

/// One optional label per message, aligned by index.
pub fn transcript_labels(messages: &[MessageRecord], now: DateTime<Utc>) -> Vec<Option<String>> {
    let now = now.naive_utc();
    let mut labels = Vec::with_capacity(messages.len());
    let mut prev: Option<NaiveDateTime> = None;

    for (i, message) in messages.iter().enumerate() {
        let current = normalize(&message.timestamp);

        let label = current.and_then(|t| {
            let show = i == 0
                || prev.is_none_or(|p| minute_of_day(p) != minute_of_day(t));
            show.then(|| format_label(t, now))
        });

        labels.push(label);
        prev = current;
    }

    labels
}

/// Parse an ISO-8601 timestamp and drop its offset, keeping the UTC wall
/// clock. Offset-less timestamps are taken as already UTC.
fn normalize(timestamp: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

fn minute_of_day(t: NaiveDateTime) -> u32 {
    t.hour() * 60 + t.minute()
}

fn format_label(t: NaiveDateTime, now: NaiveDateTime) -> String {
    if t.date() == now.date() {
        t.format("%-I:%M %p").to_string()
    } else if t >= now - Duration::days(7) {
        t.format("%A %-I:%M %p").to_string()
    } else {
        t.format("%a, %b %-d, %-I:%M %p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: i64, timestamp: &str) -> MessageRecord {
        MessageRecord {
            message_id: id,
            sender_id: 1,
            recipient_id: 2,
            message_content: format!("m{}", id),
            timestamp: timestamp.into(),
        }
    }

    // 2026-08-06 is a Thursday.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 15, 0, 0).unwrap()
    }

    #[test]
    fn same_minute_collapses() {
        let messages = [
            record(1, "2026-08-06T10:00:05Z"),
            record(2, "2026-08-06T10:00:40Z"),
        ];
        let labels = transcript_labels(&messages, now());
        assert!(labels[0].is_some());
        assert_eq!(labels[1], None);
    }

    #[test]
    fn different_minute_gets_a_label() {
        let messages = [
            record(1, "2026-08-06T10:00:05Z"),
            record(2, "2026-08-06T10:01:02Z"),
        ];
        let labels = transcript_labels(&messages, now());
        assert_eq!(labels[0].as_deref(), Some("10:00 AM"));
        assert_eq!(labels[1].as_deref(), Some("10:01 AM"));
    }

    #[test]
    fn first_message_is_always_labeled() {
        let messages = [record(1, "2026-08-06T14:59:00Z")];
        let labels = transcript_labels(&messages, now());
        assert_eq!(labels[0].as_deref(), Some("2:59 PM"));
    }

    #[test]
    fn today_renders_time_only() {
        let labels = transcript_labels(&[record(1, "2026-08-06T14:59:00Z")], now());
        assert_eq!(labels[0].as_deref(), Some("2:59 PM"));
    }

    #[test]
    fn three_days_old_renders_weekday_and_time() {
        let labels = transcript_labels(&[record(1, "2026-08-03T14:59:00Z")], now());
        assert_eq!(labels[0].as_deref(), Some("Monday 2:59 PM"));
    }

    #[test]
    fn thirty_days_old_renders_short_date_and_time() {
        let labels = transcript_labels(&[record(1, "2026-07-07T09:30:00Z")], now());
        assert_eq!(labels[0].as_deref(), Some("Tue, Jul 7, 9:30 AM"));
    }

    #[test]
    fn offset_is_subtracted_before_formatting() {
        // 10:00 at +02:00 is 08:00 on the UTC wall clock
        let labels = transcript_labels(&[record(1, "2026-08-06T10:00:00+02:00")], now());
        assert_eq!(labels[0].as_deref(), Some("8:00 AM"));
    }

    #[test]
    fn unparseable_timestamp_gets_no_label_and_breaks_the_run() {
        let messages = [
            record(1, "2026-08-06T10:00:05Z"),
            record(2, "not a timestamp"),
            record(3, "2026-08-06T10:00:40Z"),
        ];
        let labels = transcript_labels(&messages, now());
        assert!(labels[0].is_some());
        assert_eq!(labels[1], None);
        assert!(labels[2].is_some());
    }

    #[test]
    fn collapsing_applies_across_recency_buckets() {
        let messages = [
            record(1, "2026-07-07T09:30:10Z"),
            record(2, "2026-07-07T09:30:50Z"),
        ];
        let labels = transcript_labels(&messages, now());
        assert_eq!(labels[0].as_deref(), Some("Tue, Jul 7, 9:30 AM"));
        assert_eq!(labels[1], None);
    }
}
