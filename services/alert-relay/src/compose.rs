//! Turns an alert into a ServerChan push notification

use chrono::DateTime;
use chrono_tz::Tz;

use crate::alert::{AlertRecord, AlertStatus};
use crate::notifier::Notification;

/// Maximum title length in bytes accepted by ServerChan
pub const MAX_TITLE_LEN: usize = 32;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ERROR_HEADER: &str = "\n\n**错误信息:**";

/// Format a Unix timestamp as local date-time in the given zone
pub fn format_timestamp(timestamp: i64, tz: &Tz) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(tz).format(DATETIME_FORMAT).to_string(),
        None => {
            tracing::warn!("Timestamp {} is out of range, sending it raw", timestamp);
            timestamp.to_string()
        }
    }
}

/// Cut `title` to at most `MAX_TITLE_LEN` bytes without splitting a character
pub fn truncate_title(mut title: String) -> String {
    if title.len() > MAX_TITLE_LEN {
        let mut end = MAX_TITLE_LEN;
        while !title.is_char_boundary(end) {
            end -= 1;
        }
        title.truncate(end);
    }
    title
}

pub fn compose_title(record: &AlertRecord) -> String {
    truncate_title(format!("{}已{}", record.name, record.alert_status()))
}

pub fn compose_body(record: &AlertRecord, tz: &Tz) -> String {
    let status = record.alert_status();
    let mut body = format!(
        "{} {} {}已于{}{}",
        record.name,
        record.category,
        record.target,
        format_timestamp(record.timestamp, tz),
        status
    );

    if status == AlertStatus::Offline && !record.errors.is_empty() {
        body.push_str(ERROR_HEADER);
        for (location, message) in &record.errors {
            body.push_str(&format!("\n- {}: {}", location, message));
        }
    }

    body
}

/// Build the push notification for a validated alert
pub fn compose(record: &AlertRecord, tz: &Tz) -> Notification {
    Notification {
        title: compose_title(record),
        body: compose_body(record, tz),
    }
}
