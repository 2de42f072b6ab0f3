// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::NaiveDate;

/// Placeholder for an average that has nothing to average.
pub const NO_VALUE: &str = "---";

/// Format a date the way summaries show it, e.g. `Jun 1, 2024`.
pub fn format_date_medium(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format seconds as `H:mm`.
pub fn format_duration_hm(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}

/// Format a pace in seconds per kilometer as `m:ss`, minutes unbounded.
pub fn format_pace(seconds_per_km: u64) -> String {
    format!("{}:{:02}", seconds_per_km / 60, seconds_per_km % 60)
}

/// Format an average-duration aggregate, mapping the `-1` sentinel to `---`.
pub fn format_average_duration(seconds: i64) -> String {
    u64::try_from(seconds)
        .map(format_duration_hm)
        .unwrap_or_else(|_| NO_VALUE.to_string())
}

/// Format an average with the given precision, mapping the `-1` sentinel to `---`.
pub fn format_average(value: f64, precision: usize) -> String {
    if value == -1.0 {
        NO_VALUE.to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Format the oldest/latest range of a set of activities.
pub fn format_date_range(oldest: NaiveDate, latest: NaiveDate) -> String {
    if oldest == NaiveDate::MIN {
        return "No Activities".to_string();
    }
    format!(
        "{} - {}",
        format_date_medium(oldest),
        format_date_medium(latest)
    )
}
