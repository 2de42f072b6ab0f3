// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chart series for the statistics screen.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::db::RunEntry;
use crate::models::{Run, RunType};
use crate::services::runs_set::{RunsSet, Window};

/// Period a chart covers, ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Timeframe {
    Days7,
    Days30,
    Months12,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Days7, Timeframe::Days30, Timeframe::Months12];

    pub fn days(self) -> u32 {
        match self {
            Timeframe::Days7 => 7,
            Timeframe::Days30 => 30,
            Timeframe::Months12 => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Days7 => "7 Days",
            Timeframe::Days30 => "30 Days",
            Timeframe::Months12 => "12 Months",
        }
    }

    /// First day covered by the timeframe.
    pub fn begin(self, today: NaiveDate) -> NaiveDate {
        match self {
            Timeframe::Months12 => months12_begin(today),
            _ => today
                .checked_sub_days(Days::new(u64::from(self.days())))
                .unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Quantity plotted per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    /// Kilometers
    Distance,
    /// Minutes
    Duration,
}

impl Metric {
    fn value(self, run: &Run) -> f64 {
        match self {
            Metric::Distance => run.total_distance(),
            Metric::Duration => run.recorded_duration() as f64 / 60.0,
        }
    }
}

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Per-day or per-month totals of `metric` over `timeframe`.
///
/// - `Days7`: one point per day, oldest first, labelled with the weekday.
/// - `Days30`: one point per day offset `-30..=0`, labelled with the offset.
/// - `Months12`: one point per calendar month over the last twelve months,
///   labelled with the month name.
pub fn series(
    entries: &[RunEntry],
    timeframe: Timeframe,
    metric: Metric,
    today: NaiveDate,
) -> Vec<SeriesPoint> {
    let day_total = |day: NaiveDate| -> f64 {
        entries
            .iter()
            .filter(|e| e.run.date == day)
            .map(|e| metric.value(&e.run))
            .sum()
    };

    match timeframe {
        Timeframe::Days7 => (0..7u64)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|day| SeriesPoint {
                label: day.format("%A").to_string(),
                value: day_total(day),
            })
            .collect(),
        Timeframe::Days30 => (-30i64..=0)
            .filter_map(|offset| {
                today
                    .checked_sub_days(Days::new(offset.unsigned_abs()))
                    .map(|day| (offset, day))
            })
            .map(|(offset, day)| SeriesPoint {
                label: offset.to_string(),
                value: day_total(day),
            })
            .collect(),
        Timeframe::Months12 => {
            let begin = months12_begin(today);
            (0..12u32)
                .filter_map(|i| begin.checked_add_months(Months::new(i)))
                .map(|month_start| SeriesPoint {
                    label: month_start.format("%B").to_string(),
                    value: entries
                        .iter()
                        .filter(|e| {
                            e.run.date >= begin
                                && e.run.date.year() == month_start.year()
                                && e.run.date.month() == month_start.month()
                        })
                        .map(|e| metric.value(&e.run))
                        .sum(),
                })
                .collect()
        }
    }
}

/// Activity count per type over `[begin, today]`, sorted by display name.
pub fn type_breakdown(
    entries: &[RunEntry],
    timeframe: Timeframe,
    today: NaiveDate,
) -> Vec<(RunType, usize)> {
    let set = RunsSet::new(entries, Window::new(timeframe.begin(today), today));

    let mut counts: Vec<(RunType, usize)> = RunType::ALL
        .into_iter()
        .map(|t| (t, set.runs().filter(|r| r.run_type == Some(t)).count()))
        .filter(|(_, count)| *count > 0)
        .collect();
    counts.sort_by_key(|(t, _)| t.display_name());
    counts
}

/// First day of the month eleven months before the current one.
fn months12_begin(today: NaiveDate) -> NaiveDate {
    today
        .with_day(1)
        .and_then(|first| first.checked_sub_months(Months::new(11)))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months12_begin() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(
            months12_begin(today),
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()
        );

        let december = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(
            months12_begin(december),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_timeframe_labels() {
        let labels: Vec<&str> = Timeframe::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["7 Days", "30 Days", "12 Months"]);
    }
}
