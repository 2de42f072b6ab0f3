// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Aggregate statistics over a set of activities.
//!
//! The record carries the literal sentinel values the presentation layer
//! recognizes: `-1` for averages with nothing to average, and the minimal
//! and maximal representable dates for the date range of an empty set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::segment::NOT_RECORDED;
use crate::models::Run;

/// Aggregates for one set of activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunsStats {
    /// Number of activities
    pub count: usize,
    /// Total distance (km)
    pub total_distance: f64,
    /// Total duration (seconds)
    pub total_duration: u64,
    /// `total_distance / count`, or -1
    pub average_distance: f64,
    /// `total_duration / count` in whole seconds, or -1
    pub average_duration: i64,
    /// Mean of the recorded evaluations, or -1
    pub average_evaluation: f64,
    /// Oldest activity date, or the minimal date when empty
    pub oldest_date: NaiveDate,
    /// Latest activity date, or the maximal date when empty
    pub latest_date: NaiveDate,
}

impl Default for RunsStats {
    fn default() -> Self {
        Self {
            count: 0,
            total_distance: 0.0,
            total_duration: 0,
            average_distance: f64::from(NOT_RECORDED),
            average_duration: i64::from(NOT_RECORDED),
            average_evaluation: f64::from(NOT_RECORDED),
            oldest_date: NaiveDate::MIN,
            latest_date: NaiveDate::MAX,
        }
    }
}

impl RunsStats {
    /// Compute every aggregate from scratch.
    pub fn from_runs<'a>(runs: impl IntoIterator<Item = &'a Run>) -> Self {
        let mut stats = Self::default();
        let mut evaluation_sum: u64 = 0;
        let mut evaluated: u64 = 0;
        let mut oldest: Option<NaiveDate> = None;
        let mut latest: Option<NaiveDate> = None;

        for run in runs {
            stats.count += 1;
            stats.total_distance += run.total_distance();
            stats.total_duration += match run.total_duration() {
                Ok(seconds) => seconds,
                Err(e) => {
                    tracing::warn!(date = %run.date, error = %e, "Aggregating incomplete activity");
                    run.recorded_duration()
                }
            };

            if let Some(evaluation) = run.evaluation {
                evaluation_sum += u64::from(evaluation);
                evaluated += 1;
            }

            oldest = Some(oldest.map_or(run.date, |d| d.min(run.date)));
            latest = Some(latest.map_or(run.date, |d| d.max(run.date)));
        }

        if stats.count > 0 {
            stats.average_distance = stats.total_distance / stats.count as f64;
            stats.average_duration = (stats.total_duration / stats.count as u64) as i64;
        }
        if evaluated > 0 {
            stats.average_evaluation = evaluation_sum as f64 / evaluated as f64;
        }
        if let (Some(oldest), Some(latest)) = (oldest, latest) {
            stats.oldest_date = oldest;
            stats.latest_date = latest;
        }

        stats
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunType, Segment};

    fn make_run(date: &str, distance: f64, duration: u32, evaluation: Option<u8>) -> Run {
        Run::new(
            None,
            RunType::EasyRun,
            date.parse().unwrap(),
            vec![Segment::timed(duration, distance)],
            None,
            evaluation,
            None,
        )
    }

    #[test]
    fn test_empty_sentinels() {
        let stats = RunsStats::from_runs(&[]);

        assert!(stats.is_empty());
        assert_eq!(stats.average_distance, -1.0);
        assert_eq!(stats.average_duration, -1);
        assert_eq!(stats.average_evaluation, -1.0);
        assert_eq!(stats.oldest_date, NaiveDate::MIN);
        assert_eq!(stats.latest_date, NaiveDate::MAX);
    }

    #[test]
    fn test_totals_and_averages() {
        let runs = vec![
            make_run("2024-01-10", 5.0, 1500, Some(6)),
            make_run("2024-01-15", 10.0, 3001, None),
            make_run("2024-01-12", 3.0, 900, Some(9)),
        ];

        let stats = RunsStats::from_runs(&runs);

        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_distance, 18.0);
        assert_eq!(stats.total_duration, 5401);
        assert_eq!(stats.average_distance, 6.0);
        assert_eq!(stats.average_duration, 1800); // integer division
        assert_eq!(stats.average_evaluation, 7.5); // only rated runs
        assert_eq!(stats.oldest_date, "2024-01-10".parse::<NaiveDate>().unwrap());
        assert_eq!(stats.latest_date, "2024-01-15".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn test_no_rated_runs() {
        let runs = vec![make_run("2024-06-01", 5.0, 1500, None)];
        let stats = RunsStats::from_runs(&runs);
        assert_eq!(stats.average_evaluation, -1.0);
    }
}
