// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::NaiveDate;
use running_diary::models::{Run, RunType, Segment, Terrain};

/// Parse a `YYYY-MM-DD` date.
#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

/// Single-segment run on `day`.
#[allow(dead_code)]
pub fn make_run(day: &str, run_type: RunType, distance: f64, duration: u32) -> Run {
    Run::new(
        None,
        run_type,
        date(day),
        vec![Segment::timed(duration, distance)],
        None,
        None,
        None,
    )
}

/// Run with every optional field filled in.
#[allow(dead_code)]
pub fn full_run() -> Run {
    Run::new(
        Some("Sunday long one".to_string()),
        RunType::LongRun,
        date("2024-03-17"),
        vec![
            Segment::new(1800, 6.2, Some(142), Some(172), Some(45)),
            Segment::new(2400, 8.05, Some(151), None, Some(-12)),
            Segment::new(615, 1.5, None, Some(180), None),
        ],
        Some(Terrain::Dirt),
        Some(8),
        Some("Windy, 12 °C.\nLeft calf tight after 10 km; 100% effort & happy".to_string()),
    )
}
