// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! One continuous timed portion of a run.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Seconds in a day; segment durations stay strictly below it.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Distance of a freshly created blank segment (km).
pub const BLANK_DISTANCE_KM: f64 = 1.0;

/// Sentinel for heart rate, cadence, evaluation and averages that were not recorded.
pub const NOT_RECORDED: i32 = -1;

/// Sentinel for elevation that was not recorded. Elevation may be negative.
pub const ELEVATION_NOT_RECORDED: i32 = i32::MIN;

/// A run segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Segment {
    /// Elapsed seconds; `None` while the segment is still being filled in
    #[validate(range(max = 86_399))]
    pub duration: Option<u32>,
    /// Distance in kilometers
    #[validate(range(exclusive_min = 0.0))]
    pub distance: f64,
    /// Average heart rate (bpm)
    #[validate(range(min = 1))]
    pub heart_rate: Option<u32>,
    /// Average cadence (steps/min)
    #[validate(range(min = 1))]
    pub cadence: Option<u32>,
    /// Elevation gain in meters
    pub elevation: Option<i32>,
}

impl Default for Segment {
    /// Blank segment offered by the editor.
    fn default() -> Self {
        Self {
            duration: None,
            distance: BLANK_DISTANCE_KM,
            heart_rate: None,
            cadence: None,
            elevation: None,
        }
    }
}

impl Segment {
    pub fn new(
        duration: u32,
        distance: f64,
        heart_rate: Option<u32>,
        cadence: Option<u32>,
        elevation: Option<i32>,
    ) -> Self {
        Self {
            duration: Some(duration),
            distance,
            heart_rate,
            cadence,
            elevation,
        }
    }

    /// Segment with only duration and distance recorded.
    pub fn timed(duration: u32, distance: f64) -> Self {
        Self::new(duration, distance, None, None, None)
    }

    pub fn with_heart_rate(mut self, heart_rate: u32) -> Self {
        self.heart_rate = Some(heart_rate);
        self
    }

    pub fn heart_rate_sentinel(&self) -> i32 {
        self.heart_rate.map_or(NOT_RECORDED, |hr| hr as i32)
    }

    pub fn cadence_sentinel(&self) -> i32 {
        self.cadence.map_or(NOT_RECORDED, |c| c as i32)
    }

    pub fn elevation_sentinel(&self) -> i32 {
        self.elevation.unwrap_or(ELEVATION_NOT_RECORDED)
    }
}
