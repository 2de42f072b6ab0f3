// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run activity model and its derived metrics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::error::{DiaryError, Result, ValidationError};
use crate::models::segment::{Segment, NOT_RECORDED};
use crate::time_utils::{format_date_medium, format_duration_hm};

/// Placeholder shown for activities without a label.
pub const UNLABELED_ACTIVITY_LABEL: &str = "Unlabeled Activity";

/// Kind of run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunType {
    EasyRun,
    LongRun,
    SteadyRun,
    IntervalRun,
    Hills,
    Fartlek,
    Race,
}

impl RunType {
    pub const ALL: [RunType; 7] = [
        RunType::EasyRun,
        RunType::LongRun,
        RunType::SteadyRun,
        RunType::IntervalRun,
        RunType::Hills,
        RunType::Fartlek,
        RunType::Race,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            RunType::EasyRun => "Easy Run",
            RunType::LongRun => "Long Run",
            RunType::SteadyRun => "Steady Run",
            RunType::IntervalRun => "Interval Run",
            RunType::Hills => "Hills",
            RunType::Fartlek => "Fartlek",
            RunType::Race => "Race",
        }
    }

    /// Exact match on the display name.
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.display_name() == name)
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Surface the run happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Asphalt,
    Dirt,
    Mix,
}

impl Terrain {
    pub const ALL: [Terrain; 3] = [Terrain::Asphalt, Terrain::Dirt, Terrain::Mix];

    pub fn display_name(self) -> &'static str {
        match self {
            Terrain::Asphalt => "Asphalt",
            Terrain::Dirt => "Dirt",
            Terrain::Mix => "Mix",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.display_name() == name)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One recorded activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Run {
    /// Free-text label
    pub label: Option<String>,
    /// Activity type (absent only when the save file carried an unknown token)
    pub run_type: Option<RunType>,
    /// Calendar date of the activity
    pub date: NaiveDate,
    /// Segments in chronological order
    #[validate(nested)]
    pub segments: Vec<Segment>,
    pub terrain: Option<Terrain>,
    /// Self-evaluation, 0-10
    #[validate(range(max = 10))]
    pub evaluation: Option<u8>,
    /// Free-text note, may span lines
    pub note: Option<String>,
}

impl Run {
    /// Create a run. Empty label and note are stored as absent.
    pub fn new(
        label: Option<String>,
        run_type: RunType,
        date: NaiveDate,
        segments: Vec<Segment>,
        terrain: Option<Terrain>,
        evaluation: Option<u8>,
        note: Option<String>,
    ) -> Self {
        Self {
            label: label.filter(|l| !l.is_empty()),
            run_type: Some(run_type),
            date,
            segments,
            terrain,
            evaluation,
            note: note.filter(|n| !n.is_empty()),
        }
    }

    /// Fresh activity for the editor: an Easy Run today with one blank segment.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            label: None,
            run_type: Some(RunType::EasyRun),
            date: today,
            segments: vec![Segment::default()],
            terrain: None,
            evaluation: None,
            note: None,
        }
    }

    /// Deep copy with independent segments, used as an editable working copy.
    pub fn copy(&self) -> Self {
        Self {
            label: self.label.clone(),
            run_type: self.run_type,
            date: self.date,
            segments: self.segments.to_vec(),
            terrain: self.terrain,
            evaluation: self.evaluation,
            note: self.note.clone(),
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(UNLABELED_ACTIVITY_LABEL)
    }

    /// The save file keeps the label on one line; CR and LF cannot be stored.
    pub fn has_single_line_label(&self) -> bool {
        self.label
            .as_deref()
            .map_or(true, |l| !l.contains(['\n', '\r']))
    }

    /// Sum of segment durations in seconds.
    pub fn total_duration(&self) -> Result<u64> {
        self.segments
            .iter()
            .enumerate()
            .try_fold(0u64, |total, (index, segment)| {
                segment
                    .duration
                    .map(|d| total + u64::from(d))
                    .ok_or(DiaryError::IncompleteData { segment: index })
            })
    }

    /// Sum of the durations that are set; used where failing is not an option.
    pub(crate) fn recorded_duration(&self) -> u64 {
        self.segments
            .iter()
            .filter_map(|s| s.duration)
            .map(u64::from)
            .sum()
    }

    /// Sum of segment distances in kilometers.
    pub fn total_distance(&self) -> f64 {
        self.segments.iter().map(|s| s.distance).sum()
    }

    /// Seconds per kilometer, truncated. `None` when the distance is not positive.
    pub fn pace(&self) -> Result<Option<u64>> {
        let seconds = self.total_duration()?;
        let distance = self.total_distance();
        if distance > 0.0 {
            Ok(Some((seconds as f64 / distance) as u64))
        } else {
            Ok(None)
        }
    }

    /// Duration-weighted heart rate over segments that recorded one.
    pub fn average_heart_rate(&self) -> Result<Option<u32>> {
        let mut weighted: u64 = 0;
        let mut seconds: u64 = 0;

        for (index, segment) in self.segments.iter().enumerate() {
            let Some(hr) = segment.heart_rate else {
                continue;
            };
            let duration = segment
                .duration
                .ok_or(DiaryError::IncompleteData { segment: index })?;
            weighted += u64::from(hr) * u64::from(duration);
            seconds += u64::from(duration);
        }

        if seconds == 0 {
            return Ok(None);
        }
        Ok(Some((weighted / seconds) as u32))
    }

    /// Average heart rate with `-1` standing for "not recorded".
    pub fn average_heart_rate_sentinel(&self) -> Result<i32> {
        Ok(self
            .average_heart_rate()?
            .map_or(NOT_RECORDED, |hr| hr as i32))
    }

    pub fn evaluation_sentinel(&self) -> i32 {
        self.evaluation.map_or(NOT_RECORDED, i32::from)
    }

    /// Checks applied by the editing workflow before a commit.
    pub fn validate_for_save(&self, today: NaiveDate) -> std::result::Result<(), ValidationError> {
        if self.date > today {
            return Err(ValidationError::FutureDate);
        }
        if self.segments.is_empty() {
            return Err(ValidationError::NoSegments);
        }
        if let Some(segment) = self.segments.iter().position(|s| s.duration.is_none()) {
            return Err(ValidationError::MissingDuration { segment });
        }
        if self.run_type.is_none() {
            return Err(ValidationError::MissingType);
        }
        if !self.has_single_line_label() {
            return Err(ValidationError::MultilineLabel);
        }
        self.validate()?;
        Ok(())
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12}  Distance:  {:5.2} km  Duration:  {} h",
            format_date_medium(self.date),
            self.total_distance(),
            format_duration_hm(self.recorded_duration())
        )
    }
}
