// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Line-oriented save file codec.
//!
//! Each activity is one record, one field per line, in this order:
//!
//! ```text
//! label                 (empty if absent)
//! type display name
//! date as epoch day
//! segment count
//!   duration seconds    \
//!   distance             |
//!   heart rate           | repeated segment-count times
//!   cadence              |
//!   elevation           /
//! terrain display name  (empty if absent)
//! evaluation
//! note                  (form-URL-encoded, empty if absent)
//! ```
//!
//! Records follow each other with no separator. Absent numeric values use
//! the sentinels `-1` (heart rate, cadence, evaluation) and `i32::MIN`
//! (elevation).

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{DiaryError, Result, ValidationError};
use crate::models::segment::{ELEVATION_NOT_RECORDED, NOT_RECORDED, SECONDS_PER_DAY};
use crate::models::{Run, RunType, Segment, Terrain};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Encode activities into `writer`.
pub fn encode<'a, W: Write>(runs: impl IntoIterator<Item = &'a Run>, writer: &mut W) -> Result<()> {
    for run in runs {
        if !run.has_single_line_label() {
            return Err(ValidationError::MultilineLabel.into());
        }
        let run_type = run.run_type.map(RunType::display_name).unwrap_or("");
        let terrain = run.terrain.map(Terrain::display_name).unwrap_or("");

        writeln!(writer, "{}", run.label.as_deref().unwrap_or(""))?;
        writeln!(writer, "{}", run_type)?;
        writeln!(writer, "{}", to_epoch_day(run.date))?;
        writeln!(writer, "{}", run.segments.len())?;
        for (index, segment) in run.segments.iter().enumerate() {
            let duration = segment
                .duration
                .ok_or(DiaryError::IncompleteData { segment: index })?;
            writeln!(writer, "{}", duration)?;
            writeln!(writer, "{:?}", segment.distance)?;
            writeln!(writer, "{}", segment.heart_rate_sentinel())?;
            writeln!(writer, "{}", segment.cadence_sentinel())?;
            writeln!(writer, "{}", segment.elevation_sentinel())?;
        }
        writeln!(writer, "{}", terrain)?;
        writeln!(writer, "{}", run.evaluation_sentinel())?;
        writeln!(writer, "{}", run.note.as_deref().map(encode_note).unwrap_or_default())?;
    }
    writer.flush()?;
    Ok(())
}

/// Encode activities into a string.
pub fn encode_to_string<'a>(runs: impl IntoIterator<Item = &'a Run>) -> Result<String> {
    let mut buffer = Vec::new();
    encode(runs, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| DiaryError::format(0, e.to_string()))
}

/// Decode every record in `reader`. Fails without partial results.
pub fn decode<R: BufRead>(reader: R) -> Result<Vec<Run>> {
    let mut lines = Lines::new(reader);
    let mut runs = Vec::new();

    while let Some(label) = lines.next_line()? {
        runs.push(decode_record(label, &mut lines)?);
    }

    Ok(runs)
}

/// Decode records from a string.
pub fn decode_str(data: &str) -> Result<Vec<Run>> {
    decode(data.as_bytes())
}

fn decode_record<R: BufRead>(label: String, lines: &mut Lines<R>) -> Result<Run> {
    let start = lines.line;

    let type_token = lines.field("type")?;
    let run_type = RunType::from_display_name(&type_token);
    if run_type.is_none() {
        tracing::warn!(line = lines.line, token = %type_token, "Unknown activity type, stored as absent");
    }

    let epoch_day: i64 = lines.parse("date")?;
    let date = from_epoch_day(epoch_day)
        .ok_or_else(|| DiaryError::format(lines.line, format!("date out of range: {}", epoch_day)))?;

    let segment_count: usize = lines.parse("segment count")?;
    if segment_count == 0 {
        return Err(DiaryError::format(lines.line, "activity has no segments"));
    }

    let mut segments = Vec::with_capacity(segment_count.min(1024));
    for _ in 0..segment_count {
        segments.push(decode_segment(lines)?);
    }

    let terrain_token = lines.field("terrain")?;
    let terrain = Terrain::from_display_name(&terrain_token);
    if terrain.is_none() && !terrain_token.is_empty() {
        tracing::warn!(line = lines.line, token = %terrain_token, "Unknown terrain, stored as absent");
    }

    let evaluation = match lines.parse::<i32>("evaluation")? {
        NOT_RECORDED => None,
        value @ 0..=10 => Some(value as u8),
        value => {
            return Err(DiaryError::format(
                lines.line,
                format!("evaluation out of range: {}", value),
            ))
        }
    };

    let note_line = lines.field("note")?;
    let note = decode_note(&note_line).map_err(|e| DiaryError::format(lines.line, e))?;

    tracing::trace!(line = start, segments = segment_count, "Decoded activity");

    Ok(Run {
        label: Some(label).filter(|l| !l.is_empty()),
        run_type,
        date,
        segments,
        terrain,
        evaluation,
        note: Some(note).filter(|n| !n.is_empty()),
    })
}

fn decode_segment<R: BufRead>(lines: &mut Lines<R>) -> Result<Segment> {
    let duration: u32 = lines.parse("duration")?;
    if duration >= SECONDS_PER_DAY {
        return Err(DiaryError::format(
            lines.line,
            format!("duration out of range: {}", duration),
        ));
    }

    let distance: f64 = lines.parse("distance")?;
    if !distance.is_finite() || distance <= 0.0 {
        return Err(DiaryError::format(
            lines.line,
            format!("distance must be positive: {}", distance),
        ));
    }

    let heart_rate = lines.optional_positive("heart rate")?;
    let cadence = lines.optional_positive("cadence")?;
    let elevation = match lines.parse::<i32>("elevation")? {
        ELEVATION_NOT_RECORDED => None,
        value => Some(value),
    };

    Ok(Segment {
        duration: Some(duration),
        distance,
        heart_rate,
        cadence,
        elevation,
    })
}

/// Form-URL-encode a note: UTF-8 percent encoding with spaces as `+`.
fn encode_note(note: &str) -> String {
    urlencoding::encode(note).replace("%20", "+")
}

/// Inverse of [`encode_note`]; also accepts `%20` for spaces.
fn decode_note(line: &str) -> std::result::Result<String, String> {
    let spaced = line.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|note| note.into_owned())
        .map_err(|e| format!("invalid note encoding: {}", e))
}

fn to_epoch_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

fn from_epoch_day(day: i64) -> Option<NaiveDate> {
    let days_from_ce = i32::try_from(day.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days_from_ce)
}

/// Line reader that knows what it expected when the input ends.
struct Lines<R> {
    reader: R,
    /// 1-based number of the last line read
    line: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let mut buffer = String::new();
        let read = self.reader.read_line(&mut buffer).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => DiaryError::format(self.line + 1, "invalid UTF-8"),
            _ => e.into(),
        })?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;
        if buffer.ends_with('\n') {
            buffer.pop();
            if buffer.ends_with('\r') {
                buffer.pop();
            }
        }
        Ok(Some(buffer))
    }

    fn field(&mut self, name: &str) -> Result<String> {
        self.next_line()?.ok_or_else(|| {
            DiaryError::format(self.line + 1, format!("file ends before {}", name))
        })
    }

    fn parse<T>(&mut self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.field(name)?;
        raw.trim().parse().map_err(|e| {
            DiaryError::format(self.line, format!("invalid {} '{}': {}", name, raw, e))
        })
    }

    /// `-1` is "not recorded", anything else must be a positive value.
    fn optional_positive(&mut self, name: &str) -> Result<Option<u32>> {
        match self.parse::<i64>(name)? {
            value if value == i64::from(NOT_RECORDED) => Ok(None),
            value => u32::try_from(value)
                .ok()
                .filter(|v| *v > 0)
                .map(Some)
                .ok_or_else(|| {
                    DiaryError::format(self.line, format!("{} out of range: {}", name, value))
                }),
        }
    }
}
