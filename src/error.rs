// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the diary engine.

use crate::db::RunId;

/// Engine error type.
#[derive(Debug, thiserror::Error)]
pub enum DiaryError {
    /// Save file could not be decoded. `line` is 1-based.
    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A derived metric needed a segment duration that is not set.
    #[error("Incomplete data: segment {segment} has no duration")]
    IncompleteData { segment: usize },

    #[error("Invalid activity: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown activity: {0}")]
    UnknownRun(RunId),

    #[error("Edit session is not open")]
    SessionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiaryError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        DiaryError::Format {
            line,
            message: message.into(),
        }
    }

    /// Whether this error came from decoding the save file.
    pub fn is_format_error(&self) -> bool {
        matches!(self, DiaryError::Format { .. })
    }
}

/// Rejections raised by the editing workflow before a commit.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Recorded activity cannot happen in future")]
    FutureDate,

    #[error("You need to fill in run activity segments")]
    NoSegments,

    #[error("All segment durations must be filled in (segment {segment})")]
    MissingDuration { segment: usize },

    #[error("Activity type must be selected")]
    MissingType,

    #[error("Label must fit on one line")]
    MultilineLabel,

    #[error("Field out of range: {0}")]
    Fields(#[from] validator::ValidationErrors),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, DiaryError>;
