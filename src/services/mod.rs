// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - derived views and workflows over the master collection.

pub mod editor;
pub mod history;
pub mod runs_set;
pub mod statistics;

pub use editor::{EditSession, OpenEdits, SessionId};
pub use history::{group_by_period, HistoryTree, HistoryView, MonthGroup, TypeGroup, YearGroup};
pub use runs_set::{RunsSet, Window};
pub use statistics::{series, type_breakdown, Metric, SeriesPoint, Timeframe};
