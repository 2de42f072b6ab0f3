// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity data models.

pub mod run;
pub mod segment;
pub mod stats;

pub use run::{Run, RunType, Terrain, UNLABELED_ACTIVITY_LABEL};
pub use segment::Segment;
pub use stats::RunsStats;
