// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Date-windowed live view over the master collection.
//!
//! A `RunsSet` keeps the activities whose date falls in its window, most
//! recent first, and the aggregates over them. Attached to a
//! [`RunCollection`] it is updated synchronously on every change.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::db::{CollectionChange, CollectionObserver, RunCollection, RunEntry, RunId};
use crate::models::{Run, RunsStats};

/// Inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Window {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Window covering every representable date.
    pub fn all_time() -> Self {
        Self::new(NaiveDate::MIN, NaiveDate::MAX)
    }

    /// `[today - days, today]`.
    pub fn recent(today: NaiveDate, days: u32) -> Self {
        let from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self::new(from, today)
    }

    /// Membership test with one day of slack before `from`:
    /// `from - 1 day <= date < to + 1 day`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let after_start = self.from.pred_opt().map_or(true, |start| date >= start);
        let before_end = self.to.succ_opt().map_or(true, |end| date < end);
        after_start && before_end
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::all_time()
    }
}

/// Windowed projection of the master collection with derived aggregates.
#[derive(Debug, Clone)]
pub struct RunsSet {
    window: Window,
    members: Vec<RunEntry>,
    stats: RunsStats,
}

impl RunsSet {
    /// Build a detached view from a snapshot of entries.
    pub fn new<'a>(entries: impl IntoIterator<Item = &'a RunEntry>, window: Window) -> Self {
        let members = entries
            .into_iter()
            .filter(|e| window.contains(e.run.date))
            .cloned()
            .collect();

        let mut set = Self {
            window,
            members,
            stats: RunsStats::default(),
        };
        set.sort_and_recompute();
        set
    }

    /// Build a view over `collection` and keep it in sync.
    pub fn attach(collection: &mut RunCollection, window: Window) -> Rc<RefCell<Self>> {
        let set = Rc::new(RefCell::new(Self::new(collection.entries(), window)));
        collection.subscribe(&set);
        set
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Members, most recent first.
    pub fn entries(&self) -> &[RunEntry] {
        &self.members
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.members.iter().map(|e| e.run.as_ref())
    }

    pub fn contains(&self, id: RunId) -> bool {
        self.members.iter().any(|e| e.id == id)
    }

    /// Aggregates with their sentinel values, as handed to the presentation layer.
    pub fn stats(&self) -> &RunsStats {
        &self.stats
    }

    pub fn count(&self) -> usize {
        self.stats.count
    }

    pub fn total_distance(&self) -> f64 {
        self.stats.total_distance
    }

    pub fn total_duration(&self) -> u64 {
        self.stats.total_duration
    }

    pub fn average_distance(&self) -> Option<f64> {
        (!self.stats.is_empty()).then_some(self.stats.average_distance)
    }

    pub fn average_duration(&self) -> Option<u64> {
        u64::try_from(self.stats.average_duration).ok()
    }

    pub fn average_evaluation(&self) -> Option<f64> {
        (self.stats.average_evaluation >= 0.0).then_some(self.stats.average_evaluation)
    }

    pub fn oldest_date(&self) -> Option<NaiveDate> {
        (!self.stats.is_empty()).then_some(self.stats.oldest_date)
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        (!self.stats.is_empty()).then_some(self.stats.latest_date)
    }

    /// Apply one batched change from the master collection.
    pub fn apply(&mut self, change: &CollectionChange) {
        let window = self.window;

        let removed: HashSet<RunId> = change
            .removed
            .iter()
            .filter(|e| window.contains(e.run.date))
            .map(|e| e.id)
            .collect();
        if !removed.is_empty() {
            self.members.retain(|e| !removed.contains(&e.id));
        }

        self.members.extend(
            change
                .added
                .iter()
                .filter(|e| window.contains(e.run.date))
                .cloned(),
        );

        self.sort_and_recompute();
    }

    fn sort_and_recompute(&mut self) {
        // stable: same-day activities keep their relative order
        self.members.sort_by(|a, b| b.run.date.cmp(&a.run.date));
        self.stats = RunsStats::from_runs(self.runs());

        tracing::debug!(
            from = %self.window.from,
            to = %self.window.to,
            count = self.stats.count,
            "Recomputed activity set"
        );
    }
}

impl CollectionObserver for RunsSet {
    fn on_change(&mut self, change: &CollectionChange) {
        self.apply(change);
    }
}
