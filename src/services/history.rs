// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Year → month → type grouping used to browse the activity history.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Datelike, Month};

use crate::db::{CollectionChange, CollectionObserver, RunCollection, RunEntry};
use crate::models::RunType;
use crate::services::runs_set::{RunsSet, Window};

/// Activities of one type within a month.
#[derive(Debug, Clone)]
pub struct TypeGroup {
    pub run_type: Option<RunType>,
    /// Activities in the order of the grouped collection
    pub runs: Vec<RunEntry>,
}

impl TypeGroup {
    pub fn display_name(&self) -> &'static str {
        self.run_type.map(RunType::display_name).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct MonthGroup {
    /// 1-12
    pub month: u32,
    /// Sorted by type display name
    pub types: Vec<TypeGroup>,
}

impl MonthGroup {
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("")
    }

    /// Activities with the type level omitted, in type order.
    pub fn flattened(&self) -> impl Iterator<Item = &RunEntry> {
        self.types.iter().flat_map(|t| t.runs.iter())
    }

    pub fn len(&self) -> usize {
        self.types.iter().map(|t| t.runs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct YearGroup {
    pub year: i32,
    /// Most recent month first
    pub months: Vec<MonthGroup>,
}

/// Grouped history, most recent year first.
#[derive(Debug, Clone, Default)]
pub struct HistoryTree {
    pub years: Vec<YearGroup>,
}

impl HistoryTree {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// First year, month and type group: the branch shown expanded.
    pub fn latest_path(&self) -> Option<(&YearGroup, &MonthGroup, &TypeGroup)> {
        let year = self.years.first()?;
        let month = year.months.first()?;
        let run_type = month.types.first()?;
        Some((year, month, run_type))
    }
}

/// Group `entries` by year, month and type.
///
/// Years and months are descending, types ascending by display name, and
/// activities keep their relative order from `entries`.
pub fn group_by_period<'a>(entries: impl IntoIterator<Item = &'a RunEntry>) -> HistoryTree {
    let entries: Vec<&RunEntry> = entries.into_iter().collect();

    let mut years: Vec<i32> = entries.iter().map(|e| e.run.date.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();

    let years = years
        .into_iter()
        .map(|year| {
            let in_year: Vec<&RunEntry> = entries
                .iter()
                .copied()
                .filter(|e| e.run.date.year() == year)
                .collect();

            let mut months: Vec<u32> = in_year.iter().map(|e| e.run.date.month()).collect();
            months.sort_unstable_by(|a, b| b.cmp(a));
            months.dedup();

            let months = months
                .into_iter()
                .map(|month| {
                    let in_month: Vec<&RunEntry> = in_year
                        .iter()
                        .copied()
                        .filter(|e| e.run.date.month() == month)
                        .collect();
                    MonthGroup {
                        month,
                        types: group_by_type(&in_month),
                    }
                })
                .collect();

            YearGroup { year, months }
        })
        .collect();

    HistoryTree { years }
}

fn group_by_type(entries: &[&RunEntry]) -> Vec<TypeGroup> {
    let mut types: Vec<Option<RunType>> = Vec::new();
    for entry in entries {
        if !types.contains(&entry.run.run_type) {
            types.push(entry.run.run_type);
        }
    }
    types.sort_by_key(|t| t.map(RunType::display_name).unwrap_or(""));

    types
        .into_iter()
        .map(|run_type| TypeGroup {
            run_type,
            runs: entries
                .iter()
                .filter(|e| e.run.run_type == run_type)
                .map(|e| (*e).clone())
                .collect(),
        })
        .collect()
}

/// History tree kept current with the master collection.
///
/// Grouping runs over an all-time view, so activities inside each bucket
/// are most recent first.
#[derive(Debug)]
pub struct HistoryView {
    all: RunsSet,
    tree: HistoryTree,
}

impl HistoryView {
    pub fn attach(collection: &mut RunCollection) -> Rc<RefCell<Self>> {
        let all = RunsSet::new(collection.entries(), Window::all_time());
        let tree = group_by_period(all.entries());
        let view = Rc::new(RefCell::new(Self { all, tree }));
        collection.subscribe(&view);
        view
    }

    pub fn tree(&self) -> &HistoryTree {
        &self.tree
    }

    /// The all-time set the tree is built from.
    pub fn all(&self) -> &RunsSet {
        &self.all
    }
}

impl CollectionObserver for HistoryView {
    fn on_change(&mut self, change: &CollectionChange) {
        self.all.apply(change);
        self.tree = group_by_period(self.all.entries());
    }
}
