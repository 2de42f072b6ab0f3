// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Running Diary: record run activities and derive live statistics.
//!
//! This crate provides the activity model, the date-windowed aggregation
//! views kept in sync with the master collection, the history grouping,
//! and the save file codec.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;

use config::Config;
use db::{DiaryStore, RunCollection};
use services::{HistoryView, RunsSet, Window};

/// The master collection with the views the overview and history screens show.
pub struct Diary {
    pub config: Config,
    pub runs: RunCollection,
    pub store: DiaryStore,
    pub all: Rc<RefCell<RunsSet>>,
    pub recent: Rc<RefCell<RunsSet>>,
    pub history: Rc<RefCell<HistoryView>>,
}

impl Diary {
    /// Create an empty diary with its views attached.
    pub fn new(config: Config, today: NaiveDate) -> Self {
        let mut runs = RunCollection::new();
        let all = RunsSet::attach(&mut runs, Window::all_time());
        let recent = RunsSet::attach(&mut runs, Window::recent(today, config.recent_days));
        let history = HistoryView::attach(&mut runs);
        let store = DiaryStore::new(config.save_path.clone());

        Self {
            config,
            runs,
            store,
            all,
            recent,
            history,
        }
    }

    /// Load the save file into the master collection.
    pub fn load(&mut self) -> error::Result<usize> {
        self.store.load_into(&mut self.runs)
    }

    pub fn save(&self) -> error::Result<()> {
        self.store.save(&self.runs)
    }
}
