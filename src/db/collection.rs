// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Master activity collection with synchronous change notification.
//!
//! Every derived read-model (windowed views, the history tree) registers as
//! an observer and is brought up to date before the mutating call returns.
//! The collection is single-threaded: observers live in `Rc<RefCell<_>>`
//! and must not be borrowed while the collection is being mutated.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::error::{DiaryError, Result};
use crate::models::Run;

/// Synthetic identity assigned to an activity when it enters the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RunId(u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// An activity together with its identity. Cloning shares the run.
#[derive(Debug, Clone)]
pub struct RunEntry {
    pub id: RunId,
    pub run: Rc<Run>,
}

/// One batched structural change.
#[derive(Debug, Default)]
pub struct CollectionChange {
    pub removed: Vec<RunEntry>,
    pub added: Vec<RunEntry>,
}

impl CollectionChange {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Receives every change made to a [`RunCollection`].
pub trait CollectionObserver {
    fn on_change(&mut self, change: &CollectionChange);
}

/// The master activity collection.
#[derive(Default)]
pub struct RunCollection {
    entries: Vec<RunEntry>,
    next_id: u64,
    observers: Vec<Weak<RefCell<dyn CollectionObserver>>>,
}

impl RunCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. It is held weakly and dropped from the list
    /// once its last strong reference goes away.
    pub fn subscribe<O>(&mut self, observer: &Rc<RefCell<O>>)
    where
        O: CollectionObserver + 'static,
    {
        let observer: Rc<RefCell<dyn CollectionObserver>> = observer.clone();
        self.observers.push(Rc::downgrade(&observer));
    }

    pub fn entries(&self) -> &[RunEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Run> {
        self.entries.iter().map(|e| e.run.as_ref())
    }

    pub fn get(&self, id: RunId) -> Option<&RunEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add one activity.
    pub fn add(&mut self, run: Run) -> RunId {
        let entry = self.make_entry(run);
        let id = entry.id;
        self.entries.push(entry.clone());
        self.notify(CollectionChange {
            removed: Vec::new(),
            added: vec![entry],
        });
        id
    }

    /// Add several activities as one change.
    pub fn add_all(&mut self, runs: Vec<Run>) -> Vec<RunId> {
        let added: Vec<RunEntry> = runs.into_iter().map(|r| self.make_entry(r)).collect();
        let ids = added.iter().map(|e| e.id).collect();
        self.entries.extend(added.iter().cloned());
        self.notify(CollectionChange {
            removed: Vec::new(),
            added,
        });
        ids
    }

    /// Remove one activity. Unknown ids are a no-op.
    pub fn remove(&mut self, id: RunId) -> Option<RunEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(index);
        self.notify(CollectionChange {
            removed: vec![entry.clone()],
            added: Vec::new(),
        });
        Some(entry)
    }

    /// Replace an activity with a new version in one change.
    ///
    /// The replacement gets a new id; callers tracking the old one re-key.
    pub fn replace(&mut self, id: RunId, run: Run) -> Result<RunId> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(DiaryError::UnknownRun(id))?;
        let removed = self.entries.remove(index);
        let entry = self.make_entry(run);
        let new_id = entry.id;
        self.entries.push(entry.clone());

        tracing::debug!(old = %id, new = %new_id, "Replaced activity");
        self.notify(CollectionChange {
            removed: vec![removed],
            added: vec![entry],
        });
        Ok(new_id)
    }

    /// Swap the whole content for `runs` in one change.
    pub fn replace_all(&mut self, runs: Vec<Run>) -> Vec<RunId> {
        let removed = std::mem::take(&mut self.entries);
        let added: Vec<RunEntry> = runs.into_iter().map(|r| self.make_entry(r)).collect();
        let ids = added.iter().map(|e| e.id).collect();
        self.entries = added.clone();
        self.notify(CollectionChange { removed, added });
        ids
    }

    fn make_entry(&mut self, run: Run) -> RunEntry {
        self.next_id += 1;
        RunEntry {
            id: RunId(self.next_id),
            run: Rc::new(run),
        }
    }

    fn notify(&mut self, change: CollectionChange) {
        if change.is_empty() {
            return;
        }
        self.observers.retain(|weak| match weak.upgrade() {
            Some(observer) => {
                observer.borrow_mut().on_change(&change);
                true
            }
            None => false,
        });
    }
}
