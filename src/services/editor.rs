// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Editing workflow.
//!
//! An edit always works on a deep copy of the stored activity. Committing
//! validates the draft and swaps it into the collection in one change;
//! discarding simply drops the session.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::db::{RunCollection, RunEntry, RunId};
use crate::error::{DiaryError, Result};
use crate::models::Run;

/// One open edit.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Option<RunId>,
    baseline: Run,
    /// Working copy, freely mutable until committed
    pub draft: Run,
}

impl EditSession {
    /// Session for an activity that does not exist yet.
    pub fn new_activity(today: NaiveDate) -> Self {
        let blank = Run::blank(today);
        Self {
            original: None,
            draft: blank.copy(),
            baseline: blank,
        }
    }

    /// Session editing a copy of a stored activity.
    pub fn edit(collection: &RunCollection, id: RunId) -> Result<Self> {
        let entry = collection.get(id).ok_or(DiaryError::UnknownRun(id))?;
        Ok(Self::from_entry(entry))
    }

    fn from_entry(entry: &RunEntry) -> Self {
        Self {
            original: Some(entry.id),
            baseline: entry.run.copy(),
            draft: entry.run.copy(),
        }
    }

    /// Stored activity this session edits, if it was committed before.
    pub fn original(&self) -> Option<RunId> {
        self.original
    }

    pub fn is_new(&self) -> bool {
        self.original.is_none()
    }

    /// Whether the draft differs from what was loaded or last committed.
    pub fn is_changed(&self) -> bool {
        self.draft != self.baseline
    }

    /// Drop uncommitted changes.
    pub fn revert(&mut self) {
        self.draft = self.baseline.copy();
    }

    /// Validate the draft and store it, replacing the original.
    ///
    /// Returns the id of the stored activity. On error nothing changes.
    pub fn commit(&mut self, collection: &mut RunCollection, today: NaiveDate) -> Result<RunId> {
        self.draft.validate_for_save(today)?;

        let committed = self.draft.copy();
        let id = match self.original {
            Some(original) => collection.replace(original, committed)?,
            None => collection.add(committed),
        };

        tracing::info!(id = %id, label = self.draft.display_label(), "Activity saved");
        self.original = Some(id);
        self.baseline = self.draft.copy();
        Ok(id)
    }
}

/// Identity of an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

/// All open edit sessions, indexed by the activity they edit.
#[derive(Debug, Default)]
pub struct OpenEdits {
    sessions: HashMap<SessionId, EditSession>,
    by_run: HashMap<RunId, SessionId>,
    next_id: u64,
}

impl OpenEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_new(&mut self, today: NaiveDate) -> SessionId {
        self.insert(EditSession::new_activity(today))
    }

    /// Open `run`, or return the session already editing it.
    pub fn open(&mut self, collection: &RunCollection, run: RunId) -> Result<SessionId> {
        if let Some(session) = self.by_run.get(&run) {
            return Ok(*session);
        }
        let session = EditSession::edit(collection, run)?;
        let id = self.insert(session);
        self.by_run.insert(run, id);
        Ok(id)
    }

    pub fn get(&self, id: SessionId) -> Option<&EditSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut EditSession> {
        self.sessions.get_mut(&id)
    }

    pub fn session_for(&self, run: RunId) -> Option<SessionId> {
        self.by_run.get(&run).copied()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Commit a session and re-key it to the stored activity's new id.
    pub fn commit(
        &mut self,
        id: SessionId,
        collection: &mut RunCollection,
        today: NaiveDate,
    ) -> Result<RunId> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(DiaryError::SessionClosed)?;
        let previous = session.original();
        let run = session.commit(collection, today)?;

        if let Some(previous) = previous {
            self.by_run.remove(&previous);
        }
        self.by_run.insert(run, id);
        Ok(run)
    }

    /// Close a session, discarding uncommitted changes.
    pub fn close(&mut self, id: SessionId) -> Option<EditSession> {
        let session = self.sessions.remove(&id)?;
        if let Some(run) = session.original() {
            self.by_run.remove(&run);
        }
        Some(session)
    }

    /// Delete the stored activity behind a session and close it.
    pub fn delete(&mut self, id: SessionId, collection: &mut RunCollection) -> Option<RunEntry> {
        let session = self.close(id)?;
        let removed = collection.remove(session.original()?)?;
        tracing::info!(id = %removed.id, label = removed.run.display_label(), "Activity deleted");
        Some(removed)
    }

    /// Sessions holding uncommitted changes.
    pub fn unsaved(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|(_, s)| s.is_changed())
            .map(|(id, _)| *id)
            .collect();
        ids.sort_by_key(|id| id.0);
        ids
    }

    fn insert(&mut self, session: EditSession) -> SessionId {
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.sessions.insert(id, session);
        id
    }
}
