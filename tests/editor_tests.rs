// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Editing workflow: working copies, commit validation and session tracking.

use running_diary::db::RunCollection;
use running_diary::error::{DiaryError, ValidationError};
use running_diary::models::{RunType, Segment};
use running_diary::services::{EditSession, OpenEdits, RunsSet, Window};

mod common;
use common::{date, make_run};

fn today() -> chrono::NaiveDate {
    date("2024-06-01")
}

#[test]
fn test_new_activity_defaults() {
    let session = EditSession::new_activity(today());

    assert!(session.is_new());
    assert!(!session.is_changed());
    assert_eq!(session.draft.run_type, Some(RunType::EasyRun));
    assert_eq!(session.draft.date, today());
    assert_eq!(session.draft.segments, vec![Segment::default()]);
}

#[test]
fn test_blank_segment_must_be_filled_before_commit() {
    let mut collection = RunCollection::new();
    let mut session = EditSession::new_activity(today());

    let err = session.commit(&mut collection, today()).unwrap_err();
    assert!(matches!(
        err,
        DiaryError::Validation(ValidationError::MissingDuration { segment: 0 })
    ));
    assert!(collection.is_empty());

    session.draft.segments[0].duration = Some(1500);
    let id = session.commit(&mut collection, today()).unwrap();
    assert_eq!(collection.len(), 1);
    assert_eq!(session.original(), Some(id));
    assert!(!session.is_changed());
}

#[test]
fn test_future_date_is_rejected() {
    let mut collection = RunCollection::new();
    let mut session = EditSession::new_activity(today());
    session.draft.segments[0].duration = Some(1500);
    session.draft.date = date("2024-06-02");

    let err = session.commit(&mut collection, today()).unwrap_err();
    assert!(matches!(
        err,
        DiaryError::Validation(ValidationError::FutureDate)
    ));
    assert!(collection.is_empty());
}

#[test]
fn test_out_of_range_field_is_rejected() {
    let mut collection = RunCollection::new();
    let mut session = EditSession::new_activity(today());
    session.draft.segments[0].duration = Some(1500);
    session.draft.evaluation = Some(11);

    let err = session.commit(&mut collection, today()).unwrap_err();
    assert!(matches!(
        err,
        DiaryError::Validation(ValidationError::Fields(_))
    ));
}

#[test]
fn test_edit_works_on_copy_until_commit() {
    let mut collection = RunCollection::new();
    let view = RunsSet::attach(&mut collection, Window::all_time());
    let id = collection.add(make_run("2024-05-30", RunType::EasyRun, 5.0, 1500));

    let mut session = EditSession::edit(&collection, id).unwrap();
    session.draft.segments[0].distance = 7.5;
    assert!(session.is_changed());
    assert_eq!(collection.get(id).unwrap().run.total_distance(), 5.0);
    assert_eq!(view.borrow().total_distance(), 5.0);

    let new_id = session.commit(&mut collection, today()).unwrap();
    assert_ne!(new_id, id);
    assert!(collection.get(id).is_none());
    assert_eq!(collection.get(new_id).unwrap().run.total_distance(), 7.5);
    assert_eq!(view.borrow().total_distance(), 7.5);
}

#[test]
fn test_revert_restores_baseline() {
    let mut collection = RunCollection::new();
    let id = collection.add(make_run("2024-05-30", RunType::EasyRun, 5.0, 1500));

    let mut session = EditSession::edit(&collection, id).unwrap();
    session.draft.label = Some("Changed".to_string());
    session.revert();

    assert!(!session.is_changed());
    assert_eq!(session.draft.label, None);
}

#[test]
fn test_open_returns_existing_session() {
    let mut collection = RunCollection::new();
    let id = collection.add(make_run("2024-05-30", RunType::EasyRun, 5.0, 1500));
    let mut edits = OpenEdits::new();

    let first = edits.open(&collection, id).unwrap();
    let second = edits.open(&collection, id).unwrap();
    assert_eq!(first, second);
    assert_eq!(edits.len(), 1);
    assert_eq!(edits.session_for(id), Some(first));
}

#[test]
fn test_commit_rekeys_session() {
    let mut collection = RunCollection::new();
    let id = collection.add(make_run("2024-05-30", RunType::EasyRun, 5.0, 1500));
    let mut edits = OpenEdits::new();

    let session = edits.open(&collection, id).unwrap();
    edits.get_mut(session).unwrap().draft.run_type = Some(RunType::Hills);
    assert_eq!(edits.unsaved(), vec![session]);

    let new_id = edits.commit(session, &mut collection, today()).unwrap();
    assert_eq!(edits.session_for(id), None);
    assert_eq!(edits.session_for(new_id), Some(session));
    assert!(edits.unsaved().is_empty());
    assert_eq!(edits.open(&collection, new_id).unwrap(), session);
}

#[test]
fn test_new_session_is_tracked_after_commit() {
    let mut collection = RunCollection::new();
    let mut edits = OpenEdits::new();

    let session = edits.open_new(today());
    edits.get_mut(session).unwrap().draft.segments[0].duration = Some(900);
    let id = edits.commit(session, &mut collection, today()).unwrap();

    assert_eq!(edits.session_for(id), Some(session));
    assert!(edits.get(session).is_some_and(|s| !s.is_new()));
}

#[test]
fn test_delete_removes_activity_and_session() {
    let mut collection = RunCollection::new();
    let id = collection.add(make_run("2024-05-30", RunType::EasyRun, 5.0, 1500));
    let mut edits = OpenEdits::new();

    let session = edits.open(&collection, id).unwrap();
    let removed = edits.delete(session, &mut collection).unwrap();

    assert_eq!(removed.id, id);
    assert!(collection.is_empty());
    assert!(edits.is_empty());
    assert!(matches!(
        edits.commit(session, &mut collection, today()),
        Err(DiaryError::SessionClosed)
    ));
}

#[test]
fn test_close_discards_changes() {
    let mut collection = RunCollection::new();
    let id = collection.add(make_run("2024-05-30", RunType::EasyRun, 5.0, 1500));
    let mut edits = OpenEdits::new();

    let session = edits.open(&collection, id).unwrap();
    edits.get_mut(session).unwrap().draft.segments[0].distance = 9.0;
    let closed = edits.close(session).unwrap();

    assert!(closed.is_changed());
    assert_eq!(collection.get(id).unwrap().run.total_distance(), 5.0);
    assert!(edits.session_for(id).is_none());
}

#[test]
fn test_editing_unknown_run_fails() {
    let mut collection = RunCollection::new();
    let id = collection.add(make_run("2024-05-30", RunType::EasyRun, 5.0, 1500));
    collection.remove(id);

    assert!(matches!(
        EditSession::edit(&collection, id),
        Err(DiaryError::UnknownRun(missing)) if missing == id
    ));
}

#[test]
fn test_multiline_label_is_rejected() {
    let mut collection = RunCollection::new();
    let mut edits = OpenEdits::new();

    let session = edits.open_new(today());
    {
        let draft = &mut edits.get_mut(session).unwrap().draft;
        draft.segments[0].duration = Some(1500);
        draft.label = Some("Morning\nrun".to_string());
    }

    let err = edits.commit(session, &mut collection, today()).unwrap_err();
    assert!(matches!(
        err,
        DiaryError::Validation(ValidationError::MultilineLabel)
    ));
    assert!(collection.is_empty());

    edits.get_mut(session).unwrap().draft.label = Some("Morning run".to_string());
    assert!(edits.commit(session, &mut collection, today()).is_ok());
}
