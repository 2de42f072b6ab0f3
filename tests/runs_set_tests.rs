// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Windowed aggregation views kept in sync with the master collection.

use chrono::NaiveDate;
use running_diary::db::RunCollection;
use running_diary::models::{RunType, RunsStats};
use running_diary::services::{RunsSet, Window};

mod common;
use common::{date, make_run};

fn january_window() -> Window {
    Window::new(date("2024-01-10"), date("2024-01-20"))
}

#[test]
fn test_boundary_membership() {
    let mut collection = RunCollection::new();
    let view = RunsSet::attach(&mut collection, january_window());

    let at_start = collection.add(make_run("2024-01-10", RunType::EasyRun, 5.0, 1500));
    let at_end = collection.add(make_run("2024-01-20", RunType::EasyRun, 5.0, 1500));
    let day_before = collection.add(make_run("2024-01-09", RunType::EasyRun, 5.0, 1500));
    let two_days_before = collection.add(make_run("2024-01-08", RunType::EasyRun, 5.0, 1500));
    let day_after = collection.add(make_run("2024-01-21", RunType::EasyRun, 5.0, 1500));

    let view = view.borrow();
    assert!(view.contains(at_start));
    assert!(view.contains(at_end));
    assert!(view.contains(day_before));
    assert!(!view.contains(two_days_before));
    assert!(!view.contains(day_after));
    assert_eq!(view.count(), 3);
}

#[test]
fn test_initial_population_filters_existing_runs() {
    let mut collection = RunCollection::new();
    collection.add_all(vec![
        make_run("2024-01-12", RunType::EasyRun, 4.0, 1200),
        make_run("2024-02-12", RunType::EasyRun, 8.0, 2400),
        make_run("2024-01-15", RunType::Race, 10.0, 2700),
    ]);

    let view = RunsSet::attach(&mut collection, january_window());
    let view = view.borrow();

    assert_eq!(view.count(), 2);
    assert_eq!(view.total_distance(), 14.0);
    assert_eq!(view.total_duration(), 3900);
    assert_eq!(view.average_distance(), Some(7.0));
    assert_eq!(view.average_duration(), Some(1950));
    assert_eq!(view.oldest_date(), Some(date("2024-01-12")));
    assert_eq!(view.latest_date(), Some(date("2024-01-15")));
}

#[test]
fn test_members_sorted_most_recent_first_with_stable_ties() {
    let mut collection = RunCollection::new();
    let view = RunsSet::attach(&mut collection, Window::all_time());

    let first_same_day = collection.add(make_run("2024-03-05", RunType::EasyRun, 3.0, 900));
    let older = collection.add(make_run("2024-03-01", RunType::EasyRun, 3.0, 900));
    let newest = collection.add(make_run("2024-03-09", RunType::EasyRun, 3.0, 900));
    let second_same_day = collection.add(make_run("2024-03-05", RunType::Hills, 3.0, 900));

    let ids: Vec<_> = view.borrow().entries().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![newest, first_same_day, second_same_day, older]);
}

#[test]
fn test_add_then_remove_restores_aggregates() {
    let mut collection = RunCollection::new();
    collection.add_all(vec![
        make_run("2024-01-12", RunType::EasyRun, 4.0, 1200),
        make_run("2024-01-18", RunType::LongRun, 21.1, 7200),
    ]);
    let recent = RunsSet::attach(&mut collection, january_window());
    let all = RunsSet::attach(&mut collection, Window::all_time());

    let before: Vec<RunsStats> = vec![recent.borrow().stats().clone(), all.borrow().stats().clone()];

    let mut extra = make_run("2024-01-14", RunType::Race, 5.0, 1100);
    extra.evaluation = Some(10);
    let id = collection.add(extra);
    assert_eq!(recent.borrow().count(), 3);
    assert_eq!(recent.borrow().average_evaluation(), Some(10.0));

    collection.remove(id);
    let after: Vec<RunsStats> = vec![recent.borrow().stats().clone(), all.borrow().stats().clone()];
    assert_eq!(before, after);
}

#[test]
fn test_replace_moves_run_between_windows() {
    let mut collection = RunCollection::new();
    let january = RunsSet::attach(&mut collection, january_window());
    let february = RunsSet::attach(
        &mut collection,
        Window::new(date("2024-02-01"), date("2024-02-29")),
    );

    let id = collection.add(make_run("2024-01-15", RunType::EasyRun, 5.0, 1500));
    assert_eq!(january.borrow().count(), 1);

    let new_id = collection
        .replace(id, make_run("2024-02-15", RunType::EasyRun, 6.0, 1800))
        .unwrap();

    assert_eq!(january.borrow().count(), 0);
    assert!(february.borrow().contains(new_id));
    assert_eq!(february.borrow().total_distance(), 6.0);
}

#[test]
fn test_emptied_view_reports_sentinels() {
    let mut collection = RunCollection::new();
    let view = RunsSet::attach(&mut collection, january_window());

    let id = collection.add(make_run("2024-01-15", RunType::EasyRun, 5.0, 1500));
    collection.remove(id);

    let view = view.borrow();
    let stats = view.stats();
    assert_eq!(stats.count, 0);
    assert_eq!(stats.total_distance, 0.0);
    assert_eq!(stats.average_distance, -1.0);
    assert_eq!(stats.average_duration, -1);
    assert_eq!(stats.average_evaluation, -1.0);
    assert_eq!(stats.oldest_date, NaiveDate::MIN);
    assert_eq!(stats.latest_date, NaiveDate::MAX);
}

#[test]
fn test_view_sums_match_segments() {
    let mut collection = RunCollection::new();
    let view = RunsSet::attach(&mut collection, Window::all_time());
    collection.add(common::full_run());
    collection.add(make_run("2024-03-20", RunType::Fartlek, 7.25, 2100));

    let expected: f64 = collection
        .iter()
        .flat_map(|r| r.segments.iter())
        .map(|s| s.distance)
        .sum();
    let view = view.borrow();
    assert!((view.total_distance() - expected).abs() < 1e-9);
    assert_eq!(
        view.average_distance(),
        Some(view.total_distance() / view.count() as f64)
    );
}

#[test]
fn test_reload_replaces_members() {
    let mut collection = RunCollection::new();
    let view = RunsSet::attach(&mut collection, Window::all_time());
    collection.add(make_run("2024-01-15", RunType::EasyRun, 5.0, 1500));

    collection.replace_all(vec![
        make_run("2023-05-01", RunType::EasyRun, 3.0, 1000),
        make_run("2023-05-02", RunType::EasyRun, 3.0, 1000),
    ]);

    let view = view.borrow();
    assert_eq!(view.count(), 2);
    assert_eq!(view.latest_date(), Some(date("2023-05-02")));
}
