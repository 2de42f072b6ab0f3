// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Running Diary overview
//!
//! Loads the diary save file and prints the recent and all-time summaries,
//! the browsable history, or the statistics series.
//!
//! Usage: `running-diary [overview|history|stats|json]`

use anyhow::Context;
use running_diary::{
    config::Config,
    models::RunsStats,
    services::{self, Metric, Timeframe},
    time_utils::{format_average, format_average_duration, format_date_range, format_duration_hm},
    Diary,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    let today = chrono::Local::now().date_naive();
    tracing::info!(path = %config.save_path.display(), recent_days = config.recent_days, "Starting Running Diary");

    let mut diary = Diary::new(config, today);
    diary
        .load()
        .with_context(|| format!("Failed to load {}", diary.store.path().display()))?;

    let command = std::env::args().nth(1).unwrap_or_else(|| "overview".to_string());
    match command.as_str() {
        "overview" => print_overview(&diary),
        "history" => print_history(&diary),
        "stats" => print_statistics(&diary, today),
        "json" => print_json(&diary)?,
        other => anyhow::bail!("Unknown command: {}", other),
    }
    Ok(())
}

fn print_summary(title: &str, stats: &RunsStats) {
    println!("{}", title);
    println!("  {}", format_date_range(stats.oldest_date, stats.latest_date));
    println!("  In Total");
    println!("    Activities: {}", stats.count);
    println!("    Distance: {:.2} km", stats.total_distance);
    println!("    Duration: {} h", format_duration_hm(stats.total_duration));
    println!("  On Average");
    println!("    Evaluation: {} / 10", format_average(stats.average_evaluation, 1));
    println!("    Distance: {} km", format_average(stats.average_distance, 2));
    println!("    Duration: {} h", format_average_duration(stats.average_duration));
}

fn print_overview(diary: &Diary) {
    let recent = diary.recent.borrow();
    print_summary("Recent Activities", recent.stats());
    println!();
    for run in recent.runs() {
        println!("  {}  [{}]", run, run.display_label());
    }
    println!();
    print_summary("All Activities", diary.all.borrow().stats());
}

fn print_history(diary: &Diary) {
    let history = diary.history.borrow();
    for year in &history.tree().years {
        println!("{}", year.year);
        for month in &year.months {
            println!("  {}", month.month_name());
            for group in &month.types {
                println!("    {}", group.display_name());
                for entry in &group.runs {
                    println!("      {}", entry.run);
                }
            }
        }
    }
}

fn print_statistics(diary: &Diary, today: chrono::NaiveDate) {
    let entries = diary.runs.entries();
    for timeframe in Timeframe::ALL {
        println!("{}", timeframe.label());
        for metric in [Metric::Distance, Metric::Duration] {
            let points = services::series(entries, timeframe, metric, today);
            let values: Vec<String> = points
                .iter()
                .map(|p| format!("{}={:.1}", p.label, p.value))
                .collect();
            println!("  {:?}: {}", metric, values.join(" "));
        }
        let types: Vec<String> = services::type_breakdown(entries, timeframe, today)
            .into_iter()
            .map(|(t, count)| format!("{}={}", t, count))
            .collect();
        println!("  Type: {}", types.join(" "));
    }
}

#[derive(Serialize)]
struct Overview {
    recent: RunsStats,
    all: RunsStats,
}

fn print_json(diary: &Diary) -> anyhow::Result<()> {
    let overview = Overview {
        recent: diary.recent.borrow().stats().clone(),
        all: diary.all.borrow().stats().clone(),
    };
    println!("{}", serde_json::to_string_pretty(&overview)?);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("running_diary=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
