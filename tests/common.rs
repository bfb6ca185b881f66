#![allow(dead_code)]
use antrecorder::models::{Event, EventType};
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset, TimeDelta};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rec() -> Command {
    cargo_bin_cmd!("antrecorder")
}

/// Unique event log path inside the system temp dir; any old file is removed.
pub fn setup_test_log(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_antrecorder.csv", name));
    let log_path = path.to_string_lossy().to_string();
    fs::remove_file(&log_path).ok();
    log_path
}

/// Temporary output file path inside tempdir; any old file is removed.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fixed reference instant, UTC-8.
pub fn t0() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-03-01T14:05:00.000-08:00").expect("valid t0")
}

pub fn at(secs: i64) -> DateTime<FixedOffset> {
    t0() + TimeDelta::seconds(secs)
}

pub fn ev_in(secs: i64) -> Event {
    Event::new(EventType::In, at(secs))
}

pub fn ev_out(secs: i64) -> Event {
    Event::new(EventType::Out, at(secs))
}

/// Record events through the CLI, one `add` per event.
pub fn add_events(log_path: &str, events: &[(&str, &str)]) {
    for (kind, time) in events {
        rec()
            .args(["--test", "--log", log_path, "add", kind, "--at", time])
            .assert()
            .success();
    }
}

pub fn line_count(path: &str) -> usize {
    fs::read_to_string(path)
        .map(|c| c.lines().count())
        .unwrap_or(0)
}
