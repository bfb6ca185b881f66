mod common;
use antrecorder::core::RateWindow;
use antrecorder::errors::AppError;
use antrecorder::models::EventType;
use chrono::TimeDelta;
use common::{at, ev_in, ev_out};

fn window_of(events: &[antrecorder::models::Event]) -> RateWindow {
    RateWindow::from_events(events).unwrap()
}

#[test]
fn test_rate_over_window() {
    // arrivals at 0, 10, 20, 30, 40, 50; rate(In, 60 s, 60 s) = 6 / 60
    let w = window_of(&[
        ev_in(0),
        ev_in(10),
        ev_in(20),
        ev_in(30),
        ev_in(40),
        ev_in(50),
    ]);
    let rate = w.rate(EventType::In, at(60), TimeDelta::seconds(60));
    assert!((rate - 0.1).abs() < 1e-9);
    assert_eq!(w.rate(EventType::Out, at(60), TimeDelta::seconds(60)), 0.0);
}

#[test]
fn test_window_includes_both_ends() {
    let w = window_of(&[ev_in(0), ev_in(10)]);
    // [0, 10]: both events
    assert_eq!(w.rate(EventType::In, at(10), TimeDelta::seconds(10)), 0.2);
    // [1, 11]: only the event at 10
    assert_eq!(w.rate(EventType::In, at(11), TimeDelta::seconds(10)), 0.1);
    // [-1, 9]: only the event at 0
    assert_eq!(w.rate(EventType::In, at(9), TimeDelta::seconds(10)), 0.1);
    assert_eq!(w.rate(EventType::In, at(30), TimeDelta::seconds(10)), 0.0);
}

#[test]
fn test_zero_duration_rate() {
    let w = window_of(&[ev_in(0)]);
    assert_eq!(w.rate(EventType::In, at(0), TimeDelta::zero()), 0.0);
}

#[test]
fn test_out_of_order_rejected_and_state_unchanged() {
    let mut w = window_of(&[ev_in(0), ev_out(10)]);
    let err = w.add(&ev_in(5)).unwrap_err();
    assert!(matches!(err, AppError::OutOfOrderEvent { .. }));
    assert_eq!(w.count(EventType::In), 1);
    assert_eq!(w.count(EventType::Out), 1);
    assert_eq!(w.latest_time(), Some(at(10)));

    // equal timestamps are accepted
    w.add(&ev_in(10)).unwrap();
    assert_eq!(w.count(EventType::In), 2);
}

#[test]
fn test_delete_last_picks_latest_overall() {
    let mut w = window_of(&[ev_in(0), ev_in(5), ev_out(8)]);
    assert_eq!(w.delete_last(), Some(ev_out(8)));
    assert_eq!(w.count(EventType::Out), 0);
    assert_eq!(w.delete_last(), Some(ev_in(5)));
    assert_eq!(w.count(EventType::In), 1);
}

#[test]
fn test_delete_last_tie_removes_most_recently_added() {
    let mut w = window_of(&[ev_out(3), ev_in(3)]);
    let removed = w.delete_last().unwrap();
    assert_eq!(removed.kind(), EventType::In);
    let removed = w.delete_last().unwrap();
    assert_eq!(removed.kind(), EventType::Out);
}

#[test]
fn test_delete_last_on_empty_is_noop() {
    let mut w = RateWindow::new();
    assert!(w.delete_last().is_none());
    assert!(w.is_empty());
    assert_eq!(w.count(EventType::In), 0);
}

#[test]
fn test_status() {
    let w = window_of(&[ev_in(0), ev_in(5), ev_out(8), ev_out(20), ev_out(50)]);
    let s = w.status(at(60), TimeDelta::seconds(30));
    assert_eq!(s.in_count, 2);
    assert_eq!(s.out_count, 3);
    assert_eq!(s.out_ratio, Some(1.5));
    assert_eq!(s.out_difference, 1);
    assert_eq!(s.in_rate, 0.0);
    assert!((s.out_rate - 1.0 / 30.0).abs() < 1e-9);
}

#[test]
fn test_status_without_arrivals_has_no_ratio() {
    let w = window_of(&[ev_out(0)]);
    let s = w.status(at(1), TimeDelta::seconds(60));
    assert_eq!(s.out_ratio, None);
    assert_eq!(s.out_difference, 1);
}
