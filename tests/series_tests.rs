mod common;
use antrecorder::core::{BlockModel, GapPolicy, RateSeries, reference_line};
use chrono::TimeDelta;
use common::{at, ev_in, ev_out};

fn model(events: &[antrecorder::models::Event]) -> BlockModel {
    BlockModel::from_events(TimeDelta::seconds(10), GapPolicy::Backfill, events).unwrap()
}

#[test]
fn test_empty_series() {
    let m = model(&[]);
    let s = RateSeries::new(&m);
    assert!(s.is_empty());
    assert_eq!(s.point(0), None);
    let b = s.bounds();
    assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (0.0, 1.0, 0.0, 1.0));
}

#[test]
fn test_points_follow_blocks() {
    let m = model(&[ev_in(0), ev_out(1), ev_in(25)]);
    let s = RateSeries::new(&m);
    assert_eq!(s.len(), 3);
    assert_eq!(s.point(0), Some((0.1, 0.1)));
    assert_eq!(s.point(1), Some((0.0, 0.0)));
    assert_eq!(s.sample(2).unwrap().start, at(20));
    assert_eq!(s.points().count(), 3);
}

#[test]
fn test_bounds_grow_with_data() {
    // 15 arrivals in a 10 s block: 1.5 per second
    let events: Vec<_> = (0..15).map(|_| ev_in(0)).collect();
    let m = model(&events);
    let b = RateSeries::new(&m).bounds();
    assert_eq!(b.max_x, 1.5);
    assert_eq!(b.max_y, 1.0);
}

#[test]
fn test_series_sees_model_changes() {
    let mut m = model(&[ev_in(0)]);
    m.add(&ev_in(12)).unwrap();
    assert_eq!(RateSeries::new(&m).len(), 2);
    m.remove_last();
    assert_eq!(RateSeries::new(&m).len(), 1);
}

#[test]
fn test_reference_line_and_title() {
    assert_eq!(reference_line(), [(0.0, 0.0), (1.0, 1.0)]);
    let m = model(&[]);
    assert_eq!(RateSeries::new(&m).title(), "Ant rates");
}
