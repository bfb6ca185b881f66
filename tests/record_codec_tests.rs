mod common;
use antrecorder::errors::AppError;
use antrecorder::models::{Event, EventType};
use antrecorder::store::record::{decode, encode};
use chrono::{DateTime, Utc};
use common::{ev_in, ev_out, t0};

#[test]
fn test_encode_fixed_format() {
    assert_eq!(encode(&ev_in(0)), "2024-03-01T14:05:00.000-08:00,In\n");
    assert_eq!(encode(&ev_out(22)), "2024-03-01T14:05:22.000-08:00,Out\n");
}

#[test]
fn test_encode_keeps_milliseconds_and_offset() {
    let time = DateTime::parse_from_rfc3339("2024-03-01T14:05:22.123456+05:30").unwrap();
    let ev = Event::new(EventType::In, time);
    assert_eq!(encode(&ev), "2024-03-01T14:05:22.123+05:30,In\n");
}

#[test]
fn test_utc_is_written_as_numeric_offset() {
    let time: DateTime<Utc> = "2024-03-01T22:05:00Z".parse().unwrap();
    let ev = Event::new(EventType::Out, time);
    assert_eq!(encode(&ev), "2024-03-01T22:05:00.000+00:00,Out\n");
}

#[test]
fn test_decode_reads_encoded_line() {
    let ev = ev_out(8);
    let line = encode(&ev);
    let back = decode(line.trim_end_matches('\n'), 1).unwrap();
    assert_eq!(back.kind(), EventType::Out);
    assert_eq!(back.time(), t0() + chrono::TimeDelta::seconds(8));
    assert_eq!(back.time().offset(), ev.time().offset());
}

#[test]
fn test_decode_accepts_zulu() {
    let ev = decode("2024-03-01T22:05:00.250Z,In", 1).unwrap();
    assert!(ev.is_in());
    assert_eq!(ev.time().timestamp_subsec_millis(), 250);
}

#[test]
fn test_decode_rejects_bad_type() {
    let err = decode("2024-03-01T14:05:00.000-08:00,in", 3).unwrap_err();
    assert!(matches!(err, AppError::MalformedRecord { line: 3, .. }));
}

#[test]
fn test_decode_rejects_field_count() {
    for line in ["2024-03-01T14:05:00.000-08:00", "a,b,c", ""] {
        let err = decode(line, 7).unwrap_err();
        assert_eq!(err.line_number(), Some(7), "line {line:?}");
    }
}

#[test]
fn test_decode_rejects_bad_timestamp() {
    let err = decode("yesterday,Out", 2).unwrap_err();
    assert_eq!(err.line_number(), Some(2));
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_offset_with_seconds_survives_a_round_trip() {
    use chrono::{FixedOffset, TimeZone};
    let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60 + 45).unwrap();
    let time = offset.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let ev = Event::new(EventType::In, time);

    // same instant, offset rounded to the minute the record can hold
    assert_eq!(ev.time(), time);
    assert_eq!(ev.time().offset().local_minus_utc(), 5 * 3600 + 31 * 60);

    let line = encode(&ev);
    let back = decode(line.trim_end_matches('\n'), 1).unwrap();
    assert_eq!(back, ev);
    assert_eq!(back.time().offset(), ev.time().offset());
}

#[test]
fn test_five_digit_year_is_rejected() {
    let time: DateTime<Utc> = "9999-12-31T23:59:59Z".parse().unwrap();
    assert!(Event::new(EventType::In, time).validate().is_ok());

    let time = time + chrono::TimeDelta::seconds(1);
    let err = Event::new(EventType::In, time).validate().unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));
}
