mod common;
use antrecorder::core::{GapPolicy, Session, SessionOptions};
use antrecorder::errors::AppError;
use antrecorder::models::EventType;
use antrecorder::store::{ChannelDispatcher, Counts, EventLog, NoticeHandler};
use chrono::TimeDelta;
use common::{at, ev_in, ev_out, line_count, setup_test_log};
use std::fs;

#[derive(Default)]
struct Last {
    counts: Option<Counts>,
    errors: usize,
}

impl NoticeHandler for Last {
    fn on_counts_changed(&mut self, counts: Counts) {
        self.counts = Some(counts);
    }

    fn on_error(&mut self, _error: AppError) {
        self.errors += 1;
    }
}

#[test]
fn test_end_to_end_record_and_delete() {
    let path = setup_test_log("session_end_to_end");
    let (dispatcher, notices) = ChannelDispatcher::channel();
    let session = Session::open(&path, SessionOptions::default(), dispatcher).unwrap();

    session.record(EventType::In, at(0)).unwrap();
    session.record(EventType::In, at(5)).unwrap();
    session.record(EventType::Out, at(8)).unwrap();
    assert_eq!(session.count(EventType::In).unwrap(), 2);
    assert_eq!(session.count(EventType::Out).unwrap(), 1);

    assert_eq!(session.delete_last().unwrap(), Some(ev_out(8)));
    assert_eq!(session.count(EventType::Out).unwrap(), 0);
    session.close().unwrap();

    let mut last = Last::default();
    notices.pump_until_closed(&mut last);
    assert_eq!(last.errors, 0);
    assert_eq!(
        last.counts,
        Some(Counts {
            in_count: 2,
            out_count: 0
        })
    );
    assert_eq!(line_count(&path), 2);
}

#[test]
fn test_open_rebuilds_models_from_file() {
    let path = setup_test_log("session_rebuild");
    {
        let mut log = EventLog::open(&path).unwrap();
        for ev in [ev_in(0), ev_out(30), ev_in(70)] {
            log.append(&ev).unwrap();
        }
        log.close().unwrap();
    }

    let options = SessionOptions {
        block: TimeDelta::seconds(60),
        gap_policy: GapPolicy::Backfill,
        queue_warn_depth: 8,
    };
    let (dispatcher, _notices) = ChannelDispatcher::channel();
    let session = Session::open(&path, options, dispatcher).unwrap();

    assert_eq!(session.count(EventType::In).unwrap(), 2);
    assert_eq!(session.block_rates().unwrap().len(), 2);
    let status = session.status(at(70), TimeDelta::seconds(60)).unwrap();
    assert_eq!(status.out_ratio, Some(0.5));
    assert_eq!(session.path(), std::path::Path::new(&path));
    assert_eq!(session.options().queue_warn_depth, 8);
    session.close().unwrap();
}

#[test]
fn test_open_fails_on_malformed_log() {
    let path = setup_test_log("session_malformed");
    fs::write(&path, "not a record\n").unwrap();
    let (dispatcher, _notices) = ChannelDispatcher::channel();
    let err = Session::open(&path, SessionOptions::default(), dispatcher)
        .err()
        .expect("open must fail");
    assert_eq!(err.line_number(), Some(1));
}

#[test]
fn test_out_of_order_is_not_persisted() {
    let path = setup_test_log("session_out_of_order");
    let (dispatcher, _notices) = ChannelDispatcher::channel();
    let session = Session::open(&path, SessionOptions::default(), dispatcher).unwrap();

    session.record(EventType::In, at(10)).unwrap();
    let err = session.record(EventType::Out, at(5)).unwrap_err();
    assert!(matches!(err, AppError::OutOfOrderEvent { .. }));
    session.close().unwrap();

    assert_eq!(EventLog::load(&path).unwrap(), vec![ev_in(10)]);
}

#[test]
fn test_delete_last_on_empty_session() {
    let path = setup_test_log("session_delete_empty");
    let (dispatcher, notices) = ChannelDispatcher::channel();
    let session = Session::open(&path, SessionOptions::default(), dispatcher).unwrap();

    assert_eq!(session.delete_last().unwrap(), None);
    session.close().unwrap();

    // only the initial counts: nothing was queued
    let mut last = Last::default();
    assert_eq!(notices.pump_until_closed(&mut last), 1);
}

#[test]
fn test_shared_rates_handle() {
    let path = setup_test_log("session_shared_rates");
    let (dispatcher, _notices) = ChannelDispatcher::channel();
    let session = Session::open(&path, SessionOptions::default(), dispatcher).unwrap();
    let rates = session.rates();

    session.record(EventType::Out, at(0)).unwrap();
    let handle = std::thread::spawn(move || rates.lock().unwrap().window.count(EventType::Out));
    assert_eq!(handle.join().unwrap(), 1);

    assert!(session.is_writer_alive());
    assert!(session.backlog_advisory().is_none() || session.queue_depth() >= 64);
    session.close().unwrap();
}

#[test]
fn test_failed_delete_keeps_models_intact() {
    use antrecorder::store::LogNotice;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    let path = setup_test_log("session_failed_delete");
    let seen = AtomicUsize::new(0);
    // the writer thread dies on its second notice (after the first append)
    let dispatcher = move |_: LogNotice| {
        if seen.fetch_add(1, Ordering::SeqCst) == 1 {
            panic!("dispatcher gave up");
        }
    };
    let session = Session::open(&path, SessionOptions::default(), dispatcher).unwrap();
    session.record(EventType::In, at(0)).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while session.is_writer_alive() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(!session.is_writer_alive());

    assert!(matches!(session.delete_last(), Err(AppError::WriterStopped)));
    assert_eq!(session.count(EventType::In).unwrap(), 1);
    assert_eq!(
        session.block_rates().unwrap().len(),
        1,
        "block model still holds the event"
    );
    assert!(matches!(
        session.record(EventType::Out, at(1)),
        Err(AppError::WriterStopped)
    ));
    assert_eq!(session.count(EventType::Out).unwrap(), 0);

    // the record reached the file before the writer died
    assert_eq!(line_count(&path), 1);
    assert!(session.close().is_err());
}

#[test]
fn test_rates_restore_after_delete() {
    use antrecorder::core::Rates;

    let options = SessionOptions {
        block: TimeDelta::seconds(60),
        gap_policy: GapPolicy::Backfill,
        queue_warn_depth: 0,
    };
    let mut rates = Rates::from_events(&options, &[ev_in(0), ev_out(200)]).unwrap();
    let before: Vec<_> = rates.blocks.rates().collect();

    let removed = rates.delete_last().unwrap();
    rates.add(&removed).unwrap();

    assert_eq!(rates.blocks.rates().collect::<Vec<_>>(), before);
    assert_eq!(rates.window.count(EventType::Out), 1);
}
