#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use resultsync_core::errors::{ExError, ExErrorKind, ResultSyncError};
use resultsync_core::logging_facility::test_capture::init_test_capture;
use resultsync_core::{log_op_end, log_op_error, log_op_start, FetchedRecord};
use resultsync_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, OP_DIFF, OP_FETCH, OP_NOTIFY, OP_RECONCILE_CYCLE,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(
        end_events[0].fields.get("duration_ms"),
        Some(&"42".to_string())
    );
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ResultSyncError::ReplayMismatch {
        reason: "extra object".to_string(),
    };
    log_op_error!(op_name, err.clone(), duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::ReplayMismatch);
    assert_eq!(
        error_event.fields.get("err.code"),
        Some(&"ERR_REPLAY_MISMATCH".to_string())
    );
    assert_eq!(
        error_event.fields.get("err.kind"),
        Some(&"ReplayMismatch".to_string())
    );
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, controller = "inbox", record_count = 3);

    let events = capture.events();
    let start_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(
        start_event.fields.get("controller"),
        Some(&"inbox".to_string())
    );
    assert_eq!(start_event.fields.get("record_count"), Some(&"3".to_string()));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_cycle_logs_every_phase_inside_its_span() {
    let capture = init_test_capture();
    let name = "logging-cycle-unique-5";
    let (mut controller, _recorder) = common::controller(name, &[("s", &["a", "b"])]);

    let reports = controller.perform_fetch().unwrap();
    let cycle_id = reports[0].cycle_id.to_string();

    let events = capture.events_for_controller(name);
    for (op, event) in [
        (OP_RECONCILE_CYCLE, EVENT_START),
        (OP_FETCH, EVENT_START),
        (OP_FETCH, EVENT_END),
        (OP_DIFF, EVENT_END),
        (OP_NOTIFY, EVENT_START),
        (OP_NOTIFY, EVENT_END),
        (OP_RECONCILE_CYCLE, EVENT_END),
    ] {
        let found = events.iter().find(|e| {
            e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event)
        });
        let found = found.unwrap_or_else(|| panic!("missing {} {}", op, event));
        assert_eq!(found.field("cycle_id"), Some(cycle_id.as_str()));
    }
}

#[test]
fn test_fetch_failure_logs_error_with_code() {
    let capture = init_test_capture();
    let name = "logging-failure-unique-6";
    let (mut controller, _recorder) = common::controller(name, &[("s", &["a"])]);
    controller.store_mut().fail_next("disk gone");

    assert!(controller.perform_fetch().is_err());

    let errors: Vec<_> = capture
        .events_for_controller(name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 2, "fetch and cycle both end in error");
    assert!(errors
        .iter()
        .all(|e| e.fields.get("err.code") == Some(&"ERR_EXTERNAL_SERVICE".to_string())));
    assert!(!errors
        .iter()
        .any(|e| e.op.as_deref() == Some(OP_NOTIFY)));

    for error in &errors {
        let op = error.op.as_deref().unwrap();
        let cycle_id = error.field("cycle_id").expect("error event inside the cycle span");
        let message = error.fields.get("err.message").expect("rendered error");
        assert!(message.starts_with("[ERR_EXTERNAL_SERVICE]"));
        assert!(message.contains(&format!("in operation '{}'", op)));
        assert!(message.contains("disk gone"));
        assert!(message.contains(&format!("(cycle_id: {})", cycle_id)));
    }
}

#[test]
fn test_dropped_duplicates_log_a_warning() {
    let capture = init_test_capture();
    let name = "logging-duplicates-unique-7";
    let (mut controller, _recorder) = common::controller(name, &[]);
    controller.store_mut().set_records(vec![
        FetchedRecord::new("a".to_string(), "x".to_string(), 1),
        FetchedRecord::new("a".to_string(), "y".to_string(), 2),
    ]);

    controller.perform_fetch().unwrap();

    let warnings = capture.count_events(|e| {
        e.level == tracing::Level::WARN
            && e.field("controller") == Some(name)
            && e.fields.get("dropped_records") == Some(&"1".to_string())
    });
    assert_eq!(warnings, 1);
}
