#![allow(clippy::unwrap_used, clippy::expect_used)]

use beam_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_APPLIED, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_MIGRATION, FIELD_RUN_ID, FIELD_SKIPPED, FIELD_STATEMENTS, OP_APPLY_ALL,
    OP_APPLY_FILE,
};
use beam_logging::{init_test_capture, CapturedEvent};
use beam_store::migrations::StaticMigrations;
use beam_store::{Database, StoreConfig};

#[test]
fn test_successful_run_logs_start_file_and_end() {
    let capture = init_test_capture();
    let mut db = Database::open(&StoreConfig::in_memory()).unwrap();
    let source = StaticMigrations::new([(
        "0001_logged_success_unique.sql",
        "CREATE TABLE logged (id INTEGER);",
    )]);

    db.migrate(&source).unwrap();

    let file_events = capture.events_with(FIELD_MIGRATION, "0001_logged_success_unique.sql");
    let is_file_op = |e: &&CapturedEvent| e.op.as_deref() == Some(OP_APPLY_FILE);
    let applying = file_events
        .iter()
        .filter(is_file_op)
        .find(|e| e.level == tracing::Level::INFO)
        .expect("an info event per applied migration");
    let committed = file_events
        .iter()
        .filter(is_file_op)
        .find(|e| e.level == tracing::Level::DEBUG)
        .expect("a debug event once the file commits");
    assert_eq!(committed.field(FIELD_STATEMENTS), Some("1"));
    let run_id = applying.field(FIELD_RUN_ID).unwrap().to_string();

    let run_events = capture.events_with(FIELD_RUN_ID, &run_id);
    let run_event = |event: &str| {
        run_events
            .iter()
            .find(|e| e.op.as_deref() == Some(OP_APPLY_ALL) && e.event.as_deref() == Some(event))
            .cloned()
    };
    assert!(run_event(EVENT_START).is_some());
    let end = run_event(EVENT_END).expect("an end event for the run");
    assert_eq!(end.field(FIELD_APPLIED), Some("1"));
    assert_eq!(end.field(FIELD_SKIPPED), Some("0"));
    assert!(end.field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_failed_run_logs_error_with_migration_name() {
    let capture = init_test_capture();
    let mut db = Database::open(&StoreConfig::in_memory()).unwrap();
    let source = StaticMigrations::new([(
        "0001_logged_failure_unique.sql",
        "CREATE TABLE oops (id INTEGER); INSERT INTO nowhere VALUES (1);",
    )]);

    db.migrate(&source).unwrap_err();

    let errors: Vec<_> = capture
        .events_with(FIELD_MIGRATION, "0001_logged_failure_unique.sql")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    let event = &errors[0];
    assert_eq!(event.level, tracing::Level::ERROR);
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_MIGRATION_FAILED"));
    assert_eq!(event.field(FIELD_ERR_KIND), Some("MigrationFailed"));
    assert!(event.field("error").unwrap().contains("nowhere"));
}
