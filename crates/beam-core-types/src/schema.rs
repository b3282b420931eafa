//! Canonical schema constants for structured logging
//!
//! These constants keep field names consistent between the emitting
//! macros and the tests that assert on captured events.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Migration identifiers
pub const FIELD_MIGRATION: &str = "migration";
pub const FIELD_STATEMENTS: &str = "statements";

// Run totals
pub const FIELD_APPLIED: &str = "applied";
pub const FIELD_SKIPPED: &str = "skipped";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Operation names of a migration run
pub const OP_APPLY_ALL: &str = "migrate_apply_all";
pub const OP_APPLY_FILE: &str = "migrate_apply_file";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
