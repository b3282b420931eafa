//! Canonical logging macros
//!
//! `log_op_*` bracket an operation with start/end events; `log_migration!`
//! tags one file's events inside a run. Trailing `key = value` fields are
//! passed through to `tracing` unchanged.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use beam_logging::log_op_start;
/// log_op_start!("migrate_apply_all");
/// log_op_start!("migrate_apply_all", run_id = "r1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = beam_core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use beam_logging::log_op_end;
/// log_op_end!("migrate_apply_all", duration_ms = 42, applied = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = beam_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log an operation error with its kind and code
///
/// `$err` must implement `beam_core_types::ErrorCode`.
///
/// # Example
///
/// ```ignore
/// # use beam_logging::log_op_error;
/// let err = StoreError::Discovery { message: "no bundle".into() };
/// log_op_error!("migrate_apply_all", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let err = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = beam_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = beam_core_types::ErrorCode::kind_name(err),
            err_code = beam_core_types::ErrorCode::code(err),
            $($($field)*)?
        );
    }};
}

/// Log an event about one migration file within a run
///
/// Every event carries the file-level `op`, the run's `run_id` and the
/// file's name under `migration`, so one file can be followed through a
/// run and across runners.
///
/// # Example
///
/// ```
/// # use beam_logging::log_migration;
/// log_migration!(info, "run-1", "0001_customers.sql", "Applying migration");
/// log_migration!(debug, "run-1", "0001_customers.sql", statements = 3, "migration committed");
/// ```
#[macro_export]
macro_rules! log_migration {
    ($level:ident, $run_id:expr, $name:expr, $($rest:tt)+) => {
        tracing::$level!(
            op = beam_core_types::schema::OP_APPLY_FILE,
            run_id = %$run_id,
            migration = %$name,
            $($rest)+
        )
    };
}
