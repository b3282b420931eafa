//! Core types shared across Beam facilities
//!
//! This crate provides the small vocabulary used by both the store and
//! the logging facility:
//!
//! - **Correlation**: `RunId` tags every event of one migration run
//! - **Error codes**: the `ErrorCode` trait behind `err_code` log fields
//! - **Schema constants**: canonical field keys and event names

pub mod correlation;
pub mod error_code;
pub mod schema;

pub use correlation::RunId;
pub use error_code::ErrorCode;
