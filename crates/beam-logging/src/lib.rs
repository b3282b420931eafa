//! Structured logging facility for Beam
//!
//! This crate provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`, `log_migration!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use beam_logging::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! Callers of the macros need `tracing` and `beam-core-types` in their
//! own dependency list.

pub mod logging_facility;

pub use logging_facility::init::{init, Profile};
pub use logging_facility::test_capture::{init_test_capture, CapturedEvent, TestCapture};
