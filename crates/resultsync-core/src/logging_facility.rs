//! Structured logging facility for resultsync
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile, &log_config)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Cycle correlation via the `reconcile_cycle` span
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use resultsync_core::logging_facility::{init, Profile};
//! use resultsync_core::LogConfig;
//!
//! // Initialize once at application startup
//! init(Profile::Development, &LogConfig::default());
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
