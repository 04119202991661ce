//! Utility functions and helpers
//!
//! Atomic file writes and second-precision timestamps.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write, cleanup_stale_temp};
pub use time::{now_seconds, parse_timestamp, truncate_to_seconds, TIMESTAMP_FORMAT};
