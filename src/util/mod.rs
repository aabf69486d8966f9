//! Shared utilities for `go_test_html_report`.
//!
//! - Time formatting (run duration, run date)

pub mod time;

pub use time::{format_test_date, format_total_time};
