//! Golden snapshots of the rendered document and of error output.
//!
//! Snapshots live in `tests/snapshots/snapshots/`. Review changes with
//! `cargo insta review`.

#[path = "../common/mod.rs"]
mod common;

mod error_messages;
mod report_document;
