//! Event decoding for `go test -json` logs.
//!
//! Each non-blank line is one JSON object. Decoding is tolerant: absent or
//! `null` fields take their zero value, and only malformed JSON is rejected.

use crate::error::{ReportError, Result};
use crate::model::Event;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Decode one log line.
///
/// `line_num` is 1-based and only used for error reporting.
///
/// # Errors
///
/// Returns [`ReportError::Decode`] if the line is not a well-formed JSON object.
pub fn decode_event(line: &str, line_num: usize) -> Result<Event> {
    serde_json::from_str(line.trim()).map_err(|source| ReportError::Decode {
        line: line_num,
        source,
    })
}

/// Decode every line of a buffered reader, skipping blank lines.
///
/// # Errors
///
/// Returns an error if reading fails or any line is malformed.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<Event>> {
    let mut events = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        events.push(decode_event(&line, line_num + 1)?);
    }

    debug!(count = events.len(), "Decoded test events");
    Ok(events)
}

/// Decode every line of the log file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or any line is malformed.
pub fn read_events_from_path(path: &Path) -> Result<Vec<Event>> {
    let file = File::open(path).map_err(|e| ReportError::io_at(path, e))?;
    debug!(path = %path.display(), "Reading test log");
    read_events(BufReader::new(file))
}
