//! Single-pass aggregation of test events into a [`Summary`].
//!
//! # Ordering assumption
//!
//! `go test -json` does not tag package-level events (`Test` empty) with
//! the test they close. The aggregator keeps a current-package pointer,
//! moved by every event that names a test, and attributes each
//! package-level event to it. Logs that interleave several tests' terminal
//! events are attributed to whichever test spoke last; this is not
//! corrected.
//!
//! # Running counters
//!
//! Failed/passed/skipped counters are shared by the whole run and never
//! reset. A package summary stores a snapshot of them, so it includes the
//! subtests of every package reported before it. Reports produced by
//! earlier releases depend on these numbers, so the behavior is kept even
//! though a per-package count is likely what was meant.

use crate::error::{ReportError, Result};
use crate::model::{
    Action, Event, PackageSummary, RunCounts, SubtestPayload, SubtestState, Summary, TestOverview,
    TestRecord,
};
use crate::util::time::{format_test_date, format_total_time};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, warn};

/// Marker identifying output lines that carry a subtest payload.
pub const DEFAULT_PAYLOAD_MARKER: &str = "k3s test";
/// Token identifying output lines that carry the OS label.
pub const DEFAULT_OS_MARKER: &str = "OS";

/// Markers the aggregator looks for in event output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
    pub payload_marker: String,
    pub os_marker: String,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            payload_marker: DEFAULT_PAYLOAD_MARKER.to_string(),
            os_marker: DEFAULT_OS_MARKER.to_string(),
        }
    }
}

/// Aggregate `events` in order.
///
/// # Errors
///
/// Returns [`ReportError::EmptyInput`] if `events` is empty.
pub fn aggregate(events: &[Event], options: &AggregateOptions) -> Result<Summary> {
    let (Some(first), Some(last)) = (events.first(), events.last()) else {
        return Err(ReportError::EmptyInput);
    };

    let mut aggregator = Aggregator::new(options);
    for event in events {
        aggregator.process(event);
    }

    let total_test_time = format_total_time(last.timestamp - first.timestamp);
    let test_date = format_test_date(first.timestamp);
    let summary = aggregator.finish(total_test_time, test_date);

    info!(
        packages = summary.packages.len(),
        failed = summary.counts.failed,
        passed = summary.counts.passed,
        skipped = summary.counts.skipped,
        "Aggregated test events"
    );
    Ok(summary)
}

/// Aggregation state for one pass over a log.
#[derive(Debug)]
pub struct Aggregator<'a> {
    options: &'a AggregateOptions,
    current_package: String,
    counts: RunCounts,
    test_records: HashMap<(String, String), TestRecord>,
    package_summaries: BTreeMap<String, PackageSummary>,
    seen_packages: Vec<String>,
    seen_set: HashSet<String>,
    os_label: String,
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub fn new(options: &'a AggregateOptions) -> Self {
        Self {
            options,
            current_package: String::new(),
            counts: RunCounts::default(),
            test_records: HashMap::new(),
            package_summaries: BTreeMap::new(),
            seen_packages: Vec::new(),
            seen_set: HashSet::new(),
            os_label: String::new(),
        }
    }

    /// The package that package-level events are currently attributed to.
    #[must_use]
    pub fn current_package(&self) -> &str {
        &self.current_package
    }

    pub fn process(&mut self, event: &Event) {
        if event.is_package_level() {
            self.process_package_event(event);
        } else {
            self.process_test_event(event);
        }
    }

    fn process_test_event(&mut self, event: &Event) {
        self.current_package.clone_from(&event.test);
        if self.seen_set.insert(event.test.clone()) {
            self.seen_packages.push(event.test.clone());
        }

        if let Some(payload) = extract_payload(&event.output, &self.options.payload_marker) {
            self.record_payload(&event.test, &payload);
        }

        if let Some(label) = extract_os_label(&event.output, &self.options.os_marker) {
            debug!(os = %label, "Captured OS label");
            self.os_label = label;
        }
    }

    fn record_payload(&mut self, package: &str, payload: &SubtestPayload) {
        if payload.name.is_empty() {
            return;
        }
        let Some(state) = SubtestState::parse(&payload.state) else {
            warn!(
                package,
                subtest = %payload.name,
                state = %payload.state,
                "Ignoring subtest with unrecognized state"
            );
            return;
        };

        debug!(package, subtest = %payload.name, %state, "Recorded subtest");
        self.test_records.insert(
            (package.to_string(), payload.name.clone()),
            TestRecord {
                package: package.to_string(),
                name: payload.name.clone(),
                elapsed_minutes: payload.elapsed_minutes(),
                status: state,
            },
        );
        self.counts.record(state);
    }

    fn process_package_event(&mut self, event: &Event) {
        if let Some(status) = event.action.terminal_outcome() {
            debug!(package = %self.current_package, %status, "Package finished");
            self.package_summaries.insert(
                self.current_package.clone(),
                PackageSummary {
                    name: self.current_package.clone(),
                    elapsed_minutes: event.elapsed / 60.0,
                    status,
                    counts: self.counts,
                },
            );
        } else if event.action == Action::Output {
            if let Some(summary) = self.package_summaries.get_mut(&self.current_package) {
                summary.counts = self.counts;
            }
        }
    }

    /// Build the summary from the accumulated state.
    #[must_use]
    pub fn finish(self, total_test_time: String, test_date: String) -> Summary {
        let mut by_package: HashMap<String, Vec<TestRecord>> = HashMap::new();
        for record in self.test_records.into_values() {
            by_package
                .entry(record.package.clone())
                .or_default()
                .push(record);
        }

        let overviews = self
            .seen_packages
            .into_iter()
            .map(|package| {
                let records = by_package.remove(&package).unwrap_or_default();
                TestOverview::new(package, records)
            })
            .collect();

        Summary {
            total_test_time,
            test_date,
            counts: self.counts,
            os_label: self.os_label,
            packages: self.package_summaries,
            overviews,
        }
    }
}

/// Extract the subtest payload embedded in `output`.
///
/// Only output containing `marker` is considered. The payload is the text
/// from the first `{` to the last `}`; anything that does not parse is
/// treated as no payload.
#[must_use]
pub fn extract_payload(output: &str, marker: &str) -> Option<SubtestPayload> {
    if !output.contains(marker) {
        return None;
    }
    let start = output.find('{')?;
    let end = output.rfind('}')?;
    if end < start {
        return None;
    }

    match serde_json::from_str(output[start..=end].trim()) {
        Ok(payload) => Some(payload),
        Err(e) => {
            debug!(error = %e, "Output carries marker but no valid payload");
            None
        }
    }
}

/// Extract the OS label from output such as `OS: /ubuntu-22.04/`.
///
/// The label is the trimmed second `/`-separated field, possibly empty
/// (`OS: //` clears a label seen earlier). Output containing `marker` but
/// no `/` yields `None`.
#[must_use]
pub fn extract_os_label(output: &str, marker: &str) -> Option<String> {
    if !output.contains(marker) {
        return None;
    }
    let Some(label) = output.split('/').nth(1) else {
        warn!(output = output.trim(), "OS marker without a label");
        return None;
    };
    Some(label.trim().to_string())
}
