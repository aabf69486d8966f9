//! Core data types for `go_test_html_report`.
//!
//! This module defines the types that flow through the pipeline:
//! - `Event` - One decoded `go test -json` line
//! - `SubtestPayload` - Structured outcome embedded in an event's output
//! - `PackageSummary` - Terminal state of a package, with running counts
//! - `TestRecord` / `TestOverview` - The package → subtest tree
//! - `Summary` - Everything the renderer needs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// Deserialize `null` as the type's default.
///
/// `go test -json` writes `null` for some absent fields; those must not
/// reject the whole line.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Phase or outcome marker carried by an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Action {
    Run,
    Pass,
    Fail,
    Skip,
    Output,
    /// Any other action (`start`, `pause`, `cont`, `bench`, ...), kept verbatim.
    Other(String),
    #[default]
    None,
}

impl Action {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Run => "run",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::Output => "output",
            Self::Other(value) => value,
            Self::None => "",
        }
    }

    /// The outcome this action terminates with, if it is `pass`, `fail` or `skip`.
    #[must_use]
    pub const fn terminal_outcome(&self) -> Option<Outcome> {
        match self {
            Self::Pass => Some(Outcome::Pass),
            Self::Fail => Some(Outcome::Fail),
            Self::Skip => Some(Outcome::Skip),
            _ => None,
        }
    }
}

impl From<String> for Action {
    fn from(value: String) -> Self {
        match value.as_str() {
            "run" => Self::Run,
            "pass" => Self::Pass,
            "fail" => Self::Fail,
            "skip" => Self::Skip,
            "output" => Self::Output,
            "" => Self::None,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of a `go test -json` log.
///
/// Every field is optional on the wire; missing fields take their zero value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Event {
    #[serde(rename = "Time", alias = "time", default, deserialize_with = "nullable")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Action", alias = "action", default, deserialize_with = "nullable")]
    pub action: Action,
    #[serde(rename = "Package", alias = "package", default, deserialize_with = "nullable")]
    pub package: String,
    #[serde(rename = "Test", alias = "test", default, deserialize_with = "nullable")]
    pub test: String,
    #[serde(rename = "Output", alias = "output", default, deserialize_with = "nullable")]
    pub output: String,
    /// Seconds; only meaningful on terminal package-level events.
    #[serde(rename = "Elapsed", alias = "elapsed", default, deserialize_with = "nullable")]
    pub elapsed: f64,
}

impl Event {
    /// Package-level events have no test name.
    #[must_use]
    pub fn is_package_level(&self) -> bool {
        self.test.is_empty()
    }
}

/// Terminal outcome of a package run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recognized states of an embedded subtest payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtestState {
    Passed,
    Failed,
    Skipped,
}

impl SubtestState {
    /// Parse a payload state. Unrecognized states yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "passed" => Some(Self::Passed),
            "failed" => Some(Self::Failed),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for SubtestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subtest outcome embedded as JSON in an event's output.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SubtestPayload {
    #[serde(rename = "State", alias = "state", default, deserialize_with = "nullable")]
    pub state: String,
    #[serde(rename = "Name", alias = "name", default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "Type", alias = "type", default, deserialize_with = "nullable")]
    pub kind: String,
    /// Nanoseconds.
    #[serde(rename = "Time", alias = "time", default, deserialize_with = "nullable")]
    pub time: f64,
}

/// Nanoseconds per minute.
pub const NANOS_PER_MINUTE: f64 = 1000.0 * 1000.0 * 1000.0 * 60.0;

impl SubtestPayload {
    /// Elapsed time in minutes.
    #[must_use]
    pub fn elapsed_minutes(&self) -> f64 {
        self.time / NANOS_PER_MINUTE
    }
}

/// Cumulative subtest tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunCounts {
    pub failed: usize,
    pub passed: usize,
    pub skipped: usize,
}

impl RunCounts {
    pub fn record(&mut self, state: SubtestState) {
        match state {
            SubtestState::Failed => self.failed += 1,
            SubtestState::Passed => self.passed += 1,
            SubtestState::Skipped => self.skipped += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.failed + self.passed + self.skipped
    }
}

/// Terminal state of one package.
///
/// `counts` is a snapshot of the run-wide counters taken when the package
/// reported, so it includes subtests of every package seen before it.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageSummary {
    pub name: String,
    pub elapsed_minutes: f64,
    pub status: Outcome,
    pub counts: RunCounts,
}

/// One subtest result.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    pub package: String,
    pub name: String,
    pub elapsed_minutes: f64,
    pub status: SubtestState,
}

/// All subtests reported under one package, plus a derived header.
#[derive(Debug, Clone, PartialEq)]
pub struct TestOverview {
    pub header: TestRecord,
    pub test_cases: Vec<TestRecord>,
}

impl TestOverview {
    /// Group `test_cases` under `package`, sorted by subtest name.
    ///
    /// The header sums subtest time and takes the worst subtest state
    /// (failed, then passed, then skipped).
    #[must_use]
    pub fn new(package: impl Into<String>, mut test_cases: Vec<TestRecord>) -> Self {
        let package = package.into();
        test_cases.sort_by(|a, b| a.name.cmp(&b.name));

        let elapsed_minutes = test_cases.iter().map(|t| t.elapsed_minutes).sum();
        let status = if test_cases.iter().any(|t| t.status == SubtestState::Failed) {
            SubtestState::Failed
        } else if test_cases.iter().any(|t| t.status == SubtestState::Passed) {
            SubtestState::Passed
        } else {
            SubtestState::Skipped
        };

        Self {
            header: TestRecord {
                package: package.clone(),
                name: package,
                elapsed_minutes,
                status,
            },
            test_cases,
        }
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.header.package
    }
}

/// Aggregated view of a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_test_time: String,
    pub test_date: String,
    pub counts: RunCounts,
    /// Last OS label seen in the output, empty if none.
    pub os_label: String,
    pub packages: BTreeMap<String, PackageSummary>,
    /// One per package in first-seen order.
    pub overviews: Vec<TestOverview>,
}
