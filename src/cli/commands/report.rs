//! Report command implementation.
//!
//! Reads the log, aggregates it, renders the document and writes it to
//! `<prefix>_<OS>_results.html` in the output directory.

use crate::aggregate::aggregate;
use crate::cli::Cli;
use crate::config::ReportConfig;
use crate::decode::{read_events, read_events_from_path};
use crate::error::Result;
use crate::format::{DocumentTemplate, render};
use crate::model::Event;
use crate::output::{FileSink, ReportSink, report_file_name};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::info;

/// Execute the report command.
///
/// # Errors
///
/// Returns an error if the log cannot be read or decoded, the template
/// cannot be loaded, a package has no subtests, or the report cannot be
/// written.
pub fn execute(cli: &Cli, config: &ReportConfig) -> Result<PathBuf> {
    let events = match &cli.file {
        Some(path) => read_events_from_path(path)?,
        None => read_events(io::stdin().lock())?,
    };

    let template = load_template(config)?;
    let mut sink = FileSink::new(&config.output_dir);
    let path = generate(&events, config, &template, &mut sink)?;

    info!(path = %path.display(), "Report generated");
    Ok(path)
}

/// Load the configured template, or the bundled one.
///
/// # Errors
///
/// Returns an error if the template cannot be read or is invalid.
pub fn load_template(config: &ReportConfig) -> Result<DocumentTemplate> {
    match &config.template {
        Some(path) => DocumentTemplate::from_path(path),
        None => DocumentTemplate::bundled(),
    }
}

/// Run the pipeline over decoded events and hand the document to `sink`.
///
/// # Errors
///
/// Returns an error if there are no events, a package has no subtests, or
/// the sink fails.
pub fn generate<S: ReportSink>(
    events: &[Event],
    config: &ReportConfig,
    template: &DocumentTemplate,
    sink: &mut S,
) -> Result<PathBuf> {
    let summary = aggregate(events, &config.aggregate)?;
    let html = render(&summary, template)?;
    let file_name = report_file_name(&config.output_prefix, &summary.os_label);
    sink.write_report(&file_name, &html)
}

/// Decode `reader` and run the pipeline.
///
/// # Errors
///
/// Returns an error if decoding fails or [`generate`] fails.
pub fn generate_from_reader<R: BufRead, S: ReportSink>(
    reader: R,
    config: &ReportConfig,
    template: &DocumentTemplate,
    sink: &mut S,
) -> Result<PathBuf> {
    let events = read_events(reader)?;
    generate(&events, config, template, sink)
}
