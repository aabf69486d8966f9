use clap::Parser;
use go_test_html_report::cli::Cli;
use go_test_html_report::cli::commands;
use go_test_html_report::config;
use go_test_html_report::logging::init_logging;
use go_test_html_report::{ReportError, StructuredError};
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing::error;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = init_logging(None) {
        eprintln!("Failed to initialize logging: {e}");
        // Don't exit, just continue without logging
    }

    let result =
        config::load_config(Path::new(".")).and_then(|config| commands::report::execute(&cli, &config));

    if let Err(e) = result {
        handle_error(&e);
    }
}

/// Log the error and exit with its code.
///
/// The message is colored when stderr is a terminal.
fn handle_error(err: &ReportError) -> ! {
    let structured = StructuredError::from_error(err);
    match &structured.context {
        Some(context) => error!(code = structured.code.as_str(), %context, "{}", structured.message),
        None => error!(code = structured.code.as_str(), "{}", structured.message),
    }

    let use_color = io::stderr().is_terminal();
    eprintln!("{}", structured.to_human(use_color));

    std::process::exit(err.exit_code());
}
