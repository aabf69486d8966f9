//! CLI definitions and entry point.

use clap::Parser;
use std::path::PathBuf;

pub mod commands;

/// Generate an HTML report from go test -json logs
#[derive(Parser, Debug, Default)]
#[command(name = "go-test-html-report", author, version, about, long_about = None)]
pub struct Cli {
    /// File containing go test -json logs (reads stdin if not set)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}
