//! Logging setup.
//!
//! Logs go to stderr so they never mix with redirected report content.
//! `RUST_LOG` selects the filter; without it only this crate logs, at info.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "go_test_html_report=info";

/// Install the global subscriber.
///
/// `filter` overrides both `RUST_LOG` and the default.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_logging(
    filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .try_init()
}

/// Subscriber for tests: debug level, captured by the test harness.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("go_test_html_report=debug")
        .with_test_writer()
        .try_init();
}
