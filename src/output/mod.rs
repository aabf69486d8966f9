//! Persisting the rendered report.

use crate::error::{ReportError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default report file name prefix.
pub const DEFAULT_OUTPUT_PREFIX: &str = "k3s";

/// File name for a report, e.g. `k3s_ubuntu-22.04_results.html`.
#[must_use]
pub fn report_file_name(prefix: &str, os_label: &str) -> String {
    format!("{prefix}_{os_label}_results.html")
}

/// Destination for a rendered report.
pub trait ReportSink {
    /// Store `html` under `file_name`, returning where it went.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be stored.
    fn write_report(&mut self, file_name: &str, html: &str) -> Result<PathBuf>;
}

/// Writes reports into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for FileSink {
    fn write_report(&mut self, file_name: &str, html: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| ReportError::io_at(&self.dir, e))?;
        let path = self.dir.join(file_name);
        fs::write(&path, html).map_err(|e| ReportError::io_at(&path, e))?;
        debug!(path = %path.display(), bytes = html.len(), "Wrote report");
        Ok(path)
    }
}

/// Keeps reports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub reports: Vec<(String, String)>,
}

impl ReportSink for MemorySink {
    fn write_report(&mut self, file_name: &str, html: &str) -> Result<PathBuf> {
        self.reports.push((file_name.to_string(), html.to_string()));
        Ok(PathBuf::from(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name("k3s", "ubuntu-22.04"),
            "k3s_ubuntu-22.04_results.html"
        );
        assert_eq!(report_file_name("k3s", ""), "k3s__results.html");
    }

    #[test]
    fn test_file_sink_creates_directory() {
        let temp = TempDir::new().expect("temp dir");
        let mut sink = FileSink::new(temp.path().join("reports").join("e2e"));

        let path = sink.write_report("k3s_x_results.html", "<html></html>").unwrap();

        assert_eq!(path, sink.dir().join("k3s_x_results.html"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_file_sink_overwrites() {
        let temp = TempDir::new().expect("temp dir");
        let mut sink = FileSink::new(temp.path());
        sink.write_report("r.html", "old").unwrap();
        let path = sink.write_report("r.html", "new").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::default();
        sink.write_report("a.html", "<p>a</p>").unwrap();
        assert_eq!(sink.reports, [("a.html".to_string(), "<p>a</p>".to_string())]);
    }
}
