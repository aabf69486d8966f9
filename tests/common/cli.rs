use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tempfile::TempDir;

#[derive(Debug)]
pub struct ReportRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
    pub duration: Duration,
    pub log_path: PathBuf,
}

pub struct ReportWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub log_dir: PathBuf,
}

impl ReportWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let log_dir = root.join("logs");
        fs::create_dir_all(&log_dir).expect("log dir");
        Self {
            temp_dir,
            root,
            log_dir,
        }
    }

    /// Write `contents` to `name` under the workspace root.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn read_report(&self, name: &str) -> String {
        read_report_at(&self.root.join(name))
    }
}

pub fn read_report_at(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

pub fn run_report<I, S>(workspace: &ReportWorkspace, args: I, stdin: Option<&str>, label: &str) -> ReportRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    // Reuse run_report_with_env with empty env vars
    run_report_with_env(
        workspace,
        args,
        stdin,
        std::iter::empty::<(String, String)>(),
        label,
    )
}

pub fn run_report_with_env<I, S, E, K, V>(
    workspace: &ReportWorkspace,
    args: I,
    stdin: Option<&str>,
    env_vars: E,
    label: &str,
) -> ReportRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("go-test-html-report"));
    cmd.current_dir(&workspace.root);
    cmd.args(args);
    cmd.env_remove("GTHR_MARKER");
    cmd.env_remove("GTHR_OS_MARKER");
    cmd.env_remove("GTHR_OUTPUT_PREFIX");
    cmd.env_remove("GTHR_OUTPUT_DIR");
    cmd.env_remove("GTHR_TEMPLATE");
    cmd.envs(env_vars);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "go_test_html_report=debug");
    cmd.env("RUST_BACKTRACE", "1");
    cmd.write_stdin(stdin.unwrap_or(""));

    let start = Instant::now();
    let output = cmd.output().expect("run go-test-html-report");
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let log_path = workspace.log_dir.join(format!("{label}.log"));
    let timestamp = SystemTime::now();
    let log_body = format!(
        "label: {label}\nstarted: {:?}\nduration: {:?}\nstatus: {}\nargs: {:?}\ncwd: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        timestamp,
        duration,
        output.status,
        cmd.get_args().collect::<Vec<_>>(),
        workspace.root.display(),
        stdout,
        stderr
    );
    fs::write(&log_path, log_body).expect("write log");

    ReportRun {
        stdout,
        stderr,
        status: output.status,
        duration,
        log_path,
    }
}
