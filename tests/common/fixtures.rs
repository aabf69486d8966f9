//! Builders for `go test -json` log lines.

use serde_json::json;

pub const PACKAGE: &str = "github.com/k3s-io/k3s/tests/e2e/upgradecluster";

fn timestamp(offset_secs: u32) -> String {
    let minutes = offset_secs / 60;
    let seconds = offset_secs % 60;
    format!("2025-01-14T10:{:02}:{:02}Z", 30 + minutes, seconds)
}

/// Package-level event.
pub fn package_event(offset_secs: u32, action: &str, elapsed: Option<f64>) -> String {
    let mut line = json!({
        "Time": timestamp(offset_secs),
        "Action": action,
        "Package": PACKAGE,
    });
    if let Some(elapsed) = elapsed {
        line["Elapsed"] = json!(elapsed);
    }
    line.to_string()
}

/// Output event attributed to `test`.
pub fn test_output(offset_secs: u32, test: &str, output: &str) -> String {
    json!({
        "Time": timestamp(offset_secs),
        "Action": "output",
        "Package": PACKAGE,
        "Test": test,
        "Output": output,
    })
    .to_string()
}

/// Output event carrying a subtest payload.
pub fn subtest(offset_secs: u32, test: &str, name: &str, state: &str, nanos: u64) -> String {
    let payload = json!({
        "State": state,
        "Name": name,
        "Type": "k3s test",
        "Time": nanos,
    });
    test_output(offset_secs, test, &format!("{payload}\n"))
}

/// Join lines into a log.
pub fn log(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// A run of two tests on `os`: `TestA` passes two subtests, `TestB` fails one.
pub fn two_package_log(os: &str) -> String {
    log(&[
        package_event(0, "run", None),
        test_output(1, "TestA", &format!("OS: /{os}/\n")),
        subtest(2, "TestA", "validates nodes", "passed", 60_000_000_000),
        subtest(3, "TestA", "validates pods", "passed", 30_000_000_000),
        package_event(4, "pass", Some(90.0)),
        subtest(70, "TestB", "upgrades servers", "failed", 120_000_000_000),
        package_event(125, "fail", Some(121.0)),
    ])
}
