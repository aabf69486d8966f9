use super::common;
use go_test_html_report::config::{ConfigLayer, ReportConfig};
use go_test_html_report::decode::decode_event;
use go_test_html_report::format::DocumentTemplate;
use go_test_html_report::{ReportError, StructuredError};
use insta::assert_snapshot;
use std::io;

/// Plain-text rendering with any third-party message replaced by `<source>`.
fn human(err: &ReportError) -> String {
    let structured = StructuredError::from_error(err);
    let mut text = format!("[{}]\n{}", structured.code.as_str(), structured.to_human(false));

    let source = match err {
        ReportError::Template(e) => Some(e.to_string()),
        ReportError::Render(e) => Some(e.to_string()),
        ReportError::Yaml(e) => Some(e.to_string()),
        _ => None,
    };
    if let Some(source) = source {
        text = text.replacen(&source, "<source>", 1);
    }
    text
}

#[test]
fn snapshot_human_error_messages() {
    let _log = common::test_log("snapshot_human_error_messages");

    let mut empty_marker = ConfigLayer::default();
    empty_marker.insert("marker", "");

    let errors = vec![
        decode_event("=== RUN   TestA", 8).expect_err("decode"),
        ReportError::EmptyInput,
        ReportError::Integrity {
            package: "TestQuiet".to_string(),
        },
        DocumentTemplate::parse("<p>{{test_date</p>").expect_err("unterminated"),
        DocumentTemplate::parse("<p>{{{html_elements}}} {{os}}</p>").expect_err("unknown slot"),
        DocumentTemplate::parse("<p>{{{html_elements}}}</p>").expect_err("missing slot"),
        ReportConfig::from_layer(&empty_marker).expect_err("empty marker"),
        ConfigLayer::from_yaml_str("marker: [unclosed\n").expect_err("bad yaml"),
        ReportError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe")),
        ReportError::io_at(
            "absent.json",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        ),
    ];

    let messages = errors.iter().map(human).collect::<Vec<_>>().join("\n\n");
    assert_snapshot!("human_error_messages", messages);
}
