use super::common;
use super::common::fixtures::two_package_log;
use go_test_html_report::aggregate::{AggregateOptions, aggregate};
use go_test_html_report::decode::read_events;
use go_test_html_report::format::{DocumentTemplate, render};
use insta::assert_snapshot;
use std::io::Cursor;

#[test]
fn snapshot_two_package_document() {
    let _log = common::test_log("snapshot_two_package_document");
    let events = read_events(Cursor::new(two_package_log("ubuntu"))).expect("decode log");
    let summary = aggregate(&events, &AggregateOptions::default()).expect("aggregate");
    let template = DocumentTemplate::bundled().expect("bundled template");

    let html = render(&summary, &template).expect("render");
    assert_snapshot!("two_package_document", html);
}
