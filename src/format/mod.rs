//! HTML report rendering.
//!
//! A [`Summary`] becomes a tree of [`Fragment`]s (package card → test card
//! → subtest rows) which is rendered into the slots of a
//! [`DocumentTemplate`].
//!
//! Package cards are emitted in package-name order. Each card holds the
//! test cards of the overviews recorded under the same name. A test card's
//! header is derived from its subtests (summed time, worst state) instead
//! of being left as a blank, zero-time, skip-styled row.

mod html;
pub mod template;

pub use html::{Fragment, FragmentKind, StyleClass, html_escape};
pub use template::{DocumentTemplate, SlotValues};

use crate::error::{ReportError, Result};
use crate::model::Summary;
use tracing::debug;

/// Build the package fragments for `summary`.
///
/// # Errors
///
/// Returns [`ReportError::Integrity`] if any package reported no subtests.
pub fn build_fragments(summary: &Summary) -> Result<Vec<Fragment>> {
    if let Some(empty) = summary.overviews.iter().find(|o| o.test_cases.is_empty()) {
        return Err(ReportError::Integrity {
            package: empty.package().to_string(),
        });
    }

    let fragments = summary
        .packages
        .values()
        .map(|package| {
            let tests = summary
                .overviews
                .iter()
                .filter(|overview| overview.package() == package.name)
                .map(Fragment::test)
                .collect();
            Fragment::package(package, &summary.os_label, tests)
        })
        .collect();
    Ok(fragments)
}

/// Render `summary` into a complete HTML document.
///
/// # Errors
///
/// Returns [`ReportError::Integrity`] if any package reported no subtests.
pub fn render(summary: &Summary, template: &DocumentTemplate) -> Result<String> {
    let fragments = build_fragments(summary)?;
    debug!(packages = fragments.len(), "Rendering report");

    let html_elements = fragments
        .iter()
        .map(Fragment::render)
        .collect::<Vec<_>>()
        .join("\n");

    template.render(&SlotValues {
        html_elements,
        failed_tests: summary.counts.failed,
        passed_tests: summary.counts.passed,
        skipped_tests: summary.counts.skipped,
        total_test_time: summary.total_test_time.clone(),
        test_date: summary.test_date.clone(),
    })
}
