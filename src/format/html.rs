//! Typed HTML fragments for package cards, test cards and subtest rows.

use crate::model::{Outcome, PackageSummary, RunCounts, SubtestState, TestOverview, TestRecord};

/// Background style of a card, chosen from its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleClass {
    Success,
    Fail,
    Skip,
}

impl StyleClass {
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "successBackgroundColor",
            Self::Fail => "failBackgroundColor",
            Self::Skip => "skipBackgroundColor",
        }
    }

    /// Anything other than `pass` or `fail` renders as skipped.
    #[must_use]
    pub const fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Pass => Self::Success,
            Outcome::Fail => Self::Fail,
            Outcome::Skip => Self::Skip,
        }
    }

    #[must_use]
    pub const fn for_subtest(state: SubtestState) -> Self {
        match state {
            SubtestState::Passed => Self::Success,
            SubtestState::Failed => Self::Fail,
            SubtestState::Skipped => Self::Skip,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentKind {
    /// Collapsible package card; carries the running-counter snapshot.
    Package { counts: RunCounts },
    /// Collapsible test card.
    Test,
    /// One subtest row.
    Subtest,
}

/// A node of the rendered report tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub name: String,
    pub elapsed: f64,
    pub style: StyleClass,
    pub children: Vec<Self>,
}

impl Fragment {
    /// Package card titled `<name>_<os_label>`, holding `tests`.
    #[must_use]
    pub fn package(summary: &PackageSummary, os_label: &str, tests: Vec<Self>) -> Self {
        Self {
            kind: FragmentKind::Package {
                counts: summary.counts,
            },
            name: format!("{}_{}", summary.name, os_label),
            elapsed: summary.elapsed_minutes,
            style: StyleClass::for_outcome(summary.status),
            children: tests,
        }
    }

    /// Test card with one row per subtest.
    #[must_use]
    pub fn test(overview: &TestOverview) -> Self {
        Self {
            kind: FragmentKind::Test,
            name: overview.header.name.clone(),
            elapsed: overview.header.elapsed_minutes,
            style: StyleClass::for_subtest(overview.header.status),
            children: overview.test_cases.iter().map(Self::subtest).collect(),
        }
    }

    #[must_use]
    pub fn subtest(record: &TestRecord) -> Self {
        Self {
            kind: FragmentKind::Subtest,
            name: record.name.clone(),
            elapsed: record.elapsed_minutes,
            style: StyleClass::for_subtest(record.status),
            children: Vec::new(),
        }
    }

    /// Render this fragment and its children.
    #[must_use]
    pub fn render(&self) -> String {
        let mut html = String::new();
        self.render_into(&mut html);
        html
    }

    fn render_into(&self, html: &mut String) {
        let name = html_escape(&self.name);
        let class = self.style.css_class();

        match &self.kind {
            FragmentKind::Package { counts } => {
                html.push_str(&format!(
                    "<div type=\"button\" class=\"collapsible\" data-failed-tests=\"{}\" \
                     data-passed-tests=\"{}\" data-skipped-tests=\"{}\">\n",
                    counts.failed, counts.passed, counts.skipped
                ));
                html.push_str(&format!(
                    "<div class=\"collapsibleHeading packageCardLayout {class} \">\
                     <div>{name}</div>\n<div>Run Time: {:.2}</div> \n</div>\n",
                    self.elapsed
                ));
                html.push_str("<div class=\"collapsibleHeadingContent\">\n");
                self.render_children(html);
                html.push_str("</div>\n</div>");
            }
            FragmentKind::Test => {
                html.push_str("<div type=\"button\" class=\"collapsible \">\n");
                html.push_str(&format!(
                    "<div class=\"collapsibleHeading testCardLayout {class} \">\
                     <div>+ {name}</div>\n<div>{:.2}s</div>\n</div>\n",
                    self.elapsed
                ));
                html.push_str("<div class=\"collapsibleHeadingContent\">\n");
                self.render_children(html);
                html.push_str("</div>\n</div>");
            }
            FragmentKind::Subtest => {
                html.push_str(&format!(
                    "<div class=\"testCardLayout {class} \"><div>{name}</div>\n\
                     <div>{:.6}m</div></div>",
                    self.elapsed
                ));
            }
        }
    }

    fn render_children(&self, html: &mut String) {
        for child in &self.children {
            child.render_into(html);
            html.push('\n');
        }
    }
}

/// Escape HTML special characters
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
