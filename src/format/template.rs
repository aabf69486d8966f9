//! The document shell: a handlebars template with named slots.
//!
//! Slots are `{{name}}` expressions (`{{{html_elements}}}` for the
//! pre-rendered cards). The registry runs in strict mode, so an unknown
//! slot is an error. Every slot in [`SLOTS`] must appear in the output,
//! which is checked once when the template is loaded.

use crate::error::{ReportError, Result};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Template bundled into the binary.
const BUNDLED_TEMPLATE: &str = include_str!("../../assets/report-template.html");

const TEMPLATE_NAME: &str = "report";

pub const SLOT_HTML_ELEMENTS: &str = "html_elements";
pub const SLOT_FAILED_TESTS: &str = "failed_tests";
pub const SLOT_PASSED_TESTS: &str = "passed_tests";
pub const SLOT_SKIPPED_TESTS: &str = "skipped_tests";
pub const SLOT_TOTAL_TEST_TIME: &str = "total_test_time";
pub const SLOT_TEST_DATE: &str = "test_date";

/// Every slot a document template must provide.
pub const SLOTS: &[&str] = &[
    SLOT_HTML_ELEMENTS,
    SLOT_FAILED_TESTS,
    SLOT_PASSED_TESTS,
    SLOT_SKIPPED_TESTS,
    SLOT_TOTAL_TEST_TIME,
    SLOT_TEST_DATE,
];

/// Values substituted into a template's slots.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SlotValues {
    pub html_elements: String,
    pub failed_tests: usize,
    pub passed_tests: usize,
    pub skipped_tests: usize,
    pub total_test_time: String,
    pub test_date: String,
}

/// A registered document template.
#[derive(Debug, Clone)]
pub struct DocumentTemplate {
    registry: Handlebars<'static>,
}

impl DocumentTemplate {
    /// The template shipped with the binary.
    ///
    /// # Errors
    ///
    /// Returns a template error if the bundled asset is missing a slot.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_TEMPLATE)
    }

    /// Load a template from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid template.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| ReportError::io_at(path, e))?;
        Self::parse(&source)
    }

    /// Register template source.
    ///
    /// # Errors
    ///
    /// Returns an error for a syntax error, an unknown slot, or a missing
    /// slot.
    pub fn parse(source: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string(TEMPLATE_NAME, source)?;

        let template = Self { registry };
        template.check_slots()?;
        Ok(template)
    }

    /// Render once with a marker per slot and require every marker back.
    fn check_slots(&self) -> Result<()> {
        let markers: Map<String, Value> = SLOTS
            .iter()
            .map(|slot| ((*slot).to_string(), Value::String(slot_marker(slot))))
            .collect();
        let rendered = self.registry.render(TEMPLATE_NAME, &markers)?;

        match SLOTS
            .iter()
            .copied()
            .find(|slot| !rendered.contains(&slot_marker(slot)))
        {
            Some(slot) => Err(ReportError::MissingSlot(slot)),
            None => Ok(()),
        }
    }

    /// Substitute `values` into every slot.
    ///
    /// # Errors
    ///
    /// Returns a render error if handlebars fails.
    pub fn render(&self, values: &SlotValues) -> Result<String> {
        Ok(self.registry.render(TEMPLATE_NAME, values)?)
    }
}

fn slot_marker(slot: &str) -> String {
    format!("__slot_{slot}__")
}
