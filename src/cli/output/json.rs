//! JSON output formatting

use super::ReportRenderer;
use crate::error::ActionLensError;
use crate::report::Report;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for JsonOutput {
    fn render_report(&self, report: &Report) -> Result<String, ActionLensError> {
        let mut output = serde_json::to_string_pretty(report)?;
        output.push('\n');
        Ok(output)
    }
}
