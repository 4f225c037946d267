//! Output formatting module for CLI

mod csv;
pub mod json;
mod table;
mod terminal;

pub use self::csv::CsvOutput;
pub use json::JsonOutput;
pub use table::TableOutput;
pub use terminal::TerminalOutput;

use crate::error::ActionLensError;
use crate::report::Report;

/// Trait for rendering scan reports
pub trait ReportRenderer {
    fn render_report(&self, report: &Report) -> Result<String, ActionLensError>;
}

/// Share of `part` in `whole` as a percentage, zero when `whole` is zero
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Average usages per action, zero when there are no actions
pub(crate) fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}
