//! JSON Output

use crate::report::{Report, SummaryTable};

/// Generate a prettified JSON report with run metadata.
pub fn generate_json_report(summary: &SummaryTable) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Report::new(summary))
}
