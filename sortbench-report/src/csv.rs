//! CSV Output

use crate::aggregate::INDEX_LABEL;
use crate::report::SummaryTable;
use sortbench_store::StoreError;

/// Render the summary in its transposed reporting shape
pub fn generate_csv_report(summary: &SummaryTable) -> Result<String, StoreError> {
    summary.to_table().transpose(INDEX_LABEL).to_csv()
}
