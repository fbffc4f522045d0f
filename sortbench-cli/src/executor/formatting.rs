//! Output Formatting
//!
//! Human-readable terminal output for a summary table:
//! - One block per test class with per-algorithm statistics
//! - Skipped-cell counts where a column had empty or non-numeric cells
//! - A closing mean table with classes as columns, mirroring the transposed summary file

use super::execution::TrialSummary;
use sortbench_report::SummaryTable;

/// Format a summary table for human-readable terminal display
pub fn format_human_output(summary: &SummaryTable, trials: Option<&TrialSummary>) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("SortBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for class in &summary.classes {
        output.push_str(&format!("Test: {} ({} rows)\n", class.name, class.rows));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for algorithm in &class.algorithms {
            let stats = &algorithm.statistics;
            match &stats.summary {
                Some(s) => {
                    output.push_str(&format!("  {}\n", algorithm.algorithm));
                    output.push_str(&format!(
                        "      mean: {:.4} ms  median: {:.4} ms  stddev: {:.4} ms  cv: {:.2}%\n",
                        s.mean,
                        s.median,
                        s.std_dev,
                        s.coefficient_of_variation()
                    ));
                    output.push_str(&format!(
                        "      min: {:.4} ms  max: {:.4} ms  samples: {}\n",
                        s.min, s.max, s.sample_count
                    ));
                }
                None => {
                    output.push_str(&format!("  {}  (no numeric samples)\n", algorithm.algorithm));
                }
            }
            if stats.skipped > 0 {
                output.push_str(&format!("      skipped cells: {}\n", stats.skipped));
            }
        }
        output.push('\n');
    }

    if !summary.classes.is_empty() {
        output.push_str(&mean_table(summary));
    }

    if let Some(trials) = trials {
        output.push_str("\nSummary\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "  Trials: {}  Succeeded: {}  Failed: {}  Inexact rows: {}\n",
            trials.attempted, trials.succeeded, trials.failed, trials.inexact_rows
        ));
    }

    output
}

fn mean_table(summary: &SummaryTable) -> String {
    let mut output = String::new();
    output.push_str("Mean elapsed time (ms)\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');

    let name_width = summary
        .algorithms
        .iter()
        .map(|a| a.len())
        .max()
        .unwrap_or(12);
    let col_width = summary
        .classes
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(8)
        .max(10);

    output.push_str(&format!("  {:<width$}", "", width = name_width));
    for class in &summary.classes {
        output.push_str(&format!(" | {:>w$}", class.name, w = col_width));
    }
    output.push('\n');

    output.push_str(&format!("  {}", "-".repeat(name_width)));
    for _ in &summary.classes {
        output.push_str(&format!("-+-{}", "-".repeat(col_width)));
    }
    output.push('\n');

    for (index, algorithm) in summary.algorithms.iter().enumerate() {
        output.push_str(&format!("  {:<width$}", algorithm, width = name_width));
        for class in &summary.classes {
            let formatted = class
                .algorithms
                .get(index)
                .and_then(|a| a.statistics.mean())
                .map(|m| format!("{:.4}", m))
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(" | {:>w$}", formatted, w = col_width));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortbench_corpus::TestClass;
    use sortbench_report::{AlgorithmSummary, ClassSummary};
    use sortbench_stats::compute_column_statistics;

    fn summary() -> SummaryTable {
        SummaryTable {
            algorithms: vec!["merge_sort".to_string(), "radix_sort".to_string()],
            classes: vec![ClassSummary {
                class: TestClass::PartiallySorted,
                name: TestClass::PartiallySorted.table_name().to_string(),
                rows: 3,
                algorithms: vec![
                    AlgorithmSummary {
                        algorithm: "merge_sort".to_string(),
                        statistics: compute_column_statistics(&["10", "20", "30"]),
                    },
                    AlgorithmSummary {
                        algorithm: "radix_sort".to_string(),
                        statistics: compute_column_statistics(&["", "", ""]),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_human_output_lists_statistics() {
        let output = format_human_output(&summary(), None);
        assert!(output.contains("Test: Partial-Sorted (3 rows)"));
        assert!(output.contains("mean: 20.0000 ms"));
        assert!(output.contains("stddev: 10.0000 ms  cv: 50.00%"));
        assert!(output.contains("radix_sort  (no numeric samples)"));
        assert!(output.contains("skipped cells: 3"));
        assert!(!output.contains("Trials:"));
    }

    #[test]
    fn test_human_output_with_trials() {
        let trials = TrialSummary {
            attempted: 4,
            succeeded: 3,
            failed: 1,
            inexact_rows: 0,
        };
        let output = format_human_output(&summary(), Some(&trials));
        assert!(output.contains("Trials: 4  Succeeded: 3  Failed: 1"));
    }
}
