//! Exchange Record
//!
//! The raw lines read back from one exchange file. Lives for a single trial.

use crate::{FIRST_TIMING_LINE, INPUT_LINE, OUTPUT_LINE};
use sortbench_corpus::{ParseSequenceError, parse_sequence};

/// Lines of a completed exchange file, in file order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeRecord {
    lines: Vec<String>,
}

impl ExchangeRecord {
    /// Wrap already-trimmed lines
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    fn line(&self, number: usize) -> Option<&str> {
        self.lines.get(number - 1).map(String::as_str)
    }

    /// Input sequence text (line 1)
    pub fn input(&self) -> Option<&str> {
        self.line(INPUT_LINE)
    }

    /// Output sequence text (line 2), absent if the executable wrote nothing
    pub fn output(&self) -> Option<&str> {
        self.line(OUTPUT_LINE)
    }

    /// Elapsed-time lines, one per algorithm that reported
    pub fn timings(&self) -> &[String] {
        self.lines.get(FIRST_TIMING_LINE - 1..).unwrap_or(&[])
    }

    /// Parsed input sequence
    pub fn input_sequence(&self) -> Result<Vec<i64>, ParseSequenceError> {
        parse_sequence(self.input().unwrap_or_default())
    }

    /// Parsed output sequence; empty if the executable wrote nothing
    pub fn output_sequence(&self) -> Result<Vec<i64>, ParseSequenceError> {
        parse_sequence(self.output().unwrap_or_default())
    }

    /// Number of lines read back
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the file was empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Ordered raw values for mapping onto a measurement schema
    pub fn into_values(self) -> Vec<String> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lines: &[&str]) -> ExchangeRecord {
        ExchangeRecord::from_lines(lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_full_record() {
        let r = record(&["3 1 2", "1 2 3", "10", "20", "30", "40"]);
        assert_eq!(r.input_sequence().unwrap(), vec![3, 1, 2]);
        assert_eq!(r.output_sequence().unwrap(), vec![1, 2, 3]);
        assert_eq!(r.timings(), &["10", "20", "30", "40"]);
    }

    #[test]
    fn test_input_only_record() {
        let r = record(&["3 1 2"]);
        assert_eq!(r.output(), None);
        assert!(r.timings().is_empty());
        assert!(r.output_sequence().unwrap().is_empty());
    }
}
