//! Textual form of an input sequence: integers separated by single spaces.

use thiserror::Error;

/// A token in a sequence line was not an integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid integer {token:?} at position {position}")]
pub struct ParseSequenceError {
    /// Offending token
    pub token: String,
    /// Zero-based token position
    pub position: usize,
}

/// Render a sequence as space-separated integers.
pub fn format_sequence(values: &[i64]) -> String {
    let mut out = String::with_capacity(values.len() * 6);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&value.to_string());
    }
    out
}

/// Parse a whitespace-separated line of integers. A blank line is an empty sequence.
pub fn parse_sequence(line: &str) -> Result<Vec<i64>, ParseSequenceError> {
    line.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse().map_err(|_| ParseSequenceError {
                token: token.to_string(),
                position,
            })
        })
        .collect()
}
