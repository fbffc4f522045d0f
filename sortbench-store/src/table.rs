//! In-memory CSV Table
//!
//! Fields are written verbatim, so a field may not contain a comma or a line
//! break. Sequence values are space-separated and timings are plain numbers,
//! which keeps every harness value representable without quoting.

use crate::store::StoreError;
use serde::Serialize;

/// Join fields into one CSV line (no trailing newline)
pub fn format_line<S: AsRef<str>>(fields: &[S]) -> Result<String, StoreError> {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        let field = field.as_ref();
        if field.contains([',', '\n', '\r']) {
            return Err(StoreError::InvalidField(field.to_string()));
        }
        if i > 0 {
            line.push(',');
        }
        line.push_str(field);
    }
    Ok(line)
}

/// Split one CSV line into trimmed fields
pub fn parse_line(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.trim().to_string()).collect()
}

/// Header plus data rows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Empty table with the given header
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Parse CSV text. The first non-blank line is the header; blank lines are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut lines = contents.lines().filter(|line| !line.trim().is_empty());
        let header = lines.next().map(parse_line).unwrap_or_default();
        let rows = lines.map(parse_line).collect();
        Self { header, rows }
    }

    /// Render as CSV text with a trailing newline
    pub fn to_csv(&self) -> Result<String, StoreError> {
        let mut out = format_line(&self.header)?;
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format_line(row)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Append a data row
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Column names
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Every cell of column `name`; short rows contribute an empty cell.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// Swap rows and columns.
    ///
    /// The first column of `self` (row keys) becomes the new header after
    /// `index_label`; every other column becomes a row keyed by its old name.
    pub fn transpose(&self, index_label: &str) -> Table {
        let mut header = Vec::with_capacity(self.rows.len() + 1);
        header.push(index_label.to_string());
        header.extend(
            self.rows
                .iter()
                .map(|row| row.first().cloned().unwrap_or_default()),
        );

        let rows = self
            .header
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, column)| {
                let mut row = Vec::with_capacity(self.rows.len() + 1);
                row.push(column.clone());
                row.extend(
                    self.rows
                        .iter()
                        .map(|r| r.get(index).cloned().unwrap_or_default()),
                );
                row
            })
            .collect();

        Table { header, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_rejects_commas() {
        assert_eq!(format_line(&["a", "b c", ""]).unwrap(), "a,b c,");
        assert!(matches!(
            format_line(&["1,2"]),
            Err(StoreError::InvalidField(_))
        ));
        assert!(format_line(&["line\nbreak"]).is_err());
    }

    #[test]
    fn test_parse_keeps_empty_cells() {
        let table = Table::parse("Test,A,B\n0,x,\n\n1,,y\n");
        assert_eq!(table.header(), &["Test", "A", "B"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("B").unwrap(), vec!["", "y"]);
        assert!(table.column("C").is_none());
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let table = Table::parse("K,A,B\nrow,1\n");
        assert_eq!(table.column("B").unwrap(), vec![""]);
    }

    #[test]
    fn test_csv_round_trip() {
        let mut table = Table::new(strings(&["K", "V"]));
        table.push_row(strings(&["a", "1"]));
        let csv = table.to_csv().unwrap();
        assert_eq!(csv, "K,V\na,1\n");
        assert_eq!(Table::parse(&csv), table);
    }

    #[test]
    fn test_transpose() {
        let mut table = Table::new(strings(&["Test Name", "Mean (ms - a)", "Mean (ms - b)"]));
        table.push_row(strings(&["Sorted", "1", "2"]));
        table.push_row(strings(&["Random", "3", "4"]));

        let t = table.transpose("Index");
        assert_eq!(t.header(), &["Index", "Sorted", "Random"]);
        assert_eq!(t.rows()[0], strings(&["Mean (ms - a)", "1", "3"]));
        assert_eq!(t.rows()[1], strings(&["Mean (ms - b)", "2", "4"]));
    }
}
