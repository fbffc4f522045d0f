//! Measurement Store
//!
//! One append-only CSV file per test class under a tests directory.

use crate::schema::{MappedRow, Schema};
use crate::table::{Table, format_line};
use crate::TABLE_EXTENSION;
use sortbench_corpus::TestClass;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by table operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access to a table failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Table file or directory
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The table file does not exist
    #[error("Table {name} does not exist: {}", path.display())]
    MissingTable {
        /// Table name
        name: String,
        /// Expected table location
        path: PathBuf,
    },

    /// A value contains a comma or line break
    #[error("Field cannot be stored in CSV: {0:?}")]
    InvalidField(String),

    /// An existing table header differs from the store schema
    #[error("Schema mismatch in {}: expected {expected:?}, found {found:?}", path.display())]
    SchemaMismatch {
        /// Table file
        path: PathBuf,
        /// Header line the schema produces
        expected: String,
        /// Header line on disk
        found: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Append-only per-class measurement tables sharing one schema
#[derive(Debug, Clone)]
pub struct MeasurementStore {
    dir: PathBuf,
    schema: Schema,
}

impl MeasurementStore {
    /// Store rooted at `dir`; nothing touches disk until a table is used.
    pub fn new(dir: impl Into<PathBuf>, schema: Schema) -> Self {
        Self {
            dir: dir.into(),
            schema,
        }
    }

    /// Directory holding the tables
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Column schema shared by every table
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Backing file of `class`
    pub fn table_path(&self, class: TestClass) -> PathBuf {
        self.dir
            .join(format!("{}.{}", class.table_name(), TABLE_EXTENSION))
    }

    /// Create the table with its header row if it does not exist yet.
    ///
    /// Never truncates an existing table. A zero-byte table gets the header.
    pub fn ensure_table(&self, class: TestClass) -> Result<PathBuf, StoreError> {
        let path = self.table_path(class);
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                self.write_header(&mut file, &path)?;
                debug!(table = class.table_name(), path = %path.display(), "created measurement table");
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let len = fs::metadata(&path)
                    .map_err(|e| StoreError::io(&path, e))?
                    .len();
                if len == 0 {
                    let mut file = OpenOptions::new()
                        .append(true)
                        .open(&path)
                        .map_err(|e| StoreError::io(&path, e))?;
                    self.write_header(&mut file, &path)?;
                    warn!(table = class.table_name(), path = %path.display(), "restored header of empty measurement table");
                }
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        }

        Ok(path)
    }

    fn write_header(&self, file: &mut fs::File, path: &Path) -> Result<(), StoreError> {
        let mut header = format_line(self.schema.columns())?;
        header.push('\n');
        file.write_all(header.as_bytes())
            .map_err(|e| StoreError::io(path, e))
    }

    /// Append one row and return its index.
    ///
    /// The index is the number of data rows already in the file, so indices
    /// stay gapless across store instances and process restarts.
    pub fn append_row(&self, class: TestClass, row: &MappedRow) -> Result<u64, StoreError> {
        let path = self.ensure_table(class)?;

        if row.values().len() != self.schema.value_columns().len() {
            return Err(StoreError::SchemaMismatch {
                path,
                expected: format!("{} value columns", self.schema.value_columns().len()),
                found: format!("{} values", row.values().len()),
            });
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| StoreError::io(&path, e))?;

        let mut lines = contents.lines();
        let expected = format_line(self.schema.columns())?;
        let found = lines.next().unwrap_or_default();
        if found != expected {
            return Err(StoreError::SchemaMismatch {
                path,
                expected,
                found: found.to_string(),
            });
        }
        let index = lines.filter(|line| !line.trim().is_empty()).count() as u64;

        let index_field = index.to_string();
        let mut fields: Vec<&str> = Vec::with_capacity(self.schema.len());
        fields.push(&index_field);
        fields.extend(row.values().iter().map(String::as_str));

        let mut line = String::new();
        if !contents.ends_with('\n') {
            // An earlier write was cut short; keep this row on its own line
            warn!(path = %path.display(), "measurement table missing trailing newline");
            line.push('\n');
        }
        line.push_str(&format_line(&fields)?);
        line.push('\n');

        file.write_all(line.as_bytes())
            .map_err(|e| StoreError::io(&path, e))?;

        if !row.is_exact() {
            warn!(
                table = class.table_name(),
                index,
                padded = row.padded(),
                dropped = row.dropped(),
                "row did not match schema width"
            );
        }
        debug!(table = class.table_name(), index, "appended measurement row");
        Ok(index)
    }

    /// Load the full table of `class`
    pub fn read_all(&self, class: TestClass) -> Result<Table, StoreError> {
        let path = self.table_path(class);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Table::parse(&contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::MissingTable {
                name: class.table_name().to_string(),
                path,
            }),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALGORITHMS: [&str; 4] = ["insertion_sort", "merge_sort", "quick_sort", "radix_sort"];

    fn store(dir: &Path) -> MeasurementStore {
        MeasurementStore::new(dir.join("tests"), Schema::measurement(&ALGORITHMS))
    }

    fn full_row(store: &MeasurementStore) -> MappedRow {
        store
            .schema()
            .map_values(["2 1", "1 2", "10", "20", "30", "40"])
    }

    #[test]
    fn test_ensure_table_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let path = store.ensure_table(TestClass::Sorted).unwrap();
        store.ensure_table(TestClass::Sorted).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("Test,Input Array,Output Array,Elapsed Time (ms - insertion_sort)"));
        assert!(path.ends_with("Correctly-Sorted.csv"));
    }

    #[test]
    fn test_ensure_table_never_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store.append_row(TestClass::Random, &full_row(&store)).unwrap();
        store.ensure_table(TestClass::Random).unwrap();

        assert_eq!(store.read_all(TestClass::Random).unwrap().len(), 1);
    }

    #[test]
    fn test_sequential_indices() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let indices: Vec<u64> = (0..5)
            .map(|_| store.append_row(TestClass::Sorted, &full_row(&store)).unwrap())
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);

        let table = store.read_all(TestClass::Sorted).unwrap();
        assert_eq!(table.column("Test").unwrap(), vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_indices_survive_restart() {
        let dir = tempfile::tempdir().unwrap();

        let first = store(dir.path());
        first.append_row(TestClass::Sorted, &full_row(&first)).unwrap();
        first.append_row(TestClass::Sorted, &full_row(&first)).unwrap();
        drop(first);

        let second = store(dir.path());
        let index = second.append_row(TestClass::Sorted, &full_row(&second)).unwrap();
        assert_eq!(index, 2);
    }

    #[test]
    fn test_tables_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store.append_row(TestClass::Sorted, &full_row(&store)).unwrap();
        let index = store.append_row(TestClass::ReverseSorted, &full_row(&store)).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_short_row_padded_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let row = store.schema().map_values(["5 4 3"]);
        store.append_row(TestClass::ReverseSorted, &row).unwrap();

        let contents = fs::read_to_string(store.table_path(TestClass::ReverseSorted)).unwrap();
        assert_eq!(contents.lines().nth(1).unwrap(), "0,5 4 3,,,,,");

        let table = store.read_all(TestClass::ReverseSorted).unwrap();
        assert_eq!(table.rows()[0].len(), 7);
    }

    #[test]
    fn test_row_from_other_schema_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let narrow = Schema::measurement(&ALGORITHMS[..2]).map_values(["1", "1", "1", "1"]);
        let err = store.append_row(TestClass::Sorted, &narrow).unwrap_err();
        assert!(matches!(err, StoreError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_header_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store.ensure_table(TestClass::Sorted).unwrap();

        let other = MeasurementStore::new(store.dir(), Schema::measurement(&["bubble_sort"]));
        let row = other.schema().map_values(["1", "1", "1"]);
        let err = other.append_row(TestClass::Sorted, &row).unwrap_err();
        assert!(matches!(err, StoreError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_recovers_from_missing_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let path = store.ensure_table(TestClass::Sorted).unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"0,1,1,1,1,1,1").unwrap();
        drop(file);

        let index = store.append_row(TestClass::Sorted, &full_row(&store)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(store.read_all(TestClass::Sorted).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_table_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.table_path(TestClass::Sorted), b"").unwrap();

        let first = store.append_row(TestClass::Sorted, &full_row(&store)).unwrap();
        let second = store.append_row(TestClass::Sorted, &full_row(&store)).unwrap();
        assert_eq!((first, second), (0, 1));

        let table = store.read_all(TestClass::Sorted).unwrap();
        assert_eq!(table.header(), store.schema().columns());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_read_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let err = store(dir.path()).read_all(TestClass::Random).unwrap_err();
        assert!(matches!(err, StoreError::MissingTable { .. }));
    }

    #[test]
    fn test_invalid_field_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let row = store.schema().map_values(["1,2"]);
        assert!(matches!(
            store.append_row(TestClass::Sorted, &row),
            Err(StoreError::InvalidField(_))
        ));
        assert!(store.read_all(TestClass::Sorted).unwrap().is_empty());
    }
}
