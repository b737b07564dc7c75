use std::path::{Path, PathBuf};

/// An untyped CSV table: header names plus string cells, one `Vec` per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Source the table was read from, used in error messages.
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(path: impl AsRef<Path>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            headers,
            rows,
        }
    }

    /// Cell at `column` in `row`, if the row is long enough.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
