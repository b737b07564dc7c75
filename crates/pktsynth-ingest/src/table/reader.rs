//! CSV file reading into raw string tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IngestError, Result};

use super::raw::RawTable;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reject UTF-16 encoded files (detected by byte-order mark).
///
/// A UTF-8 BOM is accepted and stripped from the header row.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Reads a CSV file with a single header row into a [`RawTable`].
///
/// Header names are trimmed. Rows may be shorter or longer than the header;
/// missing cells are treated as missing values by the normalizer.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let (mut reader, headers) = open_csv(path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| parse_error(path, source))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read csv table"
    );

    Ok(RawTable::new(path, headers, rows))
}

/// Reads only the columns chosen by `select` from a CSV file.
///
/// `select` sees the full trimmed header row and returns column indices; the
/// table keeps those columns in that order and drops the rest while reading.
/// A selected cell past the end of a short row is stored as an empty string.
pub fn read_csv_columns<F>(path: &Path, select: F) -> Result<RawTable>
where
    F: FnOnce(&Path, &[String]) -> Result<Vec<usize>>,
{
    let (mut reader, headers) = open_csv(path)?;
    let columns = select(path, &headers)?;
    let selected: Vec<String> = columns
        .iter()
        .map(|&index| headers.get(index).cloned().unwrap_or_default())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| parse_error(path, source))?;
        rows.push(
            columns
                .iter()
                .map(|&index| record.get(index).unwrap_or_default().to_string())
                .collect(),
        );
    }

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        kept_columns = selected.len(),
        rows = rows.len(),
        "read csv columns"
    );

    Ok(RawTable::new(path, selected, rows))
}

/// Opens `path` after the size and encoding checks and reads its header row.
fn open_csv(path: &Path) -> Result<(csv::Reader<File>, Vec<String>)> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| parse_error(path, source))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok((reader, headers))
}

fn parse_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}

/// Trims whitespace and a leading UTF-8 BOM from a header value.
fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_table_basic() {
        let file = create_temp_csv(b"No.,Protocol,Length\n1,TCP,60\n2,UDP,120\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.headers, vec!["No.", "Protocol", "Length"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["2", "UDP", "120"]);
    }

    #[test]
    fn test_read_csv_table_quoted_fields() {
        let file = create_temp_csv(b"Protocol,Length,Info\nHTTP,512,\"GET /, HTTP/1.1\"\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.rows[0][2], "GET /, HTTP/1.1");
    }

    #[test]
    fn test_read_csv_table_with_bom() {
        let file = create_temp_csv("\u{feff}Protocol,Length\nTCP,60\n".as_bytes());
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.headers, vec!["Protocol", "Length"]);
    }

    #[test]
    fn test_read_csv_table_short_rows() {
        let file = create_temp_csv(b"Protocol,Length\nTCP\nUDP,80\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.rows[0], vec!["TCP"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_read_csv_columns_keeps_selection() {
        let file = create_temp_csv(b"No.,Protocol,Info,Length\n1,TCP,SYN,60\n2,UDP\n");
        let table = read_csv_columns(file.path(), |_, headers| {
            assert_eq!(headers, ["No.", "Protocol", "Info", "Length"]);
            Ok(vec![3, 1])
        })
        .unwrap();

        assert_eq!(table.headers, vec!["Length", "Protocol"]);
        assert_eq!(table.rows, vec![vec!["60", "TCP"], vec!["", "UDP"]]);
    }

    #[test]
    fn test_read_csv_columns_selection_error() {
        let file = create_temp_csv(b"Protocol,Length\nTCP,60\n");
        let result = read_csv_columns(file.path(), |path, _| {
            Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            })
        });

        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_table_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_csv_table(file.path());

        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = read_csv_table(&dir.path().join("missing.csv"));

        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'P', 0x00]);
        let result = validate_encoding(file.path());

        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_check_file_size_with_limit() {
        let file = create_temp_csv(b"Protocol,Length\nTCP,60\n");

        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
        assert!(matches!(
            check_file_size_with_limit(file.path(), 4),
            Err(IngestError::FileTooLarge { max_size: 4, .. })
        ));
    }
}
