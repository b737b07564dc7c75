//! Record normalization: raw CSV rows to `(protocol, length)` records.
//!
//! Field resolution is a hard precondition and fails the whole batch. Row
//! problems (unparseable length, empty protocol) only drop that row and are
//! reported as aggregate counts.

use std::path::PathBuf;

use pktsynth_model::Record;

use crate::discovery::resolve_inputs;
use crate::error::Result;
use crate::fields::{FieldNames, resolve_fields, resolve_header_fields};
use crate::table::{RawTable, read_csv_columns};

/// Aggregate outcome of normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub sources: usize,
    pub rows_read: usize,
    pub kept: usize,
    /// Rows whose length was missing or not a non-negative number.
    pub dropped_length: usize,
    /// Rows with a usable length but an empty protocol label.
    pub dropped_protocol: usize,
}

impl NormalizeSummary {
    pub fn dropped(&self) -> usize {
        self.dropped_length + self.dropped_protocol
    }
}

/// The normalized record set with its summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub records: Vec<Record>,
    pub summary: NormalizeSummary,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Coerce a raw length cell to a non-negative integer.
///
/// Accepts integers and decimals (fractions truncate toward zero). Empty,
/// non-numeric, negative, NaN and infinite values yield `None`.
pub fn coerce_length(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(length) = trimmed.parse::<u64>() {
        return Some(length);
    }
    let parsed: f64 = trimmed.parse().ok()?;
    if !parsed.is_finite() || parsed < 0.0 || parsed >= u64::MAX as f64 {
        return None;
    }
    Some(parsed.trunc() as u64)
}

/// Normalize already-loaded tables into one record set.
///
/// Every table's fields are resolved before any row is cleaned; rows are then
/// taken from the tables in the order given.
pub fn normalize_tables(tables: &[RawTable], fields: &FieldNames) -> Result<RecordSet> {
    let resolved = tables
        .iter()
        .map(|table| resolve_fields(table, fields))
        .collect::<Result<Vec<_>>>()?;

    let mut summary = NormalizeSummary {
        sources: tables.len(),
        ..NormalizeSummary::default()
    };
    let mut records = Vec::with_capacity(tables.iter().map(RawTable::len).sum());

    for (table, columns) in tables.iter().zip(&resolved) {
        for row in 0..table.len() {
            summary.rows_read += 1;
            let Some(length) = table.cell(row, columns.length).and_then(coerce_length) else {
                summary.dropped_length += 1;
                continue;
            };
            let protocol = table.cell(row, columns.protocol).map(str::trim).unwrap_or("");
            if protocol.is_empty() {
                summary.dropped_protocol += 1;
                continue;
            }
            records.push(Record::new(protocol, length));
        }
    }
    summary.kept = records.len();

    Ok(RecordSet { records, summary })
}

/// Read the given inputs and normalize them into one record set.
///
/// Directories expand to their CSV files. Any missing file, unreadable file,
/// or missing field aborts before records are produced. Only the protocol and
/// length columns are kept in memory.
pub fn load_records(inputs: &[PathBuf], fields: &FieldNames) -> Result<RecordSet> {
    let files = resolve_inputs(inputs)?;
    let tables = files
        .iter()
        .map(|path| {
            read_csv_columns(path, |path, headers| {
                resolve_header_fields(path, headers, fields).map(|resolved| resolved.columns())
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let set = normalize_tables(&tables, fields)?;

    tracing::info!(
        sources = set.summary.sources,
        rows_read = set.summary.rows_read,
        kept = set.summary.kept,
        dropped_length = set.summary.dropped_length,
        dropped_protocol = set.summary.dropped_protocol,
        "normalized records"
    );

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;

    fn table(name: &str, headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            name,
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_coerce_length_integers() {
        assert_eq!(coerce_length("60"), Some(60));
        assert_eq!(coerce_length("  1514 "), Some(1514));
        assert_eq!(coerce_length("0"), Some(0));
    }

    #[test]
    fn test_coerce_length_decimals_truncate() {
        assert_eq!(coerce_length("60.9"), Some(60));
        assert_eq!(coerce_length("1.5e2"), Some(150));
    }

    #[test]
    fn test_coerce_length_rejects_invalid() {
        assert_eq!(coerce_length(""), None);
        assert_eq!(coerce_length("   "), None);
        assert_eq!(coerce_length("abc"), None);
        assert_eq!(coerce_length("-4"), None);
        assert_eq!(coerce_length("NaN"), None);
        assert_eq!(coerce_length("inf"), None);
        assert_eq!(coerce_length("12.3.4"), None);
    }

    #[test]
    fn test_normalize_drops_bad_rows() {
        let t = table(
            "a.csv",
            &["Protocol", "Length"],
            &[&["TCP", "60"], &["UDP", "n/a"], &["", "80"], &["DNS"], &["  ARP ", "42"]],
        );
        let set = normalize_tables(&[t], &FieldNames::default()).unwrap();

        assert_eq!(set.records, vec![Record::new("TCP", 60), Record::new("ARP", 42)]);
        assert_eq!(
            set.summary,
            NormalizeSummary {
                sources: 1,
                rows_read: 5,
                kept: 2,
                dropped_length: 2,
                dropped_protocol: 1,
            }
        );
    }

    #[test]
    fn test_normalize_concatenates_in_order() {
        let first = table("a.csv", &["Protocol", "Length"], &[&["TCP", "60"]]);
        let second = table("b.csv", &["Length", "Info", "Protocol"], &[&["90", "x", "UDP"]]);
        let set = normalize_tables(&[first, second], &FieldNames::default()).unwrap();

        assert_eq!(set.records, vec![Record::new("TCP", 60), Record::new("UDP", 90)]);
        assert_eq!(set.summary.sources, 2);
    }

    #[test]
    fn test_normalize_missing_field_in_any_table_fails() {
        let good = table("a.csv", &["Protocol", "Length"], &[&["TCP", "60"]]);
        let bad = table("b.csv", &["Protocol", "Bytes"], &[&["UDP", "90"]]);
        let err = normalize_tables(&[good, bad], &FieldNames::default()).unwrap_err();

        assert!(matches!(err, IngestError::MissingField { ref field, .. } if field == "Length"));
    }

    #[test]
    fn test_normalize_all_invalid_is_empty_not_error() {
        let t = table("a.csv", &["Protocol", "Length"], &[&["TCP", "?"], &["UDP", ""]]);
        let set = normalize_tables(&[t], &FieldNames::default()).unwrap();

        assert!(set.is_empty());
        assert_eq!(set.summary.dropped(), 2);
    }
}
