//! Locating the protocol and length fields in a header row.

use std::path::Path;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// Default protocol field name in packet-capture CSV exports.
pub const DEFAULT_PROTOCOL_FIELD: &str = "Protocol";
/// Default packet length field name in packet-capture CSV exports.
pub const DEFAULT_LENGTH_FIELD: &str = "Length";

/// Source names of the two fields the normalizer reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub protocol: String,
    pub length: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL_FIELD.to_string(),
            length: DEFAULT_LENGTH_FIELD.to_string(),
        }
    }
}

impl FieldNames {
    pub fn new(protocol: impl Into<String>, length: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            length: length.into(),
        }
    }
}

/// Column indices of the resolved fields in one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFields {
    pub protocol: usize,
    pub length: usize,
}

impl ResolvedFields {
    /// Column indices in `(protocol, length)` order.
    pub fn columns(&self) -> Vec<usize> {
        vec![self.protocol, self.length]
    }
}

/// Find both fields in `table`, failing with the discovered header names.
pub fn resolve_fields(table: &RawTable, fields: &FieldNames) -> Result<ResolvedFields> {
    resolve_header_fields(&table.path, &table.headers, fields)
}

/// Find both fields in a header row read from `path`.
pub fn resolve_header_fields(
    path: &Path,
    headers: &[String],
    fields: &FieldNames,
) -> Result<ResolvedFields> {
    Ok(ResolvedFields {
        protocol: resolve_field(path, headers, &fields.protocol)?,
        length: resolve_field(path, headers, &fields.length)?,
    })
}

/// Exact match first, then case-insensitive on trimmed names.
fn resolve_field(path: &Path, headers: &[String], name: &str) -> Result<usize> {
    let wanted = name.trim();
    headers
        .iter()
        .position(|header| header == wanted)
        .or_else(|| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(wanted))
        })
        .ok_or_else(|| IngestError::MissingField {
            field: name.to_string(),
            path: path.to_path_buf(),
            available: headers.to_vec(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> RawTable {
        RawTable::new(
            "capture.csv",
            headers.iter().map(|h| (*h).to_string()).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn test_resolve_default_fields() {
        let t = table(&["No.", "Time", "Source", "Destination", "Protocol", "Length", "Info"]);
        let resolved = resolve_fields(&t, &FieldNames::default()).unwrap();
        assert_eq!(resolved, ResolvedFields { protocol: 4, length: 5 });
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let t = table(&["protocol", "LENGTH"]);
        let resolved = resolve_fields(&t, &FieldNames::default()).unwrap();
        assert_eq!(resolved, ResolvedFields { protocol: 0, length: 1 });
    }

    #[test]
    fn test_exact_match_preferred() {
        let t = table(&["length", "Length", "Protocol"]);
        let resolved = resolve_fields(&t, &FieldNames::default()).unwrap();
        assert_eq!(resolved.length, 1);
    }

    #[test]
    fn test_custom_field_names() {
        let t = table(&["proto", "frame.len"]);
        let resolved = resolve_fields(&t, &FieldNames::new("proto", "frame.len")).unwrap();
        assert_eq!(resolved, ResolvedFields { protocol: 0, length: 1 });
    }

    #[test]
    fn test_missing_field_reports_headers() {
        let t = table(&["Protocol", "Size"]);
        let err = resolve_fields(&t, &FieldNames::default()).unwrap_err();
        match err {
            IngestError::MissingField {
                field, available, ..
            } => {
                assert_eq!(field, "Length");
                assert_eq!(available, vec!["Protocol", "Size"]);
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }
}
