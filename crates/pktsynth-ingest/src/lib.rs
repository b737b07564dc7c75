//! Traffic capture ingestion.
//!
//! Reads one or more packet-capture CSV exports and normalizes them into a
//! uniform set of `(protocol, length)` [`Record`](pktsynth_model::Record)s.
//!
//! # Features
//!
//! - **CSV Loading**: Read CSV files into untyped string tables
//! - **Input Discovery**: Expand directories into their CSV files
//! - **Field Resolution**: Locate the protocol and length fields by name
//! - **Normalization**: Coerce lengths, drop malformed rows, count what was dropped
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use pktsynth_ingest::{FieldNames, load_records};
//!
//! let inputs = vec![PathBuf::from("captures/monday.csv")];
//! let set = load_records(&inputs, &FieldNames::default())?;
//! println!("{} records, {} dropped", set.len(), set.summary.dropped());
//! ```

mod discovery;
mod error;
mod fields;
mod normalize;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use table::{
    MAX_CSV_FILE_SIZE, RawTable, check_file_size, check_file_size_with_limit, read_csv_columns,
    read_csv_table, validate_encoding,
};

// === Input Discovery ===
pub use discovery::{list_csv_files, resolve_inputs};

// === Field Resolution ===
pub use fields::{
    DEFAULT_LENGTH_FIELD, DEFAULT_PROTOCOL_FIELD, FieldNames, ResolvedFields, resolve_fields,
    resolve_header_fields,
};

// === Normalization ===
pub use normalize::{NormalizeSummary, RecordSet, coerce_length, load_records, normalize_tables};
