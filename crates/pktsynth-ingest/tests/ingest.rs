//! Integration tests for loading capture files.

use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::TempDir;

use pktsynth_ingest::{
    FieldNames, IngestError, coerce_length, load_records, read_csv_columns, resolve_header_fields,
};
use pktsynth_model::Record;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_records_from_capture_export() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "capture.csv",
        "\"No.\",\"Time\",\"Source\",\"Destination\",\"Protocol\",\"Length\",\"Info\"\n\
         \"1\",\"0.000000\",\"10.0.0.1\",\"10.0.0.2\",\"TCP\",\"66\",\"443 > 51000 [ACK]\"\n\
         \"2\",\"0.000120\",\"10.0.0.2\",\"8.8.8.8\",\"DNS\",\"74\",\"Standard query A example.com\"\n\
         \"3\",\"0.000250\",\"10.0.0.1\",\"10.0.0.2\",\"TCP\",\"\",\"truncated\"\n",
    );

    let set = load_records(&[path], &FieldNames::default()).unwrap();

    assert_eq!(set.records, vec![Record::new("TCP", 66), Record::new("DNS", 74)]);
    assert_eq!(set.summary.rows_read, 3);
    assert_eq!(set.summary.dropped_length, 1);
}

#[test]
fn load_records_concatenates_sources() {
    let dir = TempDir::new().unwrap();
    let first = write_csv(&dir, "b.csv", "Protocol,Length\nUDP,120\n");
    let second = write_csv(&dir, "a.csv", "Protocol,Length\nTCP,60\nTCP,1514\n");

    let set = load_records(&[first, second], &FieldNames::default()).unwrap();

    assert_eq!(
        set.records,
        vec![
            Record::new("UDP", 120),
            Record::new("TCP", 60),
            Record::new("TCP", 1514)
        ]
    );
    assert_eq!(set.summary.sources, 2);
}

#[test]
fn load_records_missing_field_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "capture.csv", "proto,bytes\nTCP,60\n");

    let err = load_records(&[path], &FieldNames::default()).unwrap_err();
    let message = err.to_string();

    assert!(matches!(err, IngestError::MissingField { .. }));
    assert!(message.contains("proto, bytes"), "{message}");
}

#[test]
fn load_records_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let good = write_csv(&dir, "a.csv", "Protocol,Length\nTCP,60\n");
    let missing = dir.path().join("missing.csv");

    let err = load_records(&[good, missing], &FieldNames::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn load_records_with_custom_field_names() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "capture.csv", "_ws.col.Protocol,frame.len\nQUIC,1252\n");

    let fields = FieldNames::new("_ws.col.Protocol", "frame.len");
    let set = load_records(&[path], &fields).unwrap();

    assert_eq!(set.records, vec![Record::new("QUIC", 1252)]);
}

#[test]
fn capture_columns_are_projected_to_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "capture.csv",
        "No.,Time,Source,Destination,protocol,LENGTH,Info\n\
         1,0.0,10.0.0.1,10.0.0.2,TCP,66,\"443 > 51000 [ACK]\"\n\
         2,0.1,10.0.0.2,8.8.8.8,DNS,74,query,extra\n",
    );
    let fields = FieldNames::default();

    let table = read_csv_columns(&path, |path, headers| {
        resolve_header_fields(path, headers, &fields).map(|resolved| resolved.columns())
    })
    .unwrap();

    assert_eq!(table.headers, vec!["protocol", "LENGTH"]);
    assert_eq!(table.rows, vec![vec!["TCP", "66"], vec!["DNS", "74"]]);

    let set = load_records(&[path], &fields).unwrap();
    assert_eq!(set.records, vec![Record::new("TCP", 66), Record::new("DNS", 74)]);
}

proptest! {
    #[test]
    fn coerce_length_accepts_non_negative_integers(value in any::<u32>()) {
        prop_assert_eq!(coerce_length(&value.to_string()), Some(u64::from(value)));
    }

    #[test]
    fn coerce_length_rejects_negative_numbers(value in 1u32..) {
        let text = format!("-{value}");
        prop_assert_eq!(coerce_length(&text), None);
    }

    #[test]
    fn coerce_length_truncates_fractions(whole in 0u32..100_000, frac in 1u32..1000) {
        let text = format!("{whole}.{frac:03}");
        prop_assert_eq!(coerce_length(&text), Some(u64::from(whole)));
    }
}
