//! Synthetic dataset CSV output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use pktsynth_model::SyntheticRecord;

use crate::error::{ReportError, Result};

/// Write records as CSV with a `protocol,length` header.
pub fn write_records<W: Write>(writer: W, records: &[SyntheticRecord]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    if records.is_empty() {
        writer.write_record(["protocol", "length"])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the synthetic dataset to `path`, replacing any existing file.
pub fn write_synthetic_csv(path: &Path, records: &[SyntheticRecord]) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(file, records).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = records.len(), "wrote synthetic dataset");
    Ok(())
}
