//! `model.json` export of the fitted model.

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use pktsynth_model::FittedModel;
use serde::Serialize;

use crate::error::{ReportError, Result};

/// One protocol of the exported model, in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolEntry {
    pub protocol: String,
    pub probability: f64,
    pub mean_length: f64,
    pub stddev_length: f64,
    pub count: u64,
}

/// Serializable snapshot of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    pub seed: Option<u64>,
    pub record_count: usize,
    pub sample_count: usize,
    pub protocols: Vec<ProtocolEntry>,
}

impl ModelReport {
    pub fn new(model: &FittedModel, sample_count: usize, seed: Option<u64>) -> Self {
        let protocols = model
            .distribution()
            .ranked()
            .into_iter()
            .filter_map(|(label, probability)| {
                let stats = model.length_stats(label)?;
                Some(ProtocolEntry {
                    protocol: label.to_string(),
                    probability,
                    mean_length: stats.mean,
                    stddev_length: stats.stddev,
                    count: stats.count,
                })
            })
            .collect();
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            seed,
            record_count: model.record_count(),
            sample_count,
            protocols,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write `report` as pretty-printed JSON to `path`.
pub fn write_model_json(path: &Path, report: &ModelReport) -> Result<()> {
    let content = report.to_json()?;
    fs::write(path, content).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), protocols = report.protocols.len(), "wrote model report");
    Ok(())
}
