//! Output directory layout and the combined write step.

use std::fs;
use std::path::{Path, PathBuf};

use pktsynth_model::{FittedModel, Record, SyntheticRecord};

use crate::chart::{render_length_comparison, render_protocol_comparison};
use crate::comparison::ComparisonSummary;
use crate::dataset::write_synthetic_csv;
use crate::error::{ReportError, Result};
use crate::export::{ModelReport, write_model_json};

pub const DATASET_FILE: &str = "synthetic_traffic.csv";
pub const PROTOCOL_CHART_FILE: &str = "protocol_comparison.svg";
pub const LENGTH_CHART_FILE: &str = "length_comparison.svg";
pub const MODEL_JSON_FILE: &str = "model.json";

/// Which artifacts to write, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub write_dataset: bool,
    pub write_charts: bool,
    pub write_model_json: bool,
}

impl OutputConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// True when nothing would be written.
    pub fn is_empty(&self) -> bool {
        !(self.write_dataset || self.write_charts || self.write_model_json)
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.output_dir.join(DATASET_FILE)
    }

    pub fn protocol_chart_path(&self) -> PathBuf {
        self.output_dir.join(PROTOCOL_CHART_FILE)
    }

    pub fn length_chart_path(&self) -> PathBuf {
        self.output_dir.join(LENGTH_CHART_FILE)
    }

    pub fn model_json_path(&self) -> PathBuf {
        self.output_dir.join(MODEL_JSON_FILE)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            write_dataset: true,
            write_charts: true,
            write_model_json: false,
        }
    }
}

/// Paths actually written by [`write_outputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPaths {
    pub dataset: Option<PathBuf>,
    pub protocol_chart: Option<PathBuf>,
    pub length_chart: Option<PathBuf>,
    pub model_json: Option<PathBuf>,
}

impl OutputPaths {
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [
            &self.dataset,
            &self.protocol_chart,
            &self.length_chart,
            &self.model_json,
        ]
        .into_iter()
        .flatten()
        .map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Everything the write step needs from a finished run.
#[derive(Debug, Clone, Copy)]
pub struct RunArtifacts<'a> {
    pub real: &'a [Record],
    pub synthetic: &'a [SyntheticRecord],
    pub model: &'a FittedModel,
    pub summary: &'a ComparisonSummary,
    pub seed: Option<u64>,
}

/// Write the artifacts selected by `config`, creating the output directory.
pub fn write_outputs(config: &OutputConfig, run: RunArtifacts<'_>) -> Result<OutputPaths> {
    let mut paths = OutputPaths::default();
    if config.is_empty() {
        return Ok(paths);
    }
    ensure_dir(&config.output_dir)?;

    if config.write_dataset {
        let path = config.dataset_path();
        write_synthetic_csv(&path, run.synthetic)?;
        paths.dataset = Some(path);
    }

    if config.write_charts {
        let path = config.protocol_chart_path();
        render_protocol_comparison(&path, run.summary)?;
        paths.protocol_chart = Some(path);

        let path = config.length_chart_path();
        render_length_comparison(&path, run.real, run.synthetic)?;
        paths.length_chart = Some(path);
    }

    if config.write_model_json {
        let path = config.model_json_path();
        let report = ModelReport::new(run.model, run.synthetic.len(), run.seed);
        write_model_json(&path, &report)?;
        paths.model_json = Some(path);
    }

    Ok(paths)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
