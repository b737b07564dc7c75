//! Synthetic dataset export and real-vs-synthetic comparison reports.
//!
//! - [`dataset`]: `synthetic_traffic.csv` writer
//! - [`comparison`]: per-protocol summary statistics
//! - [`chart`]: SVG protocol and length comparison charts
//! - [`density`]: histograms and Gaussian KDE used by the length chart
//! - [`export`]: `model.json`
//! - [`outputs`]: output directory layout and the combined write step

pub mod chart;
pub mod comparison;
pub mod dataset;
pub mod density;
pub mod error;
pub mod export;
pub mod outputs;

pub use chart::{render_length_comparison, render_protocol_comparison};
pub use comparison::{ComparisonSummary, ProtocolComparison, SideStats};
pub use dataset::{write_records, write_synthetic_csv};
pub use density::{Histogram, gaussian_kde, scott_bandwidth};
pub use error::{ReportError, Result};
pub use export::{ModelReport, ProtocolEntry, write_model_json};
pub use outputs::{
    DATASET_FILE, LENGTH_CHART_FILE, MODEL_JSON_FILE, OutputConfig, OutputPaths,
    PROTOCOL_CHART_FILE, RunArtifacts, write_outputs,
};
