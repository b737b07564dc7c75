//! Generation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Resolve inputs, read CSVs, normalize to records
//! 2. **Fit**: Estimate the protocol distribution and length statistics
//! 3. **Sample**: Draw the synthetic dataset
//! 4. **Report**: Compare real and synthetic, write the selected outputs
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use pktsynth_fit::{estimate, rng_from_seed, sample};
use pktsynth_ingest::{FieldNames, RecordSet, load_records};
use pktsynth_model::{FittedModel, Record, SyntheticRecord};
use pktsynth_report::{ComparisonSummary, OutputConfig, OutputPaths, RunArtifacts, write_outputs};

/// Settings for a full generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub inputs: Vec<PathBuf>,
    pub fields: FieldNames,
    /// Synthetic record count; defaults to the number of valid input records.
    pub samples: Option<usize>,
    /// Fixed seed for reproducible sampling; OS entropy when `None`.
    pub seed: Option<u64>,
    pub output: OutputConfig,
    /// Run every stage but write nothing.
    pub dry_run: bool,
}

impl GenerateOptions {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            fields: FieldNames::default(),
            samples: None,
            seed: None,
            output: OutputConfig::default(),
            dry_run: false,
        }
    }
}

/// Everything a generation run produced.
#[derive(Debug)]
pub struct GenerateResult {
    pub records: RecordSet,
    pub model: FittedModel,
    pub synthetic: Vec<SyntheticRecord>,
    pub summary: ComparisonSummary,
    pub outputs: OutputPaths,
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
    pub dry_run: bool,
}

/// Result of a fit-only run.
#[derive(Debug)]
pub struct FitResult {
    pub records: RecordSet,
    pub model: FittedModel,
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Read and normalize the inputs into one record set.
pub fn ingest(inputs: &[PathBuf], fields: &FieldNames) -> Result<RecordSet> {
    let span = info_span!("ingest", inputs = inputs.len());
    let _guard = span.enter();
    let start = Instant::now();

    let set = load_records(inputs, fields).context("load traffic records")?;

    info!(
        sources = set.summary.sources,
        rows_read = set.summary.rows_read,
        records = set.len(),
        dropped = set.summary.dropped(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(set)
}

// ============================================================================
// Stage 2: Fit
// ============================================================================

/// Estimate the model from the normalized records.
pub fn fit(records: &[Record]) -> Result<FittedModel> {
    let span = info_span!("fit", records = records.len());
    let _guard = span.enter();
    let start = Instant::now();

    let model = estimate(records).context("fit traffic model")?;

    info!(
        protocols = model.protocol_count(),
        duration_ms = start.elapsed().as_millis(),
        "fit complete"
    );
    Ok(model)
}

// ============================================================================
// Stage 3: Sample
// ============================================================================

/// Draw the synthetic dataset.
pub fn synthesize(
    model: &FittedModel,
    samples: Option<usize>,
    seed: Option<u64>,
) -> Result<Vec<SyntheticRecord>> {
    let span = info_span!("sample", seed = ?seed);
    let _guard = span.enter();
    let start = Instant::now();

    let mut rng = rng_from_seed(seed);
    let synthetic = sample(model, samples, &mut rng).context("sample synthetic records")?;

    info!(
        samples = synthetic.len(),
        duration_ms = start.elapsed().as_millis(),
        "sample complete"
    );
    Ok(synthetic)
}

// ============================================================================
// Stage 4: Report
// ============================================================================

/// Build the comparison summary and write the selected outputs.
pub fn report(
    config: &OutputConfig,
    run: RunArtifacts<'_>,
    dry_run: bool,
) -> Result<OutputPaths> {
    let span = info_span!("report", output_dir = %config.output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    if dry_run {
        info!(
            duration_ms = start.elapsed().as_millis(),
            "output skipped (dry run)"
        );
        return Ok(OutputPaths::default());
    }

    let paths = write_outputs(config, run)
        .with_context(|| format!("write outputs to {}", config.output_dir.display()))?;

    info!(
        files = paths.iter().count(),
        duration_ms = start.elapsed().as_millis(),
        "report complete"
    );
    Ok(paths)
}

/// Run ingest, fit, sample and report end to end.
pub fn run_generate(options: &GenerateOptions) -> Result<GenerateResult> {
    let records = ingest(&options.inputs, &options.fields)?;
    let model = fit(&records.records)?;
    let synthetic = synthesize(&model, options.samples, options.seed)?;
    let summary = ComparisonSummary::from_records(&records.records, &synthetic);

    let outputs = report(
        &options.output,
        RunArtifacts {
            real: &records.records,
            synthetic: &synthetic,
            model: &model,
            summary: &summary,
            seed: options.seed,
        },
        options.dry_run,
    )?;

    Ok(GenerateResult {
        records,
        model,
        synthetic,
        summary,
        outputs,
        output_dir: options.output.output_dir.clone(),
        seed: options.seed,
        dry_run: options.dry_run,
    })
}

/// Run ingest and fit only.
pub fn run_fit(inputs: &[PathBuf], fields: &FieldNames) -> Result<FitResult> {
    let records = ingest(inputs, fields)?;
    let model = fit(&records.records)?;
    Ok(FitResult { records, model })
}
