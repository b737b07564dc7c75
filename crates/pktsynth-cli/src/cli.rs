//! CLI argument definitions for the traffic synthesizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use pktsynth_ingest::{DEFAULT_LENGTH_FIELD, DEFAULT_PROTOCOL_FIELD, FieldNames};

#[derive(Parser)]
#[command(
    name = "pktsynth",
    version,
    about = "Synthesize network traffic records from packet-capture CSV exports",
    long_about = "Fit a protocol distribution and per-protocol packet length model to \
                  packet-capture CSV exports, then sample a synthetic dataset from it.\n\n\
                  Writes the synthetic CSV plus SVG charts comparing real and synthetic traffic."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fit a model to the inputs, sample a synthetic dataset, and write reports.
    Generate(GenerateArgs),

    /// Fit a model to the inputs and print it without writing anything.
    Fit(FitArgs),
}

/// Inputs and field names shared by every subcommand.
#[derive(Args)]
pub struct InputArgs {
    /// CSV files or directories of CSV files.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Name of the protocol field.
    #[arg(long = "protocol-field", value_name = "NAME", default_value = DEFAULT_PROTOCOL_FIELD)]
    pub protocol_field: String,

    /// Name of the packet length field.
    #[arg(long = "length-field", value_name = "NAME", default_value = DEFAULT_LENGTH_FIELD)]
    pub length_field: String,
}

impl InputArgs {
    pub fn field_names(&self) -> FieldNames {
        FieldNames::new(&self.protocol_field, &self.length_field)
    }
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Number of synthetic records (default: number of valid input records).
    #[arg(long = "samples", short = 'n', value_name = "N")]
    pub samples: Option<usize>,

    /// Seed for reproducible sampling (default: OS entropy).
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Skip the comparison charts.
    #[arg(long = "no-plots")]
    pub no_plots: bool,

    /// Also write the fitted model to model.json.
    #[arg(long = "model-json")]
    pub model_json: bool,

    /// Fit and sample without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
