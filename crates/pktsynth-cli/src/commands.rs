use anyhow::Result;

use pktsynth_cli::pipeline::{self, FitResult, GenerateOptions, GenerateResult};
use pktsynth_report::OutputConfig;

use crate::cli::{FitArgs, GenerateArgs};

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let options = GenerateOptions {
        inputs: args.input.inputs.clone(),
        fields: args.input.field_names(),
        samples: args.samples,
        seed: args.seed,
        output: OutputConfig {
            output_dir: args.output_dir.clone(),
            write_dataset: true,
            write_charts: !args.no_plots,
            write_model_json: args.model_json,
        },
        dry_run: args.dry_run,
    };
    pipeline::run_generate(&options)
}

pub fn run_fit(args: &FitArgs) -> Result<FitResult> {
    pipeline::run_fit(&args.input.inputs, &args.input.field_names())
}
