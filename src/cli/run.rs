use std::path::PathBuf;

use crate::cli::extract::{print_rejections, report_extraction};
use crate::cli::report::report_digest;
use crate::cli::RunArgs;
use crate::error::Result;
use crate::pipeline::{run_extract, run_report};

pub fn run(config: &Option<PathBuf>, args: RunArgs) -> Result<()> {
    let settings = super::load(config)?;
    let cfg = super::pipeline_config(&settings, args.input, args.csv, args.report)?;

    let extraction = run_extract(&cfg)?;
    print_rejections(&extraction.rejections);
    report_extraction(
        &extraction.records,
        settings.preview_rows,
        &cfg.output_csv_path,
        &cfg.currency_symbol,
    );

    println!();
    let digest = run_report(&cfg)?;
    report_digest(&digest, &cfg);
    Ok(())
}
