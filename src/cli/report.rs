use std::path::PathBuf;

use colored::Colorize;

use crate::categorizer::Category;
use crate::error::Result;
use crate::fmt::money;
use crate::pipeline::{run_report, Digest, PipelineConfig};

pub(crate) fn report_digest(digest: &Digest, cfg: &PipelineConfig) {
    let symbol = &cfg.currency_symbol;
    for category in Category::ALL {
        let section = digest.report.section(category);
        println!(
            "{:<16} {:>3} txn  {}",
            category.label(),
            section.lines.len(),
            money(section.total, symbol)
        );
    }
    println!(
        "{} {}",
        "Total credited for income tax:".bold(),
        money(digest.report.grand_total, symbol)
    );
    let missing = digest
        .rows
        .iter()
        .filter(|r| r.date.is_none() || r.debit.is_none() || r.credit.is_none())
        .count();
    if missing > 0 {
        eprintln!(
            "{} {missing} row(s) had an unreadable date or amount and were left out of the affected totals",
            "warning:".yellow().bold()
        );
    }
    println!(
        "{} Markdown report generated: {}",
        "\u{2713}".green(),
        cfg.output_report_path.display()
    );
}

pub fn run(config: &Option<PathBuf>, csv: Option<PathBuf>, report: Option<PathBuf>) -> Result<()> {
    let settings = super::load(config)?;
    let cfg = super::pipeline_config(&settings, None, csv, report)?;
    let digest = run_report(&cfg)?;
    report_digest(&digest, &cfg);
    Ok(())
}
