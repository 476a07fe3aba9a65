//! The two batch stages, wired to files through an explicit config.
//!
//! `extract`: statement -> ledger CSV. `report`: ledger CSV -> Markdown digest.
//! Each stage does all of its parsing before it opens an output file, so a
//! fatal condition leaves nothing behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::categorizer::CategoryRules;
use crate::error::{PassbookError, Result};
use crate::ledger::{create_output, load_ledger, write_ledger};
use crate::markdown::render_report;
use crate::models::{LedgerRow, TransactionRecord};
use crate::parser::{build_ledger, parse_statement, Rejection};
use crate::pdf::read_statement_text;
use crate::reports::{get_income_report, IncomeReport};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_csv_path: PathBuf,
    pub output_report_path: PathBuf,
    pub rules: CategoryRules,
    pub currency_symbol: String,
}

impl PipelineConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            input_path: PathBuf::from(&settings.input_path),
            output_csv_path: PathBuf::from(&settings.output_csv_path),
            output_report_path: PathBuf::from(&settings.output_report_path),
            rules: settings.rules()?,
            currency_symbol: settings.currency_symbol.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Extract
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Extraction {
    /// Sorted by date.
    pub records: Vec<TransactionRecord>,
    pub rejections: Vec<Rejection>,
}

/// Parse statement text into a date-ordered ledger. `source` is only used
/// for the error message.
pub fn extract_records(text: &str, source: &Path) -> Result<Extraction> {
    let outcome = parse_statement(text);
    if outcome.entries.is_empty() {
        return Err(PassbookError::NoTransactions(source.to_path_buf()));
    }
    Ok(Extraction {
        records: build_ledger(outcome.entries),
        rejections: outcome.rejections,
    })
}

pub fn run_extract(config: &PipelineConfig) -> Result<Extraction> {
    let text = read_statement_text(&config.input_path)?;
    let extraction = extract_records(&text, &config.input_path)?;
    write_ledger(&config.output_csv_path, &extraction.records)?;
    Ok(extraction)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Digest {
    pub rows: Vec<LedgerRow>,
    pub report: IncomeReport,
    pub markdown: String,
}

pub fn build_digest(rows: Vec<LedgerRow>, rules: &CategoryRules, symbol: &str) -> Digest {
    let report = get_income_report(&rows, rules);
    let markdown = render_report(&report, rules, symbol);
    Digest {
        rows,
        report,
        markdown,
    }
}

pub fn run_report(config: &PipelineConfig) -> Result<Digest> {
    let rows = load_ledger(&config.output_csv_path)?;
    let digest = build_digest(rows, &config.rules, &config.currency_symbol);

    let path = &config.output_report_path;
    let mut file = create_output(path)?;
    file.write_all(digest.markdown.as_bytes())
        .map_err(|source| PassbookError::OutputWrite {
            path: path.clone(),
            source,
        })?;
    Ok(digest)
}
