use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::error::Result;
use crate::fmt::{money, plain};
use crate::models::{LedgerRow, TransactionRecord};
use crate::parser::Rejection;
use crate::pipeline::run_extract;
use crate::reports::{get_monthly_totals, get_totals};

fn amount_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub(crate) fn print_rejections(rejections: &[Rejection]) {
    for r in rejections {
        eprintln!(
            "{} line {}: {} \u{2192} {}",
            "warning:".yellow().bold(),
            r.line_no,
            r.field,
            r.line
        );
    }
    if !rejections.is_empty() {
        eprintln!(
            "{}",
            format!(
                "{} transaction-like line(s) skipped; check the statement layout",
                rejections.len()
            )
            .yellow()
        );
    }
}

fn preview_table(records: &[TransactionRecord], limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "S.No",
        "Date",
        "Transaction Id",
        "Remarks",
        "Balance",
        "Debit",
        "Credit",
    ]);
    for r in records.iter().take(limit) {
        table.add_row(vec![
            Cell::new(r.seq),
            Cell::new(r.date.format("%Y-%m-%d")),
            Cell::new(&r.txn_id),
            Cell::new(&r.remarks),
            amount_cell(plain(r.balance)),
            amount_cell(plain(r.debit)),
            amount_cell(plain(r.credit)),
        ]);
    }
    table
}

pub(crate) fn print_summary(rows: &[LedgerRow], symbol: &str) {
    let totals = get_totals(rows);
    println!("\n{} {}", "Total Debits:".bold(), money(totals.debit, symbol));
    println!("{} {}", "Total Credits:".bold(), money(totals.credit, symbol));

    let mut table = Table::new();
    table.set_header(vec!["Month", "Debit", "Credit"]);
    for m in get_monthly_totals(rows) {
        table.add_row(vec![
            Cell::new(m.label()),
            amount_cell(money(m.debit, symbol)),
            amount_cell(money(m.credit, symbol)),
        ]);
    }
    println!("\nMonthly Summary\n{table}");
}

pub(crate) fn report_extraction(
    records: &[TransactionRecord],
    preview_rows: usize,
    csv_path: &Path,
    symbol: &str,
) {
    println!("{}", preview_table(records, preview_rows));
    let rows: Vec<LedgerRow> = records.iter().map(LedgerRow::from).collect();
    print_summary(&rows, symbol);
    println!(
        "\n{} {} transactions written to {}",
        "\u{2713}".green(),
        records.len(),
        csv_path.display()
    );
}

pub fn run(config: &Option<PathBuf>, input: Option<PathBuf>, csv: Option<PathBuf>) -> Result<()> {
    let settings = super::load(config)?;
    let cfg = super::pipeline_config(&settings, input, csv, None)?;

    let extraction = run_extract(&cfg)?;
    print_rejections(&extraction.rejections);
    report_extraction(
        &extraction.records,
        settings.preview_rows,
        &cfg.output_csv_path,
        &cfg.currency_symbol,
    );
    Ok(())
}
