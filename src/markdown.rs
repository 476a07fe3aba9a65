use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{CellAlignment, Table};

use crate::categorizer::{Category, CategoryRules};
use crate::fmt::{money, plain};
use crate::reports::{CategorySection, IncomeReport, ReportLine};

fn date_cell(line: &ReportLine) -> String {
    line.date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Pipes inside a cell would start a new column.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn lines_table(lines: &[ReportLine]) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_header(vec!["Date", "Remarks", "Credit"]);
    for line in lines {
        table.add_row(vec![date_cell(line), escape_cell(&line.remarks), plain(line.amount)]);
    }
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    table.to_string()
}

fn heading(category: Category, rules: &CategoryRules, symbol: &str) -> String {
    match category {
        Category::Salary => format!(
            "## \u{1f4bc} Salary Transactions ({})",
            rules.salary_markers.join(", ")
        ),
        Category::Dividend => format!(
            "## \u{1f4b0} Dividend Transactions ({})",
            rules.dividend_markers.join(", ")
        ),
        Category::Other => format!(
            "## \u{1f4e5} Other Credit Transactions (> {})",
            money(rules.other_threshold, symbol)
        ),
    }
}

fn subtotal(section: &CategorySection, rules: &CategoryRules, symbol: &str) -> String {
    let label = match section.category {
        Category::Salary => "Total Salary Credited".to_string(),
        Category::Dividend => "Total Dividends Credited".to_string(),
        Category::Other => format!(
            "Total Other Credits (> {})",
            money(rules.other_threshold, symbol)
        ),
    };
    format!("**{label}: {}**", money(section.total, symbol))
}

/// Render the income digest.
///
/// Sections appear in category precedence order, then the grand total, then
/// the biggest expenditure.
pub fn render_report(report: &IncomeReport, rules: &CategoryRules, symbol: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for section in &report.sections {
        out.push(heading(section.category, rules, symbol));
        if section.lines.is_empty() {
            out.push("_None._".to_string());
        } else {
            out.push(lines_table(&section.lines));
        }
        out.push(subtotal(section, rules, symbol));
    }

    out.push(format!(
        "TOTAL CREDITED FOR INCOME TAX CALC : {}",
        money(report.grand_total, symbol)
    ));

    out.push("## \u{1f4b8} Biggest Expenditure".to_string());
    match &report.biggest_expense {
        Some(line) => out.push(format!(
            "- **Date:** {}\n- **Remarks:** {}\n- **Amount:** {}",
            date_cell(line),
            line.remarks,
            money(line.amount, symbol)
        )),
        None => out.push("_No debit transactions._".to_string()),
    }

    let mut md = out.join("\n\n");
    md.push('\n');
    md
}
