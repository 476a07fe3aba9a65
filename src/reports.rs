use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::categorizer::{Category, CategoryRules};
use crate::models::LedgerRow;

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub debit: Decimal,
    pub credit: Decimal,
}

/// Sum of every debit and credit. Missing values are skipped.
pub fn get_totals(rows: &[LedgerRow]) -> Totals {
    rows.iter().fold(Totals::default(), |mut t, r| {
        t.debit += r.debit.unwrap_or_default();
        t.credit += r.credit.unwrap_or_default();
        t
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl MonthlyTotal {
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Debit and credit sums per calendar month, oldest first. Rows without a
/// date are left out.
pub fn get_monthly_totals(rows: &[LedgerRow]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<(i32, u32), Totals> = BTreeMap::new();
    for r in rows {
        let Some(date) = r.date else { continue };
        let entry = by_month.entry((date.year(), date.month())).or_default();
        entry.debit += r.debit.unwrap_or_default();
        entry.credit += r.credit.unwrap_or_default();
    }
    by_month
        .into_iter()
        .map(|((year, month), t)| MonthlyTotal {
            year,
            month,
            debit: t.debit,
            credit: t.credit,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Income digest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub date: Option<NaiveDate>,
    pub remarks: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection {
    pub category: Category,
    pub lines: Vec<ReportLine>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeReport {
    /// One section per category, in precedence order.
    pub sections: Vec<CategorySection>,
    pub grand_total: Decimal,
    pub biggest_expense: Option<ReportLine>,
    pub totals: Totals,
}

impl IncomeReport {
    pub fn section(&self, category: Category) -> &CategorySection {
        &self.sections[category as usize]
    }
}

/// The debit with the largest amount. Ties go to the earliest row.
pub fn get_biggest_expense(rows: &[LedgerRow]) -> Option<ReportLine> {
    let mut best: Option<(&LedgerRow, Decimal)> = None;
    for r in rows {
        let Some(amount) = r.debit_amount() else { continue };
        if best.map_or(true, |(_, top)| amount > top) {
            best = Some((r, amount));
        }
    }
    best.map(|(r, amount)| ReportLine {
        date: r.date,
        remarks: r.remarks.clone(),
        amount,
    })
}

pub fn get_income_report(rows: &[LedgerRow], rules: &CategoryRules) -> IncomeReport {
    let mut sections: Vec<CategorySection> = Category::ALL
        .iter()
        .map(|&category| CategorySection {
            category,
            lines: Vec::new(),
            total: Decimal::ZERO,
        })
        .collect();

    for r in rows {
        let Some(category) = rules.classify(r) else { continue };
        let Some(amount) = r.credit_amount() else { continue };
        let section = &mut sections[category as usize];
        section.total += amount;
        section.lines.push(ReportLine {
            date: r.date,
            remarks: r.remarks.clone(),
            amount,
        });
    }

    let grand_total = sections.iter().map(|s| s.total).sum();

    IncomeReport {
        sections,
        grand_total,
        biggest_expense: get_biggest_expense(rows),
        totals: get_totals(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, m, day)
    }

    fn amt(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn credit(date: Option<NaiveDate>, remarks: &str, amount: &str) -> LedgerRow {
        LedgerRow {
            date,
            remarks: remarks.to_string(),
            debit: Some(Decimal::ZERO),
            credit: Some(amt(amount)),
            ..Default::default()
        }
    }

    fn debit(date: Option<NaiveDate>, remarks: &str, amount: &str) -> LedgerRow {
        LedgerRow {
            date,
            remarks: remarks.to_string(),
            debit: Some(amt(amount)),
            credit: Some(Decimal::ZERO),
            ..Default::default()
        }
    }

    #[test]
    fn test_totals() {
        let rows = vec![
            credit(d(4, 1), "MPOWER SALARY APR", "45000.00"),
            debit(d(4, 2), "RENT", "15000.00"),
            debit(d(4, 3), "GROCERY", "1234.56"),
        ];
        let t = get_totals(&rows);
        assert_eq!(t.credit, amt("45000.00"));
        assert_eq!(t.debit, amt("16234.56"));
    }

    #[test]
    fn test_monthly_totals_in_chronological_order() {
        let rows = vec![
            debit(d(5, 3), "B", "10.00"),
            credit(NaiveDate::from_ymd_opt(2023, 12, 31), "A", "1.00"),
            credit(d(4, 1), "C", "5.00"),
            debit(d(4, 20), "D", "2.50"),
        ];
        let months = get_monthly_totals(&rows);
        let labels: Vec<String> = months.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["2023-12", "2024-04", "2024-05"]);
        assert_eq!(months[1].credit, amt("5.00"));
        assert_eq!(months[1].debit, amt("2.50"));
    }

    #[test]
    fn test_monthly_totals_sum_to_overall_totals() {
        let rows = vec![
            credit(d(1, 5), "X", "100.10"),
            debit(d(1, 9), "Y", "20.20"),
            credit(d(2, 1), "Z", "0.30"),
            debit(d(3, 1), "W", "999.99"),
            debit(d(3, 30), "V", "0.01"),
        ];
        let totals = get_totals(&rows);
        let months = get_monthly_totals(&rows);
        let debit_sum: Decimal = months.iter().map(|m| m.debit).sum();
        let credit_sum: Decimal = months.iter().map(|m| m.credit).sum();
        assert_eq!(debit_sum, totals.debit);
        assert_eq!(credit_sum, totals.credit);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let mut broken = debit(None, "ATM", "300.00");
        broken.credit = None;
        let rows = vec![broken, debit(d(4, 1), "RENT", "100.00")];
        let t = get_totals(&rows);
        assert_eq!(t.debit, amt("400.00"));
        assert_eq!(t.credit, Decimal::ZERO);
        // undated row is out of the monthly view
        assert_eq!(get_monthly_totals(&rows)[0].debit, amt("100.00"));
    }

    #[test]
    fn test_biggest_expense() {
        let rows = vec![
            debit(d(4, 1), "A", "100.00"),
            debit(d(4, 2), "B", "5000.50"),
            debit(d(4, 3), "C", "300.00"),
            credit(d(4, 4), "SALARY", "90000.00"),
        ];
        let top = get_biggest_expense(&rows).unwrap();
        assert_eq!(top.amount, amt("5000.50"));
        assert_eq!(top.remarks, "B");
    }

    #[test]
    fn test_biggest_expense_tie_goes_to_first() {
        let rows = vec![
            debit(d(4, 1), "FIRST", "700.00"),
            debit(d(4, 2), "SECOND", "700.00"),
        ];
        assert_eq!(get_biggest_expense(&rows).unwrap().remarks, "FIRST");
    }

    #[test]
    fn test_biggest_expense_none_without_debits() {
        let rows = vec![credit(d(4, 1), "SALARY", "1.00")];
        assert_eq!(get_biggest_expense(&rows), None);
    }

    #[test]
    fn test_salary_counted_once_in_grand_total() {
        let rows = vec![credit(d(4, 30), "MPOWER SALARY APR", "45000.00")];
        let report = get_income_report(&rows, &CategoryRules::default());
        assert_eq!(report.section(Category::Salary).lines.len(), 1);
        assert!(report.section(Category::Dividend).lines.is_empty());
        assert!(report.section(Category::Other).lines.is_empty());
        assert_eq!(report.grand_total, amt("45000.00"));
    }

    #[test]
    fn test_dividend_subtotal() {
        let rows = vec![
            credit(d(4, 10), "NACH DIVIDEND XYZ", "1200.00"),
            credit(d(4, 30), "INT.PD SAVINGS", "50.00"),
        ];
        let report = get_income_report(&rows, &CategoryRules::default());
        let div = report.section(Category::Dividend);
        assert_eq!(div.lines.len(), 2);
        assert_eq!(div.total, amt("1250.00"));
    }

    #[test]
    fn test_small_unmatched_credit_only_in_raw_totals() {
        let rows = vec![
            credit(d(4, 1), "UPI TRANSFER", "6000.00"),
            credit(d(4, 2), "UPI TRANSFER", "4000.00"),
        ];
        let report = get_income_report(&rows, &CategoryRules::default());
        let other = report.section(Category::Other);
        assert_eq!(other.lines.len(), 1);
        assert_eq!(other.lines[0].amount, amt("6000.00"));
        assert_eq!(report.grand_total, amt("6000.00"));
        assert_eq!(report.totals.credit, amt("10000.00"));
    }

    #[test]
    fn test_categories_are_disjoint() {
        let rows = vec![
            credit(d(4, 1), "MPOWER NACH INT.PD", "9000.00"),
            credit(d(4, 2), "NACH INT.PD", "9000.00"),
            credit(d(4, 3), "UPI", "9000.00"),
        ];
        let report = get_income_report(&rows, &CategoryRules::default());
        let counted: usize = report.sections.iter().map(|s| s.lines.len()).sum();
        assert_eq!(counted, 3);
        assert_eq!(report.grand_total, amt("27000.00"));
        assert_eq!(report.section(Category::Salary).total, amt("9000.00"));
        assert_eq!(report.section(Category::Dividend).total, amt("9000.00"));
        assert_eq!(report.section(Category::Other).total, amt("9000.00"));
    }

    #[test]
    fn test_sections_in_precedence_order() {
        let report = get_income_report(&[], &CategoryRules::default());
        let order: Vec<Category> = report.sections.iter().map(|s| s.category).collect();
        assert_eq!(order, vec![Category::Salary, Category::Dividend, Category::Other]);
        assert_eq!(report.grand_total, Decimal::ZERO);
    }
}
