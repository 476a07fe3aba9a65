use rust_decimal::Decimal;

use crate::models::LedgerRow;

/// Income categories for the tax digest.
///
/// Variant order is the precedence order: a credit that matches more than one
/// rule belongs to the first. Reordering changes the report totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Salary,
    Dividend,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Salary, Category::Dividend, Category::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Dividend => "Dividends",
            Self::Other => "Other Credits",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRules {
    pub salary_markers: Vec<String>,
    /// Securities dividends and bank interest.
    pub dividend_markers: Vec<String>,
    /// "Other" credits must be strictly above this.
    pub other_threshold: Decimal,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            salary_markers: vec!["MPOWER".to_string()],
            dividend_markers: vec!["NACH".to_string(), "INT.PD".to_string()],
            other_threshold: Decimal::new(5000, 0),
        }
    }
}

fn contains_any(remarks_upper: &str, markers: &[String]) -> bool {
    markers
        .iter()
        .any(|m| !m.is_empty() && remarks_upper.contains(&m.to_uppercase()))
}

impl CategoryRules {
    /// Category for a credit row, or `None` if the row is not a credit or
    /// matches no rule.
    pub fn classify(&self, row: &LedgerRow) -> Option<Category> {
        let credit = row.credit_amount()?;
        let remarks = row.remarks.to_uppercase();

        if contains_any(&remarks, &self.salary_markers) {
            return Some(Category::Salary);
        }
        if contains_any(&remarks, &self.dividend_markers) {
            return Some(Category::Dividend);
        }
        // Rows reaching here match no marker.
        if credit > self.other_threshold {
            return Some(Category::Other);
        }
        None
    }
}
