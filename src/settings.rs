use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categorizer::CategoryRules;
use crate::error::{PassbookError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Statement to extract from (.pdf, or pre-extracted page text).
    pub input_path: String,
    pub output_csv_path: String,
    pub output_report_path: String,
    pub currency_symbol: String,
    pub salary_markers: Vec<String>,
    pub dividend_markers: Vec<String>,
    /// Kept as a string in the file so it reads as an amount, e.g. "5000.00".
    pub other_credit_threshold: String,
    pub preview_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let rules = CategoryRules::default();
        Self {
            input_path: "statements/statement_unlocked.pdf".to_string(),
            output_csv_path: "reports/clean_transactions.csv".to_string(),
            output_report_path: "reports/bank_report.md".to_string(),
            currency_symbol: "\u{20b9}".to_string(),
            salary_markers: rules.salary_markers,
            dividend_markers: rules.dividend_markers,
            other_credit_threshold: format!("{:.2}", rules.other_threshold),
            preview_rows: 10,
        }
    }
}

impl Settings {
    pub fn rules(&self) -> Result<CategoryRules> {
        let threshold: Decimal = self.other_credit_threshold.trim().parse().map_err(|_| {
            PassbookError::Settings(format!(
                "other_credit_threshold is not an amount: '{}'",
                self.other_credit_threshold
            ))
        })?;
        Ok(CategoryRules {
            salary_markers: self.salary_markers.clone(),
            dividend_markers: self.dividend_markers.clone(),
            other_threshold: threshold,
        })
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("passbook")
}

pub fn default_settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Load settings from `path`, falling back to defaults when the file is absent.
/// Fields missing from the file take their default value.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| PassbookError::Settings(format!("{}: {e}", path.display())))
}

pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| PassbookError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
