use std::path::PathBuf;

use crate::error::{PassbookError, Result};
use crate::settings::{save_settings, Settings};

pub fn show(config: &Option<PathBuf>) -> Result<()> {
    let path = super::settings_path(config);
    let settings = super::load(config)?;
    let json = serde_json::to_string_pretty(&settings)
        .map_err(|e| PassbookError::Settings(e.to_string()))?;
    let source = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{source}", path.display());
    println!("{json}");
    Ok(())
}

pub fn init(config: &Option<PathBuf>, force: bool) -> Result<()> {
    let path = super::settings_path(config);
    if path.exists() && !force {
        return Err(PassbookError::Settings(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    save_settings(&Settings::default(), &path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
