pub mod config;
pub mod extract;
pub mod report;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::pipeline::PipelineConfig;
use crate::settings::{default_settings_path, load_settings, Settings};

#[derive(Parser)]
#[command(
    name = "passbook",
    about = "Extract bank statement transactions and build an income digest."
)]
pub struct Cli {
    /// Settings file (default: ~/.config/passbook/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract transactions from a statement into the cleaned CSV.
    Extract {
        /// Statement PDF (or pre-extracted page text)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Destination for the cleaned CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Build the Markdown income digest from the cleaned CSV.
    Report {
        /// Cleaned CSV to read
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Destination for the Markdown report
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Extract, then report.
    Run(RunArgs),
    /// Inspect or create the settings file.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
pub struct RunArgs {
    #[arg(long)]
    pub input: Option<PathBuf>,
    #[arg(long)]
    pub csv: Option<PathBuf>,
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings.
    Show,
    /// Write a settings file with default values.
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub(crate) fn settings_path(config: &Option<PathBuf>) -> PathBuf {
    config.clone().unwrap_or_else(default_settings_path)
}

pub(crate) fn load(config: &Option<PathBuf>) -> Result<Settings> {
    load_settings(&settings_path(config))
}

/// Settings file values, with any path flags from the command line on top.
pub(crate) fn pipeline_config(
    settings: &Settings,
    input: Option<PathBuf>,
    csv: Option<PathBuf>,
    report: Option<PathBuf>,
) -> Result<PipelineConfig> {
    let mut cfg = PipelineConfig::from_settings(settings)?;
    if let Some(p) = input {
        cfg.input_path = p;
    }
    if let Some(p) = csv {
        cfg.output_csv_path = p;
    }
    if let Some(p) = report {
        cfg.output_report_path = p;
    }
    Ok(cfg)
}
