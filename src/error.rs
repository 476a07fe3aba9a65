use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassbookError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("No transactions found in {} (statement layout may have changed)", .0.display())]
    NoTransactions(PathBuf),

    #[error("Could not write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not read text from {}: {message}", path.display())]
    Pdf { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PassbookError>;
