//! Statement text source.
//!
//! `.pdf` files go through `pdf-extract`; anything else is taken to be page
//! text that was already extracted and is read as UTF-8.

use std::path::Path;

use crate::error::{PassbookError, Result};

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

#[cfg(feature = "pdf")]
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "extractor panicked".to_string())
}

// pdf-extract panics on some malformed documents instead of returning Err.
#[cfg(feature = "pdf")]
fn extract_pdf_text(path: &Path, bytes: &[u8]) -> Result<String> {
    let pdf_err = |message: String| PassbookError::Pdf {
        path: path.to_path_buf(),
        message,
    };
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(extracted) => extracted.map_err(|e| pdf_err(e.to_string())),
        Err(payload) => Err(pdf_err(panic_message(payload.as_ref()))),
    }
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf_text(path: &Path, _bytes: &[u8]) -> Result<String> {
    Err(PassbookError::Pdf {
        path: path.to_path_buf(),
        message: "built without the `pdf` feature; pass pre-extracted text instead".to_string(),
    })
}

/// Concatenated text of every page in the statement, one line per text row.
pub fn read_statement_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(PassbookError::InputNotFound(path.to_path_buf()));
    }
    let bytes =
        std::fs::read(path).map_err(|_| PassbookError::InputNotFound(path.to_path_buf()))?;
    let text = if is_pdf(path) {
        extract_pdf_text(path, &bytes)?
    } else {
        String::from_utf8_lossy(&bytes).into_owned()
    };
    // Form feeds separate pages in some extractors.
    Ok(text.replace('\u{c}', "\n"))
}
