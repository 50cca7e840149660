//! Plain-text extraction from resume and job files.
//!
//! Dispatches on the file extension: `.pdf`, `.docx`, `.txt` and `.md`.
//! Uploads go through `extract_text_from_bytes` with the client's file name.

pub mod docx;
pub mod pdf;

use std::path::Path;

use tracing::debug;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" | "md" => Ok(Self::Text),
            "" => Err(AppError::UnsupportedFormat("(no extension)".to_string())),
            other => Err(AppError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Reads `path` and extracts its text.
pub fn extract_text(path: &Path) -> Result<String, AppError> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(path.display().to_string())
        } else {
            AppError::Io(e)
        }
    })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    extract_text_from_bytes(file_name, &bytes)
}

/// Extracts text from in-memory file content. `file_name` only selects the
/// format. Whitespace-only output is an `Extraction` error.
pub fn extract_text_from_bytes(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    let kind = DocumentKind::from_file_name(file_name)?;

    let text = match kind {
        DocumentKind::Pdf => pdf::extract(bytes)?,
        DocumentKind::Docx => docx::extract(bytes)?,
        DocumentKind::Text => String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::Extraction(format!("{file_name} is not valid UTF-8")))?,
    };

    if text.trim().is_empty() {
        return Err(AppError::Extraction(format!("no text found in {file_name}")));
    }

    debug!("Extracted {} chars from {file_name} ({kind:?})", text.len());
    Ok(text)
}
