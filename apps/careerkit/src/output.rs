//! Everything the CLI writes to stdout. Logs go to stderr, so stdout is
//! always exactly one JSON document (or the raw text a command produces).

use std::io::Write;

use serde::Serialize;
use serde_json::json;

use crate::errors::AppError;

/// Pretty-prints `value` followed by a newline.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    print_text(&format!("{rendered}\n"))
}

/// Writes `text` verbatim; no newline is added.
pub fn print_text(text: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

pub fn failure_document(err: &AppError) -> serde_json::Value {
    json!({
        "success": false,
        "error": err.to_string(),
    })
}

/// Reports a failed command. Best effort: if stdout is gone there is
/// nobody left to tell.
pub fn print_failure(err: &AppError) {
    let document = failure_document(err);
    let _ = print_text(&format!("{document:#}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_document_shape() {
        let doc = failure_document(&AppError::NotFound("resume.pdf".into()));
        assert_eq!(doc["success"], false);
        assert_eq!(doc["error"], "File not found: resume.pdf");
    }
}
