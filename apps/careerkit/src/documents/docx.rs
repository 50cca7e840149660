//! DOCX text extraction straight from `word/document.xml`.
//!
//! Body paragraphs come first, one per line. Table rows follow, each row's
//! non-empty cells joined by ` | `.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;
use zip::ZipArchive;

use crate::errors::AppError;

const DOCUMENT_PART: &str = "word/document.xml";

fn table_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<w:tbl>.*?</w:tbl>").expect("valid regex"))
}

fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<w:tr[ >].*?</w:tr>").expect("valid regex"))
}

fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<w:tc[ >].*?</w:tc>").expect("valid regex"))
}

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<w:p[ >].*?</w:p>").expect("valid regex"))
}

fn run_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab/>").expect("valid regex")
    })
}

pub fn extract(bytes: &[u8]) -> Result<String, AppError> {
    let xml = read_document_xml(bytes)?;
    Ok(document_text(&xml))
}

fn read_document_xml(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("failed to open DOCX: {e}")))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| AppError::Extraction(format!("DOCX has no {DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("failed to read {DOCUMENT_PART}: {e}")))?;
    Ok(xml)
}

fn document_text(xml: &str) -> String {
    let body = table_re().replace_all(xml, "");
    let mut lines: Vec<String> = paragraph_re()
        .find_iter(&body)
        .map(|p| paragraph_text(p.as_str()))
        .filter(|t| !t.trim().is_empty())
        .collect();

    for table in table_re().find_iter(xml) {
        for row in row_re().find_iter(table.as_str()) {
            let cells: Vec<String> = cell_re()
                .find_iter(row.as_str())
                .map(|cell| cell_text(cell.as_str()))
                .filter(|t| !t.is_empty())
                .collect();
            if !cells.is_empty() {
                lines.push(cells.join(" | "));
            }
        }
    }

    lines.join("\n")
}

fn cell_text(cell_xml: &str) -> String {
    paragraph_re()
        .find_iter(cell_xml)
        .map(|p| paragraph_text(p.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn paragraph_text(paragraph_xml: &str) -> String {
    run_text_re()
        .captures_iter(paragraph_xml)
        .map(|c| match c.get(1) {
            Some(text) => unescape_xml(text.as_str()),
            None => "\t".to_string(),
        })
        .collect()
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
