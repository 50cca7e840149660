//! Turns structured cover-letter model output into a finished letter.
//!
//! Accepts either the JSON object the model was asked for (optionally under a
//! top-level `properties` key, fenced, or wrapped in chatter) or the same
//! content already flattened to a word stream by `careerkit clean --mode text`.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::output::{flatten_json_text, parse_loose_json};

pub const DEFAULT_SIGNATURE: &str = "[Your Name]";
const DEFAULT_ROLE: &str = "the position";
const DEFAULT_COMPANY: &str = "the company";
const KNOWN_COMPANIES: &[&str] = &[
    "NVIDIA",
    "Apple",
    "Google",
    "Meta",
    "SpaceX",
    "Microsoft",
    "Amazon",
    "Tesla",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProofParagraph {
    pub paragraph: String,
    pub proof_point: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LetterParts {
    pub opening_hook: String,
    pub proof_paragraphs: Vec<ProofParagraph>,
    pub closing: String,
    pub role: String,
    pub company: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    Json,
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormattedLetter {
    pub success: bool,
    pub letter: String,
    pub role: String,
    pub company: String,
    pub parsed_as: InputShape,
    pub paragraph_count: usize,
}

fn detect_company(haystack: &str) -> String {
    KNOWN_COMPANIES
        .iter()
        .find(|c| haystack.contains(*c))
        .map(|c| c.to_string())
        .unwrap_or_else(|| DEFAULT_COMPANY.to_string())
}

fn non_empty_or(value: &str, default: &str) -> String {
    match value.trim() {
        "" => default.to_string(),
        v => v.to_string(),
    }
}

/// Reads `deliverable.cover_letter` and `analysis.inferred_target_role`.
pub fn parts_from_json(value: &Value) -> LetterParts {
    let props = match value.get("properties") {
        Some(props) if props.is_object() => props,
        _ => value,
    };
    let letter = &props["deliverable"]["cover_letter"];

    let proof_paragraphs = letter["proof_paragraphs"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => ProofParagraph {
                        paragraph: s.clone(),
                        proof_point: String::new(),
                    },
                    Value::Object(_) => ProofParagraph {
                        paragraph: item["paragraph"].as_str().unwrap_or("").to_string(),
                        proof_point: item["proof_point"].as_str().unwrap_or("").to_string(),
                    },
                    other => ProofParagraph {
                        paragraph: other.to_string(),
                        proof_point: String::new(),
                    },
                })
                .filter(|p| !p.paragraph.trim().is_empty())
                .collect()
        })
        .unwrap_or_default();

    let job_post = props["variable_name"]["properties"]["{{job_post_text}}"]
        .as_str()
        .or_else(|| props["job_post_text"].as_str())
        .unwrap_or("");

    LetterParts {
        opening_hook: letter["opening_hook"].as_str().unwrap_or("").trim().to_string(),
        proof_paragraphs,
        closing: letter["closing"].as_str().unwrap_or("").trim().to_string(),
        role: non_empty_or(
            props["analysis"]["inferred_target_role"]
                .as_str()
                .unwrap_or(""),
            DEFAULT_ROLE,
        ),
        company: detect_company(job_post),
    }
}

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(opening_hook|proof_paragraphs|paragraph|proof_point|closing|inferred_target_role|positioning|deliverable|cover_letter|analysis)\b",
        )
        .expect("valid regex")
    })
}

/// Splits a flattened stream into `(marker, text up to the next marker)`.
fn segments(text: &str) -> Vec<(&str, &str)> {
    let markers: Vec<_> = marker_re().find_iter(text).collect();
    markers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start());
            (m.as_str(), text[m.end()..end].trim())
        })
        .collect()
}

/// Recovers the same parts from a flattened word stream. Each `paragraph`
/// pairs with the next `proof_point` that follows it.
pub fn parts_from_text(text: &str) -> LetterParts {
    let mut parts = LetterParts {
        role: DEFAULT_ROLE.to_string(),
        company: detect_company(text),
        ..LetterParts::default()
    };

    for (marker, value) in segments(text) {
        match marker {
            "opening_hook" if parts.opening_hook.is_empty() => {
                parts.opening_hook = value.to_string();
            }
            "closing" if parts.closing.is_empty() => {
                let value = value.split("```").next().unwrap_or("");
                parts.closing = value.trim().to_string();
            }
            "inferred_target_role" if !value.is_empty() => {
                parts.role = value.to_string();
            }
            "paragraph" if !value.is_empty() => {
                parts.proof_paragraphs.push(ProofParagraph {
                    paragraph: value.to_string(),
                    proof_point: String::new(),
                });
            }
            "proof_point" => {
                if let Some(last) = parts.proof_paragraphs.last_mut() {
                    if last.proof_point.is_empty() {
                        last.proof_point = value.to_string();
                    }
                }
            }
            _ => {}
        }
    }
    parts
}

/// Lays the parts out as a dated business letter signed by `name`. A proof
/// paragraph ends with its proof point when it has one.
pub fn render_letter(parts: &LetterParts, name: &str, today: NaiveDate) -> String {
    let body = parts
        .proof_paragraphs
        .iter()
        .map(|p| match p.proof_point.trim() {
            "" => p.paragraph.trim().to_string(),
            proof => format!("{} {proof}", p.paragraph.trim()),
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{name}\n{date}\n\nDear Hiring Manager,\n\n{opening}\n\n{body}\n\n{closing}\n\nSincerely,\n{name}\n",
        date = today.format("%B %d, %Y"),
        opening = parts.opening_hook,
        closing = parts.closing,
    )
}

pub fn format_structured_letter(
    input: &str,
    name: Option<&str>,
    today: NaiveDate,
) -> Result<FormattedLetter, AppError> {
    if input.trim().is_empty() {
        return Err(AppError::Validation("input is empty".to_string()));
    }

    let (parts, parsed_as) = match parse_loose_json(input) {
        Ok(value) if value.is_object() => (parts_from_json(&value), InputShape::Json),
        _ if input.contains('{') => (parts_from_text(&flatten_json_text(input)), InputShape::Text),
        _ => (parts_from_text(input), InputShape::Text),
    };

    if parts.opening_hook.is_empty()
        && parts.proof_paragraphs.is_empty()
        && parts.closing.is_empty()
    {
        return Err(AppError::Validation(
            "no cover letter content found (expected opening_hook, proof_paragraphs or closing)"
                .to_string(),
        ));
    }

    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_SIGNATURE);

    Ok(FormattedLetter {
        success: true,
        letter: render_letter(&parts, name, today),
        paragraph_count: parts.proof_paragraphs.len(),
        role: parts.role,
        company: parts.company,
        parsed_as,
    })
}
