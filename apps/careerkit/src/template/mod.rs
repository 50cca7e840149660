//! Template fill: substitutes named placeholders into a text template.
//!
//! Syntax:
//! - `{name}`       raw value
//! - `{json:name}`  value escaped for the inside of a JSON string literal
//! - `{sh:name}`    value escaped for the inside of a shell double-quoted string
//! - `{{`           a literal `{`
//!
//! Anything else between braces (embedded JSON, unknown prefixes) is copied
//! through untouched. Rendering is single-pass: substituted values are never
//! re-scanned.

pub mod handlers;

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("No value supplied for placeholder '{0}'")]
    MissingValue(String),

    #[error("Invalid variable assignment '{0}' (expected key=value)")]
    InvalidVariable(String),
}

/// How a substituted value is escaped on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    Raw,
    Json,
    Shell,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder { name: String, escape: Escape },
}

/// A parsed template. Parsing never fails; malformed braces are literal text.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(pos) = rest.find('{') {
            literal.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if let Some(after) = tail.strip_prefix("{{") {
                literal.push('{');
                rest = after;
                continue;
            }

            match parse_placeholder(tail) {
                Some((name, escape, consumed)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder {
                        name: name.to_string(),
                        escape,
                    });
                    rest = &tail[consumed..];
                }
                None => {
                    literal.push('{');
                    rest = &tail[1..];
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Unique placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder { name, .. } = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn render(&self, vars: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { name, escape } => {
                    let value = vars
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingValue(name.clone()))?;
                    match escape {
                        Escape::Raw => out.push_str(value),
                        Escape::Json => out.push_str(&escape_json(value)),
                        Escape::Shell => out.push_str(&escape_shell_double_quoted(value)),
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Parses then renders `text` in one call.
pub fn fill(text: &str, vars: &HashMap<String, String>) -> Result<String, TemplateError> {
    Template::parse(text).render(vars)
}

/// Splits a CLI `key=value` pair. The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), TemplateError> {
    match raw.split_once('=') {
        Some((key, value)) if is_valid_name(key.trim()) => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(TemplateError::InvalidVariable(raw.to_string())),
    }
}

/// Escapes for the inside of a JSON string literal (no surrounding quotes).
pub fn escape_json(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

/// Escapes for the inside of a POSIX shell double-quoted string.
pub fn escape_shell_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Recognizes `{name}`, `{json:name}` or `{sh:name}` at the start of `tail`.
/// Returns the name, escape mode and number of bytes consumed.
fn parse_placeholder(tail: &str) -> Option<(&str, Escape, usize)> {
    let close = tail.find('}')?;
    let inner = &tail[1..close];

    let (escape, name) = if let Some(name) = inner.strip_prefix("json:") {
        (Escape::Json, name)
    } else if let Some(name) = inner.strip_prefix("sh:") {
        (Escape::Shell, name)
    } else {
        (Escape::Raw, inner)
    };

    is_valid_name(name).then_some((name, escape, close + 1))
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}
