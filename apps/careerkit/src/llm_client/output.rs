//! Cleanup for loosely-structured model output.
//!
//! Small models wrap JSON in code fences, prepend reasoning blocks, echo the
//! instructions back, or emit trailing chatter. These helpers recover the
//! usable part.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::llm_client::LlmError;

/// Output shape for `careerkit clean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CleanMode {
    /// Pretty-printed JSON only.
    Json,
    /// Flattened text with JSON punctuation removed.
    Text,
}

fn think_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(think|analysis)>.*?</(think|analysis)>\s*").expect("valid regex")
    })
}

fn instructions_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<instructions>.*?</instructions>\s*").expect("valid regex"))
}

fn json_punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[\[\]{},":]"#).expect("valid regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Removes `<think>…</think>` and `<analysis>…</analysis>` blocks.
pub fn strip_think_blocks(text: &str) -> String {
    think_re().replace_all(text, "").trim().to_string()
}

/// Removes echoed `<instructions>…</instructions>` blocks.
pub fn strip_instruction_blocks(text: &str) -> String {
    instructions_re().replace_all(text, "").into_owned()
}

/// Strips markdown code fences. An explicit ```json fence anywhere in the
/// text wins; otherwise a fence wrapping the whole text is removed.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if !text.contains("```") {
        return text;
    }

    if let Some(start) = text.find("```json") {
        if let Some(newline) = text[start..].find('\n') {
            let body_start = start + newline + 1;
            if let Some(end) = text[body_start..].find("```") {
                return text[body_start..body_start + end].trim();
            }
        }
    }

    let mut inner = text;
    if inner.starts_with("```") {
        inner = match inner.find('\n') {
            Some(newline) => &inner[newline + 1..],
            None => inner.trim_start_matches('`'),
        };
    }
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Slices from the first `{` to the last `}`. Returns the input unchanged
/// when no such span exists.
pub fn slice_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

/// Best-effort JSON recovery from raw model output.
pub fn parse_loose_json(raw: &str) -> Result<Value, serde_json::Error> {
    let without_think = strip_think_blocks(raw);
    let without_instructions = strip_instruction_blocks(&without_think);
    let candidate = slice_json_object(strip_json_fences(&without_instructions));
    serde_json::from_str(candidate)
}

/// Replaces JSON punctuation with spaces and collapses whitespace, leaving a
/// flat word stream for regex-based extractors.
pub fn flatten_json_text(raw: &str) -> String {
    let unfenced = strip_json_fences(raw);
    let spaced = json_punctuation_re().replace_all(unfenced, " ");
    whitespace_re().replace_all(&spaced, " ").trim().to_string()
}

/// Runs the cleanup selected by `mode`. Output ends with a newline.
pub fn clean(mode: CleanMode, raw: &str) -> Result<String, LlmError> {
    match mode {
        CleanMode::Json => {
            let value = parse_loose_json(raw)?;
            Ok(format!("{}\n", serde_json::to_string_pretty(&value)?))
        }
        CleanMode::Text => Ok(format!("{}\n", flatten_json_text(raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_prefers_json_block_after_chatter() {
        let input = "Sure! Here it is:\n```json\n{\"a\": 1}\n```\nHope that helps.";
        assert_eq!(strip_json_fences(input), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_think_blocks() {
        let input = "<think>hmm, let me see</think>\nThe answer.<analysis>x</analysis>";
        assert_eq!(strip_think_blocks(input), "The answer.");
    }

    #[test]
    fn test_slice_json_object() {
        assert_eq!(slice_json_object("noise {\"a\": {\"b\": 2}} tail"), "{\"a\": {\"b\": 2}}");
        assert_eq!(slice_json_object("no braces"), "no braces");
        assert_eq!(slice_json_object("} reversed {"), "} reversed {");
    }

    #[test]
    fn test_parse_loose_json_through_all_wrappers() {
        let raw = "<instructions>return json</instructions>\n<think>ok</think>\n\
                   Result:\n```json\n{\"score\": 7}\n```";
        let value = parse_loose_json(raw).unwrap();
        assert_eq!(value["score"], 7);
    }

    #[test]
    fn test_flatten_json_text() {
        let raw = "```json\n{\"opening_hook\": \"Hello, world\", \"closing\": [\"Bye\"]}\n```";
        assert_eq!(flatten_json_text(raw), "opening_hook Hello world closing Bye");
    }

    #[test]
    fn test_clean_json_mode_errors_on_garbage() {
        assert!(clean(CleanMode::Json, "not json at all").is_err());
    }

    #[test]
    fn test_clean_text_mode_ends_with_newline() {
        assert_eq!(clean(CleanMode::Text, "{\"a\": 1}").unwrap(), "a 1\n");
    }
}
