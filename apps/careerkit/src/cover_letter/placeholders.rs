//! `[Bracketed]` blanks left in a letter, and filling them in.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

fn bracket_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[^\]]+\]").expect("valid regex"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    /// `ph-N`, where N is the position of the first occurrence among all
    /// bracket matches in the letter.
    pub id: String,
    pub original: String,
    pub occurrences: usize,
}

/// Distinct placeholders in order of first appearance.
pub fn find_placeholders(letter: &str) -> Vec<Placeholder> {
    let mut found: Vec<Placeholder> = Vec::new();
    for (i, m) in bracket_re().find_iter(letter).enumerate() {
        match found.iter().position(|p| p.original == m.as_str()) {
            Some(idx) => found[idx].occurrences += 1,
            None => found.push(Placeholder {
                id: format!("ph-{i}"),
                original: m.as_str().to_string(),
                occurrences: 1,
            }),
        }
    }
    found
}

/// Replaces every occurrence of each filled placeholder. `values` may be keyed
/// by the bracketed text (`"[Company]"`) or by the id (`"ph-0"`). Blank values
/// leave the placeholder in place.
pub fn apply_placeholders(letter: &str, values: &HashMap<String, String>) -> String {
    let mut out = letter.to_string();
    for placeholder in find_placeholders(letter) {
        let value = values
            .get(&placeholder.original)
            .or_else(|| values.get(&placeholder.id))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty());
        if let Some(value) = value {
            out = out.replace(&placeholder.original, value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTER: &str = "Dear [Hiring Manager],\n\
        I want to join [Company]. At [Company] I would [verb] daily.";

    #[test]
    fn test_find_placeholders_dedupes_with_first_index() {
        let found = find_placeholders(LETTER);
        let summary: Vec<_> = found
            .iter()
            .map(|p| (p.id.as_str(), p.original.as_str(), p.occurrences))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("ph-0", "[Hiring Manager]", 1),
                ("ph-1", "[Company]", 2),
                ("ph-3", "[verb]", 1),
            ]
        );
    }

    #[test]
    fn test_apply_by_text_and_by_id() {
        let values = HashMap::from([
            ("[Company]".to_string(), "Acme".to_string()),
            ("ph-3".to_string(), "ship".to_string()),
            ("[Hiring Manager]".to_string(), "  ".to_string()),
        ]);
        assert_eq!(
            apply_placeholders(LETTER, &values),
            "Dear [Hiring Manager],\nI want to join Acme. At Acme I would ship daily."
        );
    }

    #[test]
    fn test_no_placeholders() {
        assert!(find_placeholders("Plain letter, no blanks.").is_empty());
        assert_eq!(apply_placeholders("[]", &HashMap::new()), "[]");
    }
}
