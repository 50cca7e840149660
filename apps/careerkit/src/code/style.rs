//! Readability checks, each scored 0–10.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

const LONG_LINE_COLUMNS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleObservation {
    pub aspect: &'static str,
    pub score: u8,
    pub feedback: &'static str,
}

fn observation(aspect: &'static str, score: u8, feedback: &'static str) -> StyleObservation {
    StyleObservation {
        aspect,
        score,
        feedback,
    }
}

fn function_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\s*(def |async def |function |func |fn |pub fn |async fn |pub async fn |public |private |void )",
        )
        .expect("valid regex")
    })
}

fn single_letter_assign_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-z]\s*=").expect("valid regex"))
}

fn conventional_letter_assign_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[ijknxy]\s*=").expect("valid regex"))
}

fn comment_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(#|//|/\*|\*)").expect("valid regex"))
}

fn error_handling_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\btry\b|\bcatch\b|\bexcept\b|\berror\b|\bresult<").expect("valid regex")
    })
}

fn edge_check_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"if\s*\(?\s*(len|length|size|count|null|none|undefined|not\s+\w+|\w+\.is_empty|\w+\s*==\s*0|\w+\s*<\s*0)",
        )
        .expect("valid regex")
    })
}

/// Lines after each function header up to the next header. Headers with
/// no following lines are skipped.
fn function_lengths(lines: &[&str]) -> Vec<usize> {
    let mut lengths = Vec::new();
    let mut current: Option<usize> = None;

    for line in lines {
        if function_start_re().is_match(line) {
            if let Some(n) = current.filter(|n| *n > 0) {
                lengths.push(n);
            }
            current = Some(0);
        } else if let Some(n) = current.as_mut() {
            *n += 1;
        }
    }
    if let Some(n) = current.filter(|n| *n > 0) {
        lengths.push(n);
    }
    lengths
}

fn check_function_length(lines: &[&str]) -> Option<StyleObservation> {
    let lengths = function_lengths(lines);
    if lengths.is_empty() {
        return None;
    }
    let average = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;

    Some(if average <= 15.0 {
        observation("Function length", 10, "Good - functions are concise")
    } else if average <= 30.0 {
        observation(
            "Function length",
            7,
            "Acceptable - consider breaking down longer functions",
        )
    } else {
        observation(
            "Function length",
            4,
            "Functions are long - break into smaller units",
        )
    })
}

/// Single-letter assignments other than the conventional i, j, k, n, x, y.
fn check_variable_naming(lower: &str) -> StyleObservation {
    let single = single_letter_assign_re().find_iter(lower).count();
    let conventional = conventional_letter_assign_re().find_iter(lower).count();

    if single.saturating_sub(conventional) <= 2 {
        observation("Variable naming", 9, "Good - descriptive variable names")
    } else {
        observation("Variable naming", 5, "Consider more descriptive variable names")
    }
}

fn check_comments(lines: &[&str]) -> StyleObservation {
    let comments = lines.iter().filter(|l| comment_line_re().is_match(l)).count();
    let ratio = comments as f64 / lines.len().max(1) as f64;

    if (0.05..=0.3).contains(&ratio) {
        observation("Comments", 8, "Good balance of comments")
    } else if ratio < 0.05 {
        observation("Comments", 5, "Consider adding comments for complex logic")
    } else {
        observation("Comments", 6, "Many comments - ensure they add value")
    }
}

fn check_line_length(lines: &[&str]) -> StyleObservation {
    let long = lines
        .iter()
        .filter(|l| l.chars().count() > LONG_LINE_COLUMNS)
        .count();
    let ratio = long as f64 / lines.len().max(1) as f64;

    if ratio <= 0.05 {
        observation("Line length", 9, "Good - lines are easy to scan")
    } else if ratio <= 0.15 {
        observation("Line length", 7, "A few long lines - consider wrapping them")
    } else {
        observation(
            "Line length",
            4,
            "Many lines exceed 100 characters - wrap or extract expressions",
        )
    }
}

fn check_error_handling(lower: &str) -> StyleObservation {
    if error_handling_re().is_match(lower) {
        observation("Error handling", 8, "Good - includes error handling")
    } else {
        observation("Error handling", 5, "Consider adding error handling")
    }
}

fn check_edge_cases(lower: &str) -> StyleObservation {
    if edge_check_re().is_match(lower) {
        observation("Edge cases", 9, "Good - handles edge cases")
    } else {
        observation(
            "Edge cases",
            6,
            "Consider checking for edge cases (empty input, null, etc.)",
        )
    }
}

/// Runs every check. Function length is omitted when no function headers
/// are recognized.
pub fn check_style(code: &str) -> Vec<StyleObservation> {
    let lines: Vec<&str> = code.lines().collect();
    let lower = code.to_lowercase();

    let mut observations = Vec::with_capacity(6);
    observations.extend(check_function_length(&lines));
    observations.push(check_variable_naming(&lower));
    observations.push(check_comments(&lines));
    observations.push(check_line_length(&lines));
    observations.push(check_error_handling(&lower));
    observations.push(check_edge_cases(&lower));
    observations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspect<'a>(observations: &'a [StyleObservation], name: &str) -> &'a StyleObservation {
        observations
            .iter()
            .find(|o| o.aspect == name)
            .unwrap_or_else(|| panic!("no {name} observation"))
    }

    #[test]
    fn test_last_function_is_measured() {
        let lines = ["def a():", "    x = 1", "    return x", "def b():", "    pass"];
        assert_eq!(function_lengths(&lines), vec![2, 1]);
    }

    #[test]
    fn test_long_functions_score_low() {
        let mut code = String::from("fn big() {\n");
        for i in 0..40 {
            code.push_str(&format!("    let value_{i} = {i};\n"));
        }
        code.push_str("}\n");
        let obs = check_style(&code);
        assert_eq!(aspect(&obs, "Function length").score, 4);
    }

    #[test]
    fn test_no_functions_skips_length_check() {
        let obs = check_style("total = 1\n");
        assert!(obs.iter().all(|o| o.aspect != "Function length"));
        assert_eq!(obs.len(), 5);
    }

    #[test]
    fn test_single_letter_names() {
        let obs = check_style("a = 1\nb = 2\nc = 3\nd = a + b + c");
        assert_eq!(aspect(&obs, "Variable naming").score, 5);

        let conventional = check_style("i = 0\nj = 1\nk = 2\nn = 3\nx = 4");
        assert_eq!(aspect(&conventional, "Variable naming").score, 9);
    }

    #[test]
    fn test_comment_ratio_bands() {
        let none = check_style("total = 1\ncount = 2");
        assert_eq!(aspect(&none, "Comments").score, 5);

        let balanced = check_style("# add\ntotal = 1\ncount = 2\nsum = 3\nmore = 4");
        assert_eq!(aspect(&balanced, "Comments").score, 8);

        let heavy = check_style("# one\n# two\ntotal = 1");
        assert_eq!(aspect(&heavy, "Comments").score, 6);
    }

    #[test]
    fn test_long_lines_penalized() {
        let long = "x".repeat(120);
        let mut lines = vec!["short"; 8];
        lines.push(&long);
        lines.push(&long);
        let obs = check_style(&lines.join("\n"));
        assert_eq!(aspect(&obs, "Line length").score, 4);
    }

    #[test]
    fn test_error_handling_and_edge_cases() {
        let code = "fn load(items: &[u8]) -> Result<(), Error> {\n    if items.is_empty() {\n        return Ok(());\n    }\n}";
        let obs = check_style(code);
        assert_eq!(aspect(&obs, "Error handling").score, 8);
        assert_eq!(aspect(&obs, "Edge cases").score, 9);

        let bare = check_style("total = a_value + b_value");
        assert_eq!(aspect(&bare, "Error handling").score, 5);
        assert_eq!(aspect(&bare, "Edge cases").score, 6);
    }
}
