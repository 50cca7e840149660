//! Technical-screen style feedback for a single source file.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::code::complexity::{
    estimate_space_complexity, estimate_time_complexity, indentation_depth, nesting_depth,
};
use crate::code::style::{check_style, StyleObservation};
use crate::errors::AppError;

const LANGUAGES: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("java", "Java"),
    ("cpp", "C++"),
    ("c", "C"),
    ("go", "Go"),
    ("rs", "Rust"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("kt", "Kotlin"),
    ("scala", "Scala"),
    ("cs", "C#"),
    ("sh", "Shell"),
    ("sql", "SQL"),
];

const MAX_STRENGTHS: usize = 4;
const MAX_SUGGESTIONS: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct CodeReport {
    pub success: bool,
    pub file: String,
    pub language: &'static str,
    pub lines_of_code: usize,
    pub indentation_depth: usize,
    pub loop_nesting_depth: usize,
    pub time_complexity: &'static str,
    pub time_explanation: &'static str,
    pub space_complexity: &'static str,
    pub space_explanation: &'static str,
    pub readability_score: String,
    pub style: Vec<StyleObservation>,
    pub strengths: Vec<String>,
    pub suggestions: Vec<String>,
    pub overall: &'static str,
}

pub fn detect_language(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, language)| *language)
        .unwrap_or("Unknown")
}

pub fn analyze_code(file_name: &str, code: &str) -> Result<CodeReport, AppError> {
    if code.trim().is_empty() {
        return Err(AppError::Validation("File is empty".to_string()));
    }

    let time = estimate_time_complexity(code);
    let space = estimate_space_complexity(code);
    let style = check_style(code);

    let average =
        style.iter().map(|o| f64::from(o.score)).sum::<f64>() / style.len().max(1) as f64;

    let mut strengths: Vec<String> = Vec::new();
    let mut suggestions: Vec<String> = Vec::new();
    for obs in &style {
        if obs.score >= 7 {
            strengths.push(obs.feedback.to_string());
        } else if obs.score < 6 {
            suggestions.push(obs.feedback.to_string());
        }
    }

    let quadratic_or_worse = matches!(time.notation, "O(n²)" | "O(n³)");
    if quadratic_or_worse {
        suggestions.push("Consider optimizing nested loops if possible".to_string());
    }
    if time.notation == "O(n²)" && !code.to_lowercase().contains("hash") {
        suggestions.push("A hash map might improve time complexity".to_string());
    }
    strengths.truncate(MAX_STRENGTHS);
    suggestions.truncate(MAX_SUGGESTIONS);

    let overall = if average >= 7.5 && time.notation != "O(n³)" {
        "Strong solution! Would likely pass most technical screens."
    } else if average >= 6.0 {
        "Good solution with room for minor improvements."
    } else {
        "Functional solution - review suggestions for improvement."
    };

    debug!(
        "Analyzed {file_name}: time {} space {} readability {average:.2}",
        time.notation, space.notation
    );

    Ok(CodeReport {
        success: true,
        file: file_name.to_string(),
        language: detect_language(file_name),
        lines_of_code: code.lines().count(),
        indentation_depth: indentation_depth(code),
        loop_nesting_depth: nesting_depth(code),
        time_complexity: time.notation,
        time_explanation: time.explanation,
        space_complexity: space.notation,
        space_explanation: space.explanation,
        readability_score: format!("{}/10", average.round() as u8),
        style,
        strengths,
        suggestions,
        overall,
    })
}

/// Reads `path` as UTF-8 and analyzes it. The report names the file by its
/// final path component.
pub fn analyze_code_file(path: &Path) -> Result<CodeReport, AppError> {
    let code = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
        std::io::ErrorKind::InvalidData => {
            AppError::Extraction(format!("{} is not valid UTF-8", path.display()))
        }
        _ => AppError::Io(e),
    })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    analyze_code(file_name, &code)
}
