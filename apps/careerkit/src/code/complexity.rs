//! Big-O guesses from loop keywords, indentation and a few telltale words.
//!
//! Nothing is parsed. Loop nesting is the larger of two counts: loop headers
//! enclosing each other by indentation, and loop headers matched against
//! closing `}` / `end` / `done` lines. The second count only applies to files
//! that have such closing lines, since without them it never goes down.

use std::sync::OnceLock;

use regex::Regex;

const LOOP_KEYWORDS: &[&str] = &["for", "while", "foreach", "loop"];
const BLOCK_CLOSERS: &[&str] = &["}", "end", "done"];
const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    pub notation: &'static str,
    pub explanation: &'static str,
}

const fn estimate(notation: &'static str, explanation: &'static str) -> Estimate {
    Estimate {
        notation,
        explanation,
    }
}

fn loop_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bfor\b|\bwhile\b|\bloop\b").expect("valid regex"))
}

fn array_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[\s*\]|\blist\(|\barray\(|new\s+\w+\[|\bvec!|\bvec::(new|with_capacity)")
            .expect("valid regex")
    })
}

fn map_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\s*\}|\bdict\(|\bhashmap|\bhashset|new\s+map").expect("valid regex")
    })
}

fn function_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:def|function|func|fn)\s+(\w+)").expect("valid regex"))
}

/// True when a trimmed, lower-cased line opens with a loop keyword as a
/// whole word (`for x`, `while(`, but not `format(`).
fn starts_loop(line: &str) -> bool {
    LOOP_KEYWORDS.iter().any(|kw| {
        line.strip_prefix(kw)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
    })
}

fn indent_columns(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

/// Loop headers seen minus closing lines, maximum reached.
pub fn loop_nesting_depth(code: &str) -> usize {
    let mut depth: usize = 0;
    let mut max_depth = 0;

    for line in code.lines() {
        let stripped = line.trim().to_lowercase();
        if starts_loop(&stripped) {
            depth += 1;
            max_depth = max_depth.max(depth);
        }
        if BLOCK_CLOSERS.contains(&stripped.as_str()) {
            depth = depth.saturating_sub(1);
        }
    }
    max_depth
}

/// Deepest indentation level. The unit is the smallest non-zero indentation
/// in the file; tabs count as four columns.
pub fn indentation_depth(code: &str) -> usize {
    let columns: Vec<usize> = code
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(indent_columns)
        .collect();

    match columns.iter().copied().filter(|c| *c > 0).min() {
        Some(unit) => columns.iter().copied().max().unwrap_or(0) / unit,
        None => 0,
    }
}

/// How many loop headers enclose the deepest loop, judged by indentation.
pub fn indented_loop_depth(code: &str) -> usize {
    let mut open: Vec<usize> = Vec::new();
    let mut max_depth = 0;

    for line in code.lines().filter(|l| !l.trim().is_empty()) {
        let columns = indent_columns(line);
        while open.last().is_some_and(|c| *c >= columns) {
            open.pop();
        }
        if starts_loop(&line.trim().to_lowercase()) {
            open.push(columns);
            max_depth = max_depth.max(open.len());
        }
    }
    max_depth
}

fn has_block_closers(code: &str) -> bool {
    code.lines()
        .any(|line| BLOCK_CLOSERS.contains(&line.trim().to_lowercase().as_str()))
}

pub fn nesting_depth(code: &str) -> usize {
    let indented = indented_loop_depth(code);
    if has_block_closers(code) {
        indented.max(loop_nesting_depth(code))
    } else {
        indented
    }
}

/// A function whose name is called again after its own header.
pub fn has_recursion(code: &str) -> bool {
    let lower = code.to_lowercase();
    function_name_re().captures_iter(&lower).any(|caps| {
        let Some(name) = caps.get(1) else {
            return false;
        };
        lower[name.end()..].contains(&format!("{}(", name.as_str()))
    })
}

pub fn estimate_time_complexity(code: &str) -> Estimate {
    let lower = code.to_lowercase();
    let depth = nesting_depth(code);

    if depth >= 3 {
        estimate("O(n³)", "Triple nested loops detected")
    } else if depth == 2 {
        estimate("O(n²)", "Nested loops detected")
    } else if lower.contains("sort") {
        estimate("O(n log n)", "Sorting operation detected")
    } else if lower.contains("binary") || lower.contains("mid") {
        estimate("O(log n)", "Binary search / divide & conquer pattern")
    } else if loop_word_re().is_match(&lower) {
        estimate("O(n)", "Linear iteration detected")
    } else {
        estimate("O(1)", "Constant time operations")
    }
}

pub fn estimate_space_complexity(code: &str) -> Estimate {
    let lower = code.to_lowercase();
    let creates_array = array_re().is_match(&lower);
    let creates_map = map_re().is_match(&lower);

    if creates_array && creates_map {
        estimate("O(n)", "Creates arrays and hash maps")
    } else if creates_array || creates_map {
        estimate("O(n)", "Creates data structures proportional to input")
    } else if has_recursion(code) {
        estimate("O(n)", "Recursive call stack")
    } else {
        estimate("O(1)", "Constant extra space")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PY_NESTED: &str = "def pairs(xs):\n    for a in xs:\n        for b in xs:\n            print(a, b)\n";
    const PY_SEQUENTIAL: &str =
        "def show(xs):\n    for a in xs:\n        print(a)\n    for b in xs:\n        print(b)\n";
    const C_TRIPLE: &str = "for (int i = 0; i < n; i++) {\n  for (int j = 0; j < n; j++) {\n    for (int k = 0; k < n; k++) {\n      sum++;\n    }\n  }\n}\n";

    #[test]
    fn test_starts_loop_needs_whole_word() {
        assert!(starts_loop("for x in xs:"));
        assert!(starts_loop("while(true) {"));
        assert!(starts_loop("foreach ($a as $b)"));
        assert!(!starts_loop("format(x)"));
        assert!(!starts_loop("loops = 3"));
    }

    #[test]
    fn test_indentation_depth_uses_smallest_unit() {
        assert_eq!(indentation_depth("a\n  b\n    c\n      d"), 3);
        assert_eq!(indentation_depth("a\n\tb\n\t\tc"), 2);
        assert_eq!(indentation_depth("flat\ncode"), 0);
    }

    #[test]
    fn test_keyword_depth_counts_closers() {
        let flat = "for x\nfor y\n}\n}\nfor z\n}";
        assert_eq!(loop_nesting_depth(flat), 2);
        // no closers in Python, so sequential loops look nested to the keyword count
        assert_eq!(loop_nesting_depth(PY_SEQUENTIAL), 2);
    }

    #[test]
    fn test_indented_depth_separates_sequential_loops() {
        assert_eq!(indented_loop_depth(PY_SEQUENTIAL), 1);
        assert_eq!(indented_loop_depth(PY_NESTED), 2);
        assert_eq!(indented_loop_depth(C_TRIPLE), 3);
    }

    #[test]
    fn test_nesting_takes_keyword_depth_when_braces_are_unindented() {
        let code = "int main() {\nfor(int i = 0; i < n; i++){\nfor(int j = 0; j < n; j++){\nx++;\n}\n}\n  return 0;\n}";
        assert_eq!(loop_nesting_depth(code), 2);
        assert_eq!(indented_loop_depth(code), 1);
        assert_eq!(nesting_depth(code), 2);
        assert_eq!(estimate_time_complexity(code).notation, "O(n²)");
    }

    #[test]
    fn test_nesting_ignores_keyword_depth_without_closers() {
        assert_eq!(nesting_depth(PY_SEQUENTIAL), 1);
        assert_eq!(nesting_depth(PY_NESTED), 2);
        assert_eq!(nesting_depth(C_TRIPLE), 3);
    }

    #[test]
    fn test_time_complexity_ladder() {
        assert_eq!(estimate_time_complexity(C_TRIPLE).notation, "O(n³)");
        assert_eq!(estimate_time_complexity(PY_NESTED).notation, "O(n²)");
        assert_eq!(estimate_time_complexity(PY_SEQUENTIAL).notation, "O(n)");
        assert_eq!(estimate_time_complexity("xs.sort()\nreturn xs").notation, "O(n log n)");
        assert_eq!(
            estimate_time_complexity("mid = (lo + hi) // 2").notation,
            "O(log n)"
        );
        assert_eq!(estimate_time_complexity("return a + b").notation, "O(1)");
    }

    #[test]
    fn test_recursion_detection() {
        assert!(has_recursion("def fact(n):\n    return n * fact(n - 1)"));
        assert!(!has_recursion("def add(a, b):\n    return a + b"));
        assert!(has_recursion(
            "fn walk(node: &Node) {\n    for c in &node.children { walk(c); }\n}"
        ));
    }

    #[test]
    fn test_space_complexity() {
        assert_eq!(
            estimate_space_complexity("result = []\nseen = {}").explanation,
            "Creates arrays and hash maps"
        );
        assert_eq!(
            estimate_space_complexity("let v = Vec::new();").explanation,
            "Creates data structures proportional to input"
        );
        assert_eq!(
            estimate_space_complexity("def fact(n):\n    return n * fact(n - 1)").explanation,
            "Recursive call stack"
        );
        assert_eq!(estimate_space_complexity("x = 1").notation, "O(1)");
    }
}
