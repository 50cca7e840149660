//! Heuristic resume scoring.
//!
//! Five component scores (0–100), combined with fixed weights:
//!
//! | component     | weight | full marks at                          |
//! |---------------|--------|----------------------------------------|
//! | keywords      | 0.25   | 12 of the tech keywords                |
//! | action verbs  | 0.20   | 10 of the action verbs                 |
//! | quantifiable  | 0.25   | 5 metric matches                       |
//! | formatting    | 0.15   | 4 section headers, 300–800 words, 5 bullets |
//! | contact       | 0.15   | email, phone, LinkedIn, summary        |
//!
//! All matching is case-insensitive substring or regex matching. Nothing
//! here understands the resume; it only counts.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

pub const TECH_KEYWORDS: &[&str] = &[
    "python", "javascript", "react", "node", "sql", "aws", "docker", "kubernetes",
    "machine learning", "ai", "api", "rest", "graphql", "typescript", "git",
    "agile", "scrum", "ci/cd", "devops", "cloud", "microservices", "database",
    "testing", "security", "linux", "java", "c++", "golang", "rust", "scala",
];

pub const ACTION_VERBS: &[&str] = &[
    "developed", "implemented", "designed", "built", "created", "led", "managed",
    "improved", "optimized", "reduced", "increased", "launched", "deployed",
    "architected", "engineered", "automated", "streamlined", "collaborated",
    "delivered", "achieved", "spearheaded", "mentored", "established", "resolved",
];

const SECTION_HEADERS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "projects",
    "summary",
    "objective",
    "work history",
    "employment",
    "qualifications",
];

const SUMMARY_MARKERS: &[&str] = &["summary", "objective", "profile", "about me"];

const WEIGHT_KEYWORDS: f64 = 0.25;
const WEIGHT_VERBS: f64 = 0.20;
const WEIGHT_QUANTIFIABLE: f64 = 0.25;
const WEIGHT_FORMATTING: f64 = 0.15;
const WEIGHT_CONTACT: f64 = 0.15;

const METRICS_PER_PATTERN: usize = 3;
const MAX_METRICS: usize = 10;
const MIN_PHONE_DIGITS: usize = 7;

#[derive(Debug, Clone, Serialize)]
pub struct ComponentScores {
    pub keywords: u32,
    pub action_verbs: u32,
    pub quantifiable: u32,
    pub formatting: u32,
    pub contact: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeReport {
    pub success: bool,
    pub score: u32,
    pub component_scores: ComponentScores,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendations: Vec<String>,
    pub found_keywords: Vec<String>,
    pub found_verbs: Vec<String>,
}

/// A component score with whatever evidence produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub score: f64,
    pub evidence: Vec<String>,
}

fn metric_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"\d+%",
            r"\$[\d,]+",
            r"\d+x",
            r"\d+\+",
            r"increased.*\d+",
            r"reduced.*\d+",
            r"improved.*\d+",
            r"\d+\s*(users|customers|clients|projects|teams)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    })
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("valid regex"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\d\-()+\s]{10,}").expect("valid regex"))
}

/// `min(found / full_marks, 1) × 100`
fn ratio_score(found: usize, full_marks: usize) -> f64 {
    found.min(full_marks) as f64 * 100.0 / full_marks as f64
}

fn contained_terms(text: &str, terms: &[&str]) -> Vec<String> {
    let lower = text.to_lowercase();
    terms
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| term.to_string())
        .collect()
}

pub fn score_keywords(text: &str) -> Scored {
    let evidence = contained_terms(text, TECH_KEYWORDS);
    Scored {
        score: ratio_score(evidence.len(), 12),
        evidence,
    }
}

pub fn score_action_verbs(text: &str) -> Scored {
    let evidence = contained_terms(text, ACTION_VERBS);
    Scored {
        score: ratio_score(evidence.len(), 10),
        evidence,
    }
}

/// Percentages, dollar amounts, multipliers, `N+`, "increased … N" and
/// friends, and "N users"-style counts. At most three hits per pattern count.
pub fn score_quantifiable(text: &str) -> Scored {
    let lower = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for re in metric_res() {
        found.extend(
            re.find_iter(&lower)
                .take(METRICS_PER_PATTERN)
                .map(|m| m.as_str().to_string()),
        );
    }

    let score = ratio_score(found.len(), 5);
    found.truncate(MAX_METRICS);
    Scored {
        score,
        evidence: found,
    }
}

pub fn score_formatting(text: &str) -> Scored {
    let lower = text.to_lowercase();
    let mut strengths = Vec::new();
    let mut score = 0.0;

    let mut sections = 0;
    for section in SECTION_HEADERS {
        if lower.contains(section) {
            sections += 1;
            strengths.push(format!("Has {section} section"));
        }
    }
    score += (sections.min(4) as f64) * 50.0 / 4.0;

    let words = text.split_whitespace().count();
    if (300..=800).contains(&words) {
        score += 25.0;
        strengths.push("Good length (300-800 words)".to_string());
    } else if (200..=1000).contains(&words) {
        score += 15.0;
        strengths.push("Acceptable length".to_string());
    }

    let bullets = text.matches(['•', '-', '*']).count();
    if bullets >= 5 {
        score += 25.0;
        strengths.push("Good use of bullet points".to_string());
    } else if bullets >= 2 {
        score += 15.0;
        strengths.push("Some bullet points".to_string());
    }

    Scored {
        score,
        evidence: strengths,
    }
}

pub fn score_contact_summary(text: &str) -> Scored {
    let lower = text.to_lowercase();
    let mut strengths = Vec::new();

    if email_re().is_match(text) {
        strengths.push("Has email address");
    }
    let has_phone = phone_re().find_iter(text).any(|m| {
        m.as_str().chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
    });
    if has_phone {
        strengths.push("Has phone number");
    }
    if lower.contains("linkedin") {
        strengths.push("Has LinkedIn profile");
    }
    if SUMMARY_MARKERS.iter().any(|m| lower.contains(m)) {
        strengths.push("Has professional summary");
    }

    Scored {
        score: strengths.len() as f64 * 25.0,
        evidence: strengths.into_iter().map(str::to_string).collect(),
    }
}

pub fn analyze_resume(text: &str) -> ResumeReport {
    let keywords = score_keywords(text);
    let verbs = score_action_verbs(text);
    let quantifiable = score_quantifiable(text);
    let formatting = score_formatting(text);
    let contact = score_contact_summary(text);

    let total = keywords.score * WEIGHT_KEYWORDS
        + verbs.score * WEIGHT_VERBS
        + quantifiable.score * WEIGHT_QUANTIFIABLE
        + formatting.score * WEIGHT_FORMATTING
        + contact.score * WEIGHT_CONTACT;

    let mut strengths = Vec::new();
    if keywords.score >= 60.0 {
        strengths.push(format!(
            "Strong technical keywords ({} found)",
            keywords.evidence.len()
        ));
    }
    if verbs.score >= 60.0 {
        strengths.push(format!(
            "Good use of action verbs ({} found)",
            verbs.evidence.len()
        ));
    }
    if quantifiable.score >= 60.0 {
        strengths.push("Includes quantifiable achievements".to_string());
    }
    strengths.extend(formatting.evidence.iter().cloned());
    strengths.extend(contact.evidence.iter().cloned());

    let mut improvements = Vec::new();
    if keywords.score < 50.0 {
        improvements.push("Add more industry-relevant keywords for ATS systems");
    }
    if verbs.score < 50.0 {
        improvements.push("Use more action verbs (developed, implemented, led, etc.)");
    }
    if quantifiable.score < 50.0 {
        improvements.push("Add quantifiable achievements (percentages, numbers, metrics)");
    }
    if formatting.score < 50.0 {
        improvements.push("Improve structure with clear section headers");
    }
    if contact.score < 50.0 {
        improvements.push("Ensure contact info and professional summary are present");
    }

    let mut recommendations = Vec::new();
    if quantifiable.score < 70.0 {
        recommendations.push(
            "Add 2-3 bullet points with measurable impact (e.g., 'Improved load time by 40%')"
                .to_string(),
        );
    }
    if keywords.score < 70.0 {
        recommendations.push(format!(
            "Consider adding keywords: {}",
            missing_terms(TECH_KEYWORDS, &keywords.evidence).join(", ")
        ));
    }
    if verbs.score < 70.0 {
        recommendations.push(format!(
            "Try using verbs like: {}",
            missing_terms(ACTION_VERBS, &verbs.evidence).join(", ")
        ));
    }

    strengths.truncate(5);
    improvements.truncate(5);
    recommendations.truncate(3);

    ResumeReport {
        success: true,
        score: total.round() as u32,
        component_scores: ComponentScores {
            keywords: keywords.score.round() as u32,
            action_verbs: verbs.score.round() as u32,
            quantifiable: quantifiable.score.round() as u32,
            formatting: formatting.score.round() as u32,
            contact: contact.score.round() as u32,
        },
        strengths,
        improvements: improvements.into_iter().map(str::to_string).collect(),
        recommendations,
        found_keywords: keywords.evidence.into_iter().take(10).collect(),
        found_verbs: verbs.evidence.into_iter().take(10).collect(),
    }
}

/// First five terms from `all` that are not in `found`.
fn missing_terms<'a>(all: &[&'a str], found: &[String]) -> Vec<&'a str> {
    all.iter()
        .copied()
        .filter(|term| !found.iter().any(|f| f == term))
        .take(5)
        .collect()
}
