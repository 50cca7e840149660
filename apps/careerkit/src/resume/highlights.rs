//! Pulls the few facts a cover letter can use out of resume text.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

const MAX_SKILLS: usize = 10;
const MAX_ACHIEVEMENTS: usize = 5;
const MIN_ACHIEVEMENT_CHARS: usize = 21;
const MAX_ACHIEVEMENT_CHARS: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeHighlights {
    pub skills: Vec<String>,
    pub experience_years: Option<u32>,
    pub achievements: Vec<String>,
}

impl ResumeHighlights {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.experience_years.is_none() && self.achievements.is_empty()
    }

    /// One-line background summary for prompts, e.g.
    /// `Skills: rust, go. Experience: 5 years. Key achievement: ...`
    pub fn context_line(&self) -> String {
        let mut parts = Vec::new();
        if !self.skills.is_empty() {
            let top: Vec<&str> = self.skills.iter().take(5).map(String::as_str).collect();
            parts.push(format!("Skills: {}", top.join(", ")));
        }
        if let Some(years) = self.experience_years.filter(|y| *y > 0) {
            parts.push(format!("Experience: {years} years"));
        }
        if let Some(first) = self.achievements.first() {
            parts.push(format!("Key achievement: {first}"));
        }
        parts.join(". ")
    }
}

fn skill_line_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"skills?:?[ \t]*([^\n]+)",
            r"technologies?:?[ \t]*([^\n]+)",
            r"proficient in:?[ \t]*([^\n]+)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    })
}

fn years_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+)\+?\s*years?\s*(?:of\s*)?(?:experience|exp)").expect("valid regex")
    })
}

fn achievement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\d+%|\$\d+|increased|reduced|improved|led|managed").expect("valid regex")
    })
}

pub fn extract_highlights(text: &str) -> ResumeHighlights {
    let lower = text.to_lowercase();

    let mut skills: Vec<String> = Vec::new();
    for re in skill_line_res() {
        for caps in re.captures_iter(&lower) {
            for skill in caps[1].split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !skills.iter().any(|s| s == skill) {
                    skills.push(skill.to_string());
                }
            }
        }
    }
    skills.truncate(MAX_SKILLS);

    let experience_years = years_re()
        .captures(&lower)
        .and_then(|caps| caps[1].parse().ok());

    let achievements = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_ACHIEVEMENT_CHARS)
        .filter(|line| achievement_re().is_match(&line.to_lowercase()))
        .map(|line| line.chars().take(MAX_ACHIEVEMENT_CHARS).collect())
        .take(MAX_ACHIEVEMENTS)
        .collect();

    ResumeHighlights {
        skills,
        experience_years,
        achievements,
    }
}
