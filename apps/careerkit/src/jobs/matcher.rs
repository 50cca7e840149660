//! Skill matcher: ranks job postings against a comma-separated skills string.
//!
//! Algorithm, per posting:
//! 1. For each normalized skill:
//!    - substring of the title → +1.5
//!    - substring of title + description + company → +1.0
//!    - any word of that text contains the skill or is contained in it → +0.5
//! 2. ratio = matched / skill count, capped at 1.0
//! 3. role bonus 0.15 when the title names a role and ≥2 of that role's
//!    keywords appear in the skills
//! 4. score = trunc(60 + ratio × 35 + bonus × 100) + jitter(−3..=3), clamped 50–99

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Score returned when the caller supplied no skills at all.
pub const NO_SKILLS_SCORE: u8 = 50;
const BASE_SCORE: f64 = 60.0;
const VARIABLE_SCORE: f64 = 35.0;
const ROLE_BONUS: f64 = 0.15;
const JITTER: i32 = 3;
const MIN_SCORE: i32 = 50;
const MAX_SCORE: i32 = 99;

const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    ("software", &["python", "javascript", "java", "developer", "engineer"]),
    ("frontend", &["react", "vue", "angular", "css", "html", "frontend"]),
    ("backend", &["python", "java", "go", "node", "api", "backend", "server"]),
    ("fullstack", &["react", "node", "python", "javascript", "full stack"]),
    ("data", &["python", "sql", "machine learning", "data", "analytics"]),
    ("devops", &["docker", "kubernetes", "aws", "ci/cd", "devops", "cloud"]),
];

/// A single job posting as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u64>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(default)]
    pub match_score: u8,
}

/// Splits a comma-separated skills string, trimming and dropping empties.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Scores one posting. `jitter` is added after the weighted score and before
/// clamping; callers draw it from `[-3, 3]`.
pub fn match_score(job: &JobPosting, skills: &[String], jitter: i32) -> u8 {
    let normalized: Vec<String> = skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if normalized.is_empty() {
        return NO_SKILLS_SCORE;
    }

    let title = job.title.to_lowercase();
    let job_text = format!(
        "{} {} {}",
        job.title,
        job.description.as_deref().unwrap_or(""),
        job.company
    )
    .to_lowercase();
    let words: Vec<&str> = job_text.split_whitespace().collect();

    let matched: f64 = normalized
        .iter()
        .map(|skill| {
            if title.contains(skill.as_str()) {
                1.5
            } else if job_text.contains(skill.as_str()) {
                1.0
            } else if words
                .iter()
                .any(|w| w.contains(skill.as_str()) || skill.contains(w))
            {
                0.5
            } else {
                0.0
            }
        })
        .sum();

    let ratio = (matched / normalized.len() as f64).min(1.0);
    let bonus = role_bonus(&title, &normalized);

    let weighted = (BASE_SCORE + ratio * VARIABLE_SCORE + bonus * 100.0) as i32;
    (weighted + jitter).clamp(MIN_SCORE, MAX_SCORE) as u8
}

/// First role named in the title whose keyword list overlaps the skills twice.
fn role_bonus(title: &str, normalized_skills: &[String]) -> f64 {
    let joined = normalized_skills.join(" ");
    for (role, keywords) in ROLE_KEYWORDS {
        if title.contains(role) {
            let hits = keywords.iter().filter(|kw| joined.contains(*kw)).count();
            if hits >= 2 {
                return ROLE_BONUS;
            }
        }
    }
    0.0
}

/// Scores every posting with a fresh jitter draw and sorts best first.
/// The sort is stable, so equal scores keep their source order.
pub fn rank_jobs<R: Rng + ?Sized>(jobs: &mut [JobPosting], skills: &[String], rng: &mut R) {
    for job in jobs.iter_mut() {
        let jitter = rng.gen_range(-JITTER..=JITTER);
        job.match_score = match_score(job, skills, jitter);
    }
    jobs.sort_by(|a, b| b.match_score.cmp(&a.match_score));
}
