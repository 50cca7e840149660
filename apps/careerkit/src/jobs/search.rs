//! Job search pipeline: cache → source → score → top 10 → cache.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::jobs::cache::{cache_key, JobCache};
use crate::jobs::matcher::{parse_skills, rank_jobs, JobPosting};
use crate::jobs::source::{demo_jobs, JobQuery, JobSource};

const MAX_RESULTS: usize = 10;
const DEFAULT_SEARCH_TERM: &str = "software engineer";
const ERROR_SNIPPET_CHARS: usize = 50;

const DEMO_WARNING: &str = "DEMO MODE: These are sample jobs, not real listings!";
const DEMO_HOW_TO_FIX: &str =
    "Set CAREERKIT_JOBS_FILE to a JSON file of postings (an array, or {\"jobs\": [...]})";
const DEMO_NOT_CONFIGURED: &str = "No postings file configured - showing sample data";
const DEMO_NO_RESULTS: &str = "No jobs found - showing sample data";

fn default_location() -> String {
    "Remote".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchRequest {
    pub skills: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_true")]
    pub use_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchResult {
    pub success: bool,
    pub jobs: Vec<JobPosting>,
    pub total_found: usize,
    pub search_term: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub from_cache: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_age_minutes: Option<i64>,
    #[serde(default)]
    pub is_demo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_fix: Option<String>,
}

/// First three skills joined by a space, or a generic term when there are none.
pub fn search_term(skills: &[String]) -> String {
    if skills.is_empty() {
        DEFAULT_SEARCH_TERM.to_string()
    } else {
        skills.iter().take(3).cloned().collect::<Vec<_>>().join(" ")
    }
}

pub async fn search_jobs<R: Rng + Send>(
    request: &JobSearchRequest,
    source: &dyn JobSource,
    cache: &JobCache,
    rng: &mut R,
) -> JobSearchResult {
    let skills = parse_skills(&request.skills);
    let key = cache_key(&request.skills, &request.location);

    if request.use_cache {
        if let Some(hit) = cache.lookup(&key, Utc::now()) {
            info!(
                "Job cache hit for '{key}' ({} minutes old)",
                hit.cache_age_minutes.unwrap_or(0)
            );
            return hit;
        }
    }

    if source.is_demo() {
        return demo_result(&skills, &request.location, DEMO_NOT_CONFIGURED.to_string(), rng);
    }

    let query = JobQuery {
        search_term: search_term(&skills),
        location: request.location.clone(),
    };

    let mut jobs = match source.fetch(&query).await {
        Ok(jobs) if jobs.is_empty() => {
            return demo_result(&skills, &request.location, DEMO_NO_RESULTS.to_string(), rng);
        }
        Ok(jobs) => jobs,
        Err(e) => {
            warn!("Job source failed, falling back to demo data: {e}");
            let snippet: String = e.to_string().chars().take(ERROR_SNIPPET_CHARS).collect();
            let reason = format!("Search error ({snippet}) - showing sample data");
            return demo_result(&skills, &request.location, reason, rng);
        }
    };

    let total_found = jobs.len();
    rank_jobs(&mut jobs, &skills, rng);
    jobs.truncate(MAX_RESULTS);

    let result = JobSearchResult {
        success: true,
        jobs,
        total_found,
        search_term: query.search_term,
        location: request.location.clone(),
        timestamp: Utc::now(),
        from_cache: false,
        cache_age_minutes: None,
        is_demo: false,
        demo_reason: None,
        demo_warning: None,
        how_to_fix: None,
    };

    if let Err(e) = cache.store(&key, &result) {
        warn!("Could not write job cache at {}: {e}", cache.path().display());
    }

    info!(
        "Found {} jobs for '{}', returning top {}",
        total_found,
        result.search_term,
        result.jobs.len()
    );
    result
}

fn demo_result<R: Rng + ?Sized>(
    skills: &[String],
    location: &str,
    reason: String,
    rng: &mut R,
) -> JobSearchResult {
    let mut jobs = demo_jobs();
    rank_jobs(&mut jobs, skills, rng);

    JobSearchResult {
        success: true,
        total_found: jobs.len(),
        jobs,
        search_term: skills.iter().take(3).cloned().collect::<Vec<_>>().join(", "),
        location: location.to_string(),
        timestamp: Utc::now(),
        from_cache: false,
        cache_age_minutes: None,
        is_demo: true,
        demo_reason: Some(reason),
        demo_warning: Some(DEMO_WARNING.to_string()),
        how_to_fix: Some(DEMO_HOW_TO_FIX.to_string()),
    }
}
