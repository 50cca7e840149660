//! Where postings come from before scoring.
//!
//! `AppState` holds an `Arc<dyn JobSource>` chosen at startup:
//! `FileJobSource` when `CAREERKIT_JOBS_FILE` is set, otherwise
//! `DemoJobSource`. There is no scraper; a postings file is how real
//! listings get in.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::jobs::matcher::JobPosting;

/// What the caller asked for. Sources may ignore fields they cannot use.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub search_term: String,
    pub location: String,
}

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Demo sources produce sample data and are flagged as such in results.
    fn is_demo(&self) -> bool;

    async fn fetch(&self, query: &JobQuery) -> Result<Vec<JobPosting>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// DemoJobSource
// ────────────────────────────────────────────────────────────────────────────

/// Five fixed sample postings. Used when nothing else is configured and as
/// the fallback when a real source fails.
pub struct DemoJobSource;

#[async_trait]
impl JobSource for DemoJobSource {
    fn is_demo(&self) -> bool {
        true
    }

    async fn fetch(&self, _query: &JobQuery) -> Result<Vec<JobPosting>, AppError> {
        Ok(demo_jobs())
    }
}

pub fn demo_jobs() -> Vec<JobPosting> {
    let posting = |title: &str,
                   company: &str,
                   location: &str,
                   salary: (u64, u64),
                   url: &str,
                   industry: &str| JobPosting {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        salary_min: Some(salary.0),
        salary_max: Some(salary.1),
        url: url.to_string(),
        site: "demo".to_string(),
        industry: Some(industry.to_string()),
        description: None,
        date_posted: None,
        match_score: 0,
    };

    vec![
        posting(
            "Software Engineer II",
            "Stripe",
            "Remote",
            (140_000, 180_000),
            "https://stripe.com/jobs",
            "FinTech",
        ),
        posting(
            "Full Stack Developer",
            "Figma",
            "SF/Remote",
            (130_000, 170_000),
            "https://figma.com/careers",
            "Design Tools",
        ),
        posting(
            "Frontend Engineer",
            "Notion",
            "NYC/Remote",
            (145_000, 185_000),
            "https://notion.so/careers",
            "Productivity",
        ),
        posting(
            "Backend Developer",
            "Cloudflare",
            "Austin/Remote",
            (135_000, 175_000),
            "https://cloudflare.com/careers",
            "Infrastructure",
        ),
        posting(
            "Software Developer",
            "GitHub",
            "Remote",
            (125_000, 165_000),
            "https://github.com/about/careers",
            "Developer Tools",
        ),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// FileJobSource
// ────────────────────────────────────────────────────────────────────────────

/// Postings exported to a JSON file, either a bare array or `{"jobs": [...]}`.
pub struct FileJobSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PostingsFile {
    List(Vec<JobPosting>),
    Wrapped { jobs: Vec<JobPosting> },
}

impl FileJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobSource for FileJobSource {
    fn is_demo(&self) -> bool {
        false
    }

    async fn fetch(&self, query: &JobQuery) -> Result<Vec<JobPosting>, AppError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(self.path.display().to_string())
            } else {
                AppError::Io(e)
            }
        })?;

        let postings = match serde_json::from_str::<PostingsFile>(&raw) {
            Ok(PostingsFile::List(jobs)) | Ok(PostingsFile::Wrapped { jobs }) => jobs,
            Err(e) => {
                return Err(AppError::Validation(format!(
                    "{} is not a valid postings file: {e}",
                    self.path.display()
                )))
            }
        };

        debug!(
            "Loaded {} postings from {} for '{}' in {}",
            postings.len(),
            self.path.display(),
            query.search_term,
            query.location
        );
        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn query() -> JobQuery {
        JobQuery {
            search_term: "rust".to_string(),
            location: "Remote".to_string(),
        }
    }

    #[tokio::test]
    async fn test_demo_source_returns_five_postings() {
        let jobs = DemoJobSource.fetch(&query()).await.unwrap();
        assert_eq!(jobs.len(), 5);
        assert!(jobs.iter().all(|j| j.site == "demo"));
        assert!(DemoJobSource.is_demo());
    }

    #[tokio::test]
    async fn test_file_source_reads_bare_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobs.json");
        std::fs::write(
            &path,
            r#"[{"title": "Rust Engineer", "company": "Acme", "description": "tokio"}]"#,
        )
        .unwrap();

        let jobs = FileJobSource::new(&path).fetch(&query()).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].description.as_deref(), Some("tokio"));
        assert_eq!(jobs[0].location, "");
    }

    #[tokio::test]
    async fn test_file_source_reads_wrapped_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobs.json");
        std::fs::write(
            &path,
            r#"{"jobs": [{"title": "A", "company": "B"}, {"title": "C", "company": "D"}]}"#,
        )
        .unwrap();

        let jobs = FileJobSource::new(&path).fetch(&query()).await.unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_not_found() {
        let err = FileJobSource::new("/definitely/not/here.json")
            .fetch(&query())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_file_source_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobs.json");
        std::fs::write(&path, r#"{"postings": 3}"#).unwrap();

        let err = FileJobSource::new(&path).fetch(&query()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
