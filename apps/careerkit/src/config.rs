use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Duration;

/// Application configuration loaded from environment variables.
/// Every setting has a default so the CLI runs with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub job_cache_ttl: Duration,
    /// Optional JSON file of postings used instead of the built-in demo set.
    pub jobs_file: Option<PathBuf>,
    pub llm_enabled: bool,
    pub llm_base_url: String,
    pub llm_model: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            cache_dir: std::env::var("CAREERKIT_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_cache_dir()),
            job_cache_ttl: cache_ttl(parse_env("JOB_CACHE_TTL_MINUTES", 60)?)?,
            jobs_file: std::env::var("CAREERKIT_JOBS_FILE").ok().map(PathBuf::from),
            llm_enabled: parse_env("LLM_ENABLED", false)?,
            llm_base_url: env_or("LLM_BASE_URL", "http://127.0.0.1:8081"),
            llm_model: env_or("LLM_MODEL", "smollm2-135m"),
            host: env_or("HOST", "127.0.0.1"),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn job_cache_file(&self) -> PathBuf {
        self.cache_dir.join("job_cache.json")
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("careerkit"))
        .unwrap_or_else(|| PathBuf::from(".cache"))
}

/// A TTL must be non-negative and fit in a `chrono::Duration`.
fn cache_ttl(minutes: i64) -> Result<Duration> {
    if minutes < 0 {
        return Err(anyhow!(
            "Environment variable 'JOB_CACHE_TTL_MINUTES' must not be negative (got {minutes})"
        ));
    }
    Duration::try_minutes(minutes).with_context(|| {
        format!("Environment variable 'JOB_CACHE_TTL_MINUTES' is out of range ({minutes})")
    })
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_when_unset() {
        let v: u16 = parse_env("CAREERKIT_TEST_UNSET_PORT_VALUE", 8080).unwrap();
        assert_eq!(v, 8080);
    }

    #[test]
    fn test_cache_ttl_accepts_zero_and_an_hour() {
        assert_eq!(cache_ttl(0).unwrap(), Duration::zero());
        assert_eq!(cache_ttl(60).unwrap(), Duration::minutes(60));
    }

    #[test]
    fn test_cache_ttl_rejects_negative_and_out_of_range() {
        assert!(cache_ttl(-1).is_err());
        let err = cache_ttl(200_000_000_000_000).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(cache_ttl(i64::MAX).is_err());
    }

    #[test]
    fn test_job_cache_file_lives_in_cache_dir() {
        let config = Config {
            cache_dir: PathBuf::from("/tmp/ck"),
            job_cache_ttl: Duration::minutes(60),
            jobs_file: None,
            llm_enabled: false,
            llm_base_url: "http://127.0.0.1:8081".into(),
            llm_model: "m".into(),
            host: "127.0.0.1".into(),
            port: 8080,
            rust_log: "info".into(),
        };
        assert_eq!(config.job_cache_file(), PathBuf::from("/tmp/ck/job_cache.json"));
    }
}
