use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::jobs::cache::JobCache;
use crate::jobs::source::{DemoJobSource, FileJobSource, JobSource};
use crate::llm_client::{LlmClient, TextGenerator};

/// Shared state for route handlers and CLI subcommands.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when the model runtime is disabled. Every caller has a
    /// non-LLM fallback.
    pub generator: Option<Arc<dyn TextGenerator>>,
    /// FileJobSource when CAREERKIT_JOBS_FILE is set, else DemoJobSource.
    pub job_source: Arc<dyn JobSource>,
    pub job_cache: Arc<JobCache>,
}

impl AppState {
    /// `force_llm` is the `--llm` flag; it enables the model even when
    /// `LLM_ENABLED` is unset.
    pub fn from_config(config: Config, force_llm: bool) -> Result<Self, AppError> {
        let generator: Option<Arc<dyn TextGenerator>> = if config.llm_enabled || force_llm {
            let client = LlmClient::new(&config.llm_base_url, &config.llm_model)?;
            info!(
                "LLM enabled (model: {}, runtime: {})",
                client.model(),
                config.llm_base_url
            );
            Some(Arc::new(client))
        } else {
            None
        };

        let job_source: Arc<dyn JobSource> = match &config.jobs_file {
            Some(path) => {
                info!("Job postings file: {}", path.display());
                Arc::new(FileJobSource::new(path))
            }
            None => Arc::new(DemoJobSource),
        };

        let job_cache = Arc::new(JobCache::new(config.job_cache_file(), config.job_cache_ttl));

        Ok(Self {
            config,
            generator,
            job_source,
            job_cache,
        })
    }
}
