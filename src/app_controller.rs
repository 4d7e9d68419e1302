use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use walkdir::WalkDir;

use crate::app_config::Config;
use crate::dispatcher::WorkerPool;
use crate::error_log::ErrorLog;
use crate::extractor::Extractor;
use crate::language_utils;
use crate::pipeline::{DocumentPipeline, Outcome};
use crate::providers::aliyun::AliyunTranslate;
use crate::providers::TranslationClient;

// @module: Application controller for folder translation

/// Counts of per-file outcomes for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Files rewritten with translations
    pub translated: usize,
    /// Files with no translatable text, left untouched
    pub skipped: usize,
    /// Files that failed and were left with their original content
    pub failed: usize,
}

/// Main application controller for in-place folder translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Extractor for the configured script alphabet
    extractor: Extractor,
    // @field: Process-wide worker pool, created once, outlives every document
    pool: WorkerPool,
    // @field: Translation provider client
    client: Arc<dyn TranslationClient>,
    // @field: Process-wide error log
    error_log: ErrorLog,
}

impl Controller {
    // @method: Create a controller with the given configuration and client
    pub fn with_client(config: Config, client: Arc<dyn TranslationClient>) -> Result<Self> {
        config.validate()?;

        let extractor = Extractor::with_pattern(&config.script_pattern)?;
        let pool = WorkerPool::new(config.provider.concurrent_requests);
        let error_log = ErrorLog::new(&config.error_log);

        Ok(Self {
            config,
            extractor,
            pool,
            client,
            error_log,
        })
    }

    /// Create a controller backed by the configured Aliyun provider
    pub fn from_config(config: Config) -> Result<Self> {
        let client = AliyunTranslate::new(
            config.provider.endpoint.clone(),
            config.provider.access_key_id.clone(),
            config.provider.access_key_secret.clone(),
            config.provider.timeout_secs,
        )
        .context("Failed to create translation client")?;

        Self::with_client(config, Arc::new(client))
    }

    /// Run the main workflow over every regular file under `root`.
    ///
    /// Traversal is sequential and depth-first; one document's pipeline runs
    /// to completion before the next begins, while translation jobs within a
    /// document share the process-wide pool. A per-file failure never stops
    /// the run.
    pub async fn run(&self, root: &Path) -> Result<RunSummary> {
        if !root.exists() {
            return Err(anyhow!("Input path does not exist: {:?}", root));
        }

        info!(
            "Translating {} -> {} under {:?} ({} worker(s))",
            language_utils::language_display_name(&self.config.source_language),
            language_utils::language_display_name(&self.config.target_language),
            root,
            self.pool.capacity()
        );

        let pipeline = DocumentPipeline::new(
            &self.extractor,
            &self.pool,
            Arc::clone(&self.client),
            &self.error_log,
            &self.config.source_language,
            &self.config.target_language,
        );

        let mut summary = RunSummary::default();
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Unreadable entries are reported and skipped, like any
                    // other per-file failure
                    warn!("Failed to read directory entry: {}", e);
                    summary.failed += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if self.is_error_log(path) {
                continue;
            }

            match pipeline.process(path).await {
                Outcome::Translated => summary.translated += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }

        info!("Complete processing of all documents!");
        info!(
            "{} translated, {} skipped, {} failed",
            summary.translated, summary.skipped, summary.failed
        );

        Ok(summary)
    }

    /// The error log must never be fed back into the pipeline when it lives
    /// inside the translated tree
    fn is_error_log(&self, path: &Path) -> bool {
        match (path.canonicalize(), self.error_log.path().canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => path == self.error_log.path(),
        }
    }
}
