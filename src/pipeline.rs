/*!
 * Per-document translation pipeline.
 *
 * One invocation owns one document from read to write-back. The document is
 * either fully translated and rewritten, or left byte-identical to its
 * original: any failure after the original content has been captured
 * triggers a best-effort restore, and the failure is recorded in the error
 * log without aborting the overall run.
 */

use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::dispatcher::WorkerPool;
use crate::error_log::ErrorLog;
use crate::extractor::Extractor;
use crate::file_utils::FileManager;
use crate::merger::Merger;
use crate::providers::TranslationClient;

/// Outcome of processing one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The file was rewritten with translations substituted
    Translated,
    /// The file contained no translatable text and was left untouched
    Skipped,
    /// Processing failed; the file holds its original content
    Failed,
}

/// Translates one document at a time against a shared worker pool
pub struct DocumentPipeline<'a> {
    /// Extractor configured for the deployment's script alphabet
    extractor: &'a Extractor,
    /// Process-wide worker pool shared across all documents
    pool: &'a WorkerPool,
    /// Translation provider client
    client: Arc<dyn TranslationClient>,
    /// Process-wide error log
    error_log: &'a ErrorLog,
    /// Source language code
    source_language: &'a str,
    /// Target language code
    target_language: &'a str,
}

impl<'a> DocumentPipeline<'a> {
    /// Create a pipeline over the shared pool, client and error log
    pub fn new(
        extractor: &'a Extractor,
        pool: &'a WorkerPool,
        client: Arc<dyn TranslationClient>,
        error_log: &'a ErrorLog,
        source_language: &'a str,
        target_language: &'a str,
    ) -> Self {
        Self {
            extractor,
            pool,
            client,
            error_log,
            source_language,
            target_language,
        }
    }

    /// Process one file: read, extract, translate, merge, write back.
    ///
    /// Failures are contained here: they are logged to the error log and
    /// reported through the returned outcome, never propagated, so a bad
    /// file cannot stop the traversal.
    pub async fn process(&self, path: &Path) -> Outcome {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        // Read. Without the original content there is nothing to roll back.
        let original = match FileManager::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                self.error_log
                    .append(&file_name, &format!("Read failed: {}", e));
                return Outcome::Failed;
            }
        };

        info!("Processing file: {}", path.display());

        // Extract. An empty unit sequence is a successful no-op, not an error.
        let units = self.extractor.extract(&original);
        if units.is_empty() {
            info!("No translatable text found, skipping file");
            return Outcome::Skipped;
        }
        debug!("Identified {} unit(s):", units.len());
        for unit in &units {
            debug!(" - {}", unit);
        }

        // Translate. All-or-nothing: a single failed unit abandons the file.
        let map = match self
            .pool
            .translate_all(
                &units,
                Arc::clone(&self.client),
                self.source_language,
                self.target_language,
            )
            .await
        {
            Ok(map) => map,
            Err(e) => {
                warn!("Translation aborted for {}: {}", path.display(), e);
                self.error_log.append(&file_name, &e.to_string());
                // The file was never mutated; restoring is a tolerated no-op
                self.restore(path, &original);
                return Outcome::Failed;
            }
        };

        // Merge and write back.
        let merged = Merger::merge(&original, &map);
        if let Err(e) = FileManager::write_to_file(path, &merged) {
            warn!("Failed to write {}: {}", path.display(), e);
            self.error_log
                .append(&file_name, &format!("Write failed: {}", e));
            self.restore(path, &original);
            return Outcome::Failed;
        }

        info!("File processing complete: {}", file_name);
        Outcome::Translated
    }

    /// Best-effort restore of the original content. A failed restore is
    /// swallowed: surfacing a secondary failure here would mask the root
    /// cause already recorded.
    fn restore(&self, path: &Path, original: &str) {
        if let Err(e) = FileManager::write_to_file(path, original) {
            debug!(
                "Failed to restore original content of {}: {}",
                path.display(),
                e
            );
        }
    }
}
