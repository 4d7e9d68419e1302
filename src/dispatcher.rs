/*!
 * Concurrent dispatch and fail-fast aggregation of translation jobs.
 *
 * The worker pool is the only process-wide resource shared across documents:
 * it bounds total outbound concurrency toward the provider, not per-file
 * concurrency. It is constructed once by the top-level controller and handed
 * by reference into every dispatch call, so its lifecycle is explicit and a
 * test can run with a smaller capacity.
 */

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::errors::{ProviderError, TranslationError};
use crate::providers::TranslationClient;

/// Default bound on in-flight translation jobs across the whole process
pub const DEFAULT_POOL_CAPACITY: usize = 10;

/// Mapping from distinct source unit to its translation.
///
/// Insertion order is the first-seen order of the unit in the document, and
/// keys are unique. A `UnitMap` is only ever published complete: the
/// aggregator either fills it entirely or abandons the document.
#[derive(Debug, Clone, Default)]
pub struct UnitMap {
    entries: Vec<(String, String)>,
}

impl UnitMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit/translation pair.
    ///
    /// Callers are responsible for key uniqueness; the aggregator builds the
    /// map from an already deduplicated unit sequence.
    pub fn insert(&mut self, unit: String, translation: String) {
        self.entries.push((unit, translation));
    }

    /// Look up the translation for a unit
    pub fn get(&self, unit: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(u, _)| u == unit)
            .map(|(_, t)| t.as_str())
    }

    /// Number of distinct units in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no units
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in insertion (first-seen) order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(u, t)| (u.as_str(), t.as_str()))
    }
}

/// Bounded pool of translation workers shared by all documents in a run
pub struct WorkerPool {
    /// Limits the number of concurrently executing jobs
    semaphore: Arc<Semaphore>,
    /// Configured capacity, kept for reporting
    capacity: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

impl WorkerPool {
    /// Create a pool bounding in-flight jobs to `capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Configured capacity of the pool
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Translate every distinct unit of one document.
    ///
    /// Duplicate occurrences collapse to a single job. Jobs run concurrently
    /// under the pool bound, but results are resolved in submission order:
    /// the first failure encountered in that order aborts the document and
    /// is the one reported, regardless of which job finished first. The
    /// remaining handles are abandoned, not cancelled; any result arriving
    /// after the abort is discarded with its task.
    ///
    /// On success the returned map is complete: one entry per distinct unit.
    pub async fn translate_all(
        &self,
        units: &[String],
        client: Arc<dyn TranslationClient>,
        source_language: &str,
        target_language: &str,
    ) -> Result<UnitMap, TranslationError> {
        // Collapse duplicates, keeping first-seen order
        let mut seen = HashSet::new();
        let distinct: Vec<&String> = units.iter().filter(|u| seen.insert(u.as_str())).collect();
        debug!(
            "Submitting {} job(s) for {} extracted unit(s)",
            distinct.len(),
            units.len()
        );

        // One job per distinct unit, in submission order
        let mut jobs: Vec<(String, JoinHandle<Result<String, ProviderError>>)> =
            Vec::with_capacity(distinct.len());
        for unit in distinct {
            let semaphore = Arc::clone(&self.semaphore);
            let client = Arc::clone(&client);
            let unit_text = unit.clone();
            let source = source_language.to_string();
            let target = target_language.to_string();

            let handle = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("worker pool semaphore is never closed");
                client.translate(&unit_text, &source, &target).await
            });
            jobs.push((unit.clone(), handle));
        }

        // Resolve handles in submission order; stop at the first failure.
        // Dropping the remaining handles detaches those tasks, which run to
        // completion and have their results discarded.
        let mut map = UnitMap::new();
        for (unit, handle) in jobs {
            match handle.await {
                Ok(Ok(translated)) => {
                    info!("Translated \"{}\" -> \"{}\"", unit, translated);
                    map.insert(unit, translated);
                }
                Ok(Err(cause)) => {
                    return Err(TranslationError::UnitFailed { unit, cause });
                }
                Err(join_error) => {
                    return Err(TranslationError::UnitFailed {
                        unit,
                        cause: ProviderError::RequestFailed(format!(
                            "translation task aborted: {}",
                            join_error
                        )),
                    });
                }
            }
        }

        Ok(map)
    }
}
