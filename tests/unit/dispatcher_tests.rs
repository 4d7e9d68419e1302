/*!
 * Tests for the worker pool dispatcher and fail-fast aggregation
 */

use std::sync::Arc;
use std::time::Instant;

use scriptswap::dispatcher::WorkerPool;
use scriptswap::providers::mock::MockTranslator;
use scriptswap::providers::TranslationClient;

fn units(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

/// Duplicate occurrences must collapse to a single job per distinct unit
#[tokio::test]
async fn test_translateAll_withDuplicateUnits_shouldSubmitOneJobPerDistinctUnit() {
    let pool = WorkerPool::new(2);
    let translator = MockTranslator::working();
    let client = Arc::new(translator.clone());

    let map = pool
        .translate_all(&units(&["你好", "世界", "你好", "你好"]), client, "zh", "en")
        .await
        .unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(translator.call_count(), 2);
}

/// The completed map keeps the first-seen order of the document
#[tokio::test]
async fn test_translateAll_withSuccess_shouldReturnCompleteMapInFirstSeenOrder() {
    let pool = WorkerPool::new(2);
    let client = Arc::new(MockTranslator::working());

    let map = pool
        .translate_all(&units(&["丙", "甲", "乙"]), client, "zh", "en")
        .await
        .unwrap();

    let order: Vec<&str> = map.iter().map(|(u, _)| u).collect();
    assert_eq!(order, vec!["丙", "甲", "乙"]);
    assert_eq!(map.get("甲"), Some("[en:甲]"));
}

/// Failure is attributed to the first failing unit in submission order,
/// even when a later unit's job completes first
#[tokio::test]
async fn test_translateAll_withLaterJobFinishingFirst_shouldReportFirstFailingInSubmissionOrder() {
    let pool = WorkerPool::new(3);
    // B fails, and slowly; C completes immediately
    let translator = MockTranslator::failing_on(&["乙"]).with_delay_on("乙", 50);
    let client = Arc::new(translator);

    let error = pool
        .translate_all(&units(&["甲", "乙", "丙"]), client, "zh", "en")
        .await
        .unwrap_err();

    assert_eq!(error.unit(), "乙");
}

/// An immediate failure returns without waiting for abandoned jobs
#[tokio::test]
async fn test_translateAll_withEarlyFailure_shouldNotWaitForAbandonedJobs() {
    let pool = WorkerPool::new(3);
    let translator = MockTranslator::failing_on(&["甲"]).with_delay_on("丙", 500);
    let client = Arc::new(translator);

    let start = Instant::now();
    let error = pool
        .translate_all(&units(&["甲", "乙", "丙"]), client, "zh", "en")
        .await
        .unwrap_err();

    assert_eq!(error.unit(), "甲");
    assert!(
        start.elapsed().as_millis() < 400,
        "aggregation should abort without resolving the delayed job"
    );
}

/// No units means an empty map, not an error
#[tokio::test]
async fn test_translateAll_withNoUnits_shouldReturnEmptyMap() {
    let pool = WorkerPool::new(2);
    let client = Arc::new(MockTranslator::working());

    let map = pool.translate_all(&[], client, "zh", "en").await.unwrap();
    assert!(map.is_empty());
}

/// A failing provider never yields a partial map
#[tokio::test]
async fn test_translateAll_withAllJobsFailing_shouldReturnFirstUnit() {
    let pool = WorkerPool::new(2);
    let client = Arc::new(MockTranslator::failing());

    let error = pool
        .translate_all(&units(&["甲", "乙"]), client, "zh", "en")
        .await
        .unwrap_err();
    assert_eq!(error.unit(), "甲");
}

/// More jobs than pool capacity still all complete
#[tokio::test]
async fn test_translateAll_withMoreJobsThanWorkers_shouldCompleteAll() {
    let pool = WorkerPool::new(2);
    let client = Arc::new(MockTranslator::working());

    let many: Vec<String> = (0..20).map(|i| format!("第{}", i)).collect();
    let map = pool.translate_all(&many, client, "zh", "en").await.unwrap();
    assert_eq!(map.len(), 20);
}

/// One pool can serve several sequential documents
#[tokio::test]
async fn test_workerPool_acrossDocuments_shouldBeReusable() {
    let pool = WorkerPool::new(2);
    let translator = MockTranslator::working();
    let client: Arc<dyn TranslationClient> = Arc::new(translator.clone());

    for _ in 0..3 {
        let map = pool
            .translate_all(&units(&["你好"]), Arc::clone(&client), "zh", "en")
            .await
            .unwrap();
        assert_eq!(map.len(), 1);
    }
    assert_eq!(translator.call_count(), 3);
}
