/*!
 * End-to-end tests for the per-document pipeline
 */

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use scriptswap::dispatcher::WorkerPool;
use scriptswap::error_log::ErrorLog;
use scriptswap::extractor::Extractor;
use scriptswap::pipeline::{DocumentPipeline, Outcome};
use scriptswap::providers::mock::MockTranslator;

use crate::common;

async fn process(
    path: &Path,
    error_log: &ErrorLog,
    translator: MockTranslator,
) -> Outcome {
    let extractor = Extractor::default();
    let pool = WorkerPool::new(2);
    let pipeline = DocumentPipeline::new(
        &extractor,
        &pool,
        Arc::new(translator),
        error_log,
        "zh",
        "en",
    );
    pipeline.process(path).await
}

/// A document with no translatable units is left byte-identical and
/// produces no log entry
#[tokio::test]
async fn test_process_withNoForeignScript_shouldLeaveFileUntouched() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "plain.txt", "plain ascii only\n")?;
    let log_path = temp_dir.path().join("error.log");
    let error_log = ErrorLog::new(&log_path);

    let outcome = process(&file, &error_log, MockTranslator::working()).await;

    assert_eq!(outcome, Outcome::Skipped);
    assert_eq!(fs::read_to_string(&file)?, "plain ascii only\n");
    assert!(common::read_error_log(&log_path).is_empty());

    Ok(())
}

/// Running twice on a no-foreign-content document yields the identical
/// file both times
#[tokio::test]
async fn test_process_twiceOnPlainFile_shouldBeStable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "plain.txt", "stable content")?;
    let error_log = ErrorLog::new(temp_dir.path().join("error.log"));

    process(&file, &error_log, MockTranslator::working()).await;
    let after_first = fs::read_to_string(&file)?;
    process(&file, &error_log, MockTranslator::working()).await;
    let after_second = fs::read_to_string(&file)?;

    assert_eq!(after_first, "stable content");
    assert_eq!(after_first, after_second);

    Ok(())
}

/// A successful run rewrites every occurrence of every unit
#[tokio::test]
async fn test_process_withTranslatableText_shouldRewriteFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(
        temp_dir.path(),
        "source.txt",
        "print(\"你好\")  # 问候\n",
    )?;
    let log_path = temp_dir.path().join("error.log");
    let error_log = ErrorLog::new(&log_path);

    let translator = MockTranslator::working()
        .with_translation("你好", "hello")
        .with_translation("问候", "greeting");
    let outcome = process(&file, &error_log, translator).await;

    assert_eq!(outcome, Outcome::Translated);
    assert_eq!(fs::read_to_string(&file)?, "print(\"hello\")  # greeting\n");
    assert!(common::read_error_log(&log_path).is_empty());

    Ok(())
}

/// A failed unit leaves the file byte-identical and produces exactly one
/// error record referencing the document
#[tokio::test]
async fn test_process_withFailingUnit_shouldRestoreOriginalAndLogOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let original = "好的开始 and then 坏的结束\n";
    let file = common::create_test_file(temp_dir.path(), "doomed.txt", original)?;
    let log_path = temp_dir.path().join("error.log");
    let error_log = ErrorLog::new(&log_path);

    let outcome = process(&file, &error_log, MockTranslator::failing_on(&["坏的结束"])).await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(fs::read_to_string(&file)?, original);

    let records = common::read_error_log(&log_path);
    assert_eq!(records.len(), 1);
    assert!(records[0].contains("doomed.txt"));
    assert!(records[0].contains("坏的结束"));

    Ok(())
}

/// The same unit appearing three times is translated once and replaced
/// everywhere
#[tokio::test]
async fn test_process_withRepeatedUnit_shouldTranslateOnceReplaceAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(
        temp_dir.path(),
        "dup.txt",
        "你好 a 你好 b 你好",
    )?;
    let error_log = ErrorLog::new(temp_dir.path().join("error.log"));

    let translator = MockTranslator::working().with_translation("你好", "hello");
    let outcome = process(&file, &error_log, translator.clone()).await;

    assert_eq!(outcome, Outcome::Translated);
    assert_eq!(fs::read_to_string(&file)?, "hello a hello b hello");
    assert_eq!(translator.call_count(), 1);

    Ok(())
}

/// Substring-overlapping units are substituted longest first
#[tokio::test]
async fn test_process_withOverlappingUnits_shouldApplyLongestMatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "city.txt", "欢迎来到北京市, 北京欢迎你")?;
    let error_log = ErrorLog::new(temp_dir.path().join("error.log"));

    let translator = MockTranslator::working()
        .with_translation("欢迎来到北京市", "Welcome to Beijing City")
        .with_translation("北京欢迎你", "Beijing welcomes you");
    let outcome = process(&file, &error_log, translator).await;

    assert_eq!(outcome, Outcome::Translated);
    let content = fs::read_to_string(&file)?;
    assert_eq!(content, "Welcome to Beijing City, Beijing welcomes you");

    Ok(())
}

/// An unreadable file is logged and does not panic
#[tokio::test]
async fn test_process_withMissingFile_shouldFailAndLog() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("error.log");
    let error_log = ErrorLog::new(&log_path);

    let missing = temp_dir.path().join("missing.txt");
    let outcome = process(&missing, &error_log, MockTranslator::working()).await;

    assert_eq!(outcome, Outcome::Failed);
    let records = common::read_error_log(&log_path);
    assert_eq!(records.len(), 1);
    assert!(records[0].contains("missing.txt"));

    Ok(())
}
