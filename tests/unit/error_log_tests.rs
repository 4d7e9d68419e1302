/*!
 * Tests for the append-only error log
 */

use anyhow::Result;
use scriptswap::error_log::ErrorLog;

use crate::common;

/// Test that a record is written as `timestamp | subject | reason`
#[test]
fn test_append_shouldWritePipeSeparatedRecord() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("error.log");
    let log = ErrorLog::new(&log_path);

    log.append("broken.txt", "translation of \"你好\" failed");

    let lines = common::read_error_log(&log_path);
    assert_eq!(lines.len(), 1);

    let fields: Vec<&str> = lines[0].splitn(3, " | ").collect();
    assert_eq!(fields.len(), 3);
    // Sortable timestamp format: "YYYY-MM-DD HH:MM:SS"
    assert_eq!(fields[0].len(), 19);
    assert_eq!(fields[1], "broken.txt");
    assert_eq!(fields[2], "translation of \"你好\" failed");

    Ok(())
}

/// Test that records accumulate, one line each
#[test]
fn test_append_withMultipleRecords_shouldAppendOneLineEach() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("error.log");
    let log = ErrorLog::new(&log_path);

    log.append("a.txt", "first");
    log.append("b.txt", "second");
    log.append("c.txt", "third");

    let lines = common::read_error_log(&log_path);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("b.txt"));

    Ok(())
}

/// Test that append failures are swallowed rather than escalated
#[test]
fn test_append_withUnwritablePath_shouldNotPanic() {
    let log = ErrorLog::new("/nonexistent-root-dir/error.log");
    log.append("a.txt", "reason");
}

/// Test that the log file is created lazily on first append
#[test]
fn test_new_shouldNotCreateFileUntilFirstAppend() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("error.log");

    let log = ErrorLog::new(&log_path);
    assert!(!log_path.exists());

    log.append("a.txt", "reason");
    assert!(log_path.exists());

    Ok(())
}
