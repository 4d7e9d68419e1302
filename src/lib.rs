/*!
 * # scriptswap
 *
 * A Rust library and CLI for in-place batch translation of embedded
 * foreign-script text fragments across a folder tree.
 *
 * ## Features
 *
 * - Extract maximal foreign-script runs (CJK by default, configurable)
 * - Translate each distinct fragment once through a bounded worker pool
 * - All-or-nothing per file: fully rewritten or left byte-identical
 * - Deterministic longest-match substitution of translations
 * - Append-only error log; a bad file never stops the run
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `extractor`: Foreign-script run extraction
 * - `dispatcher`: Worker pool and fail-fast result aggregation
 * - `merger`: Overlap-safe substitution of translations
 * - `pipeline`: Per-document read/translate/merge/write state machine
 * - `app_controller`: Folder traversal and run orchestration
 * - `error_log`: Append-only failure records
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `providers`: Translation backend clients:
 *   - `providers::aliyun`: Aliyun machine translation client
 *   - `providers::mock`: Scripted provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod dispatcher;
pub mod error_log;
pub mod errors;
pub mod extractor;
pub mod file_utils;
pub mod language_utils;
pub mod merger;
pub mod pipeline;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use dispatcher::{UnitMap, WorkerPool, DEFAULT_POOL_CAPACITY};
pub use errors::{AppError, ProviderError, TranslationError};
pub use extractor::Extractor;
pub use merger::Merger;
pub use pipeline::{DocumentPipeline, Outcome};
pub use providers::TranslationClient;
