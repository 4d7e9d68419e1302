/*!
 * Translation provider implementations.
 *
 * This module contains client implementations for machine translation
 * backends:
 * - Aliyun: Alibaba Cloud machine translation API
 * - Mock: scripted in-process provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation providers.
///
/// One call translates one unit of text between a source/target language
/// pair. Every provider-side failure mode (network, authentication, quota,
/// malformed response) surfaces as a `ProviderError` and is treated
/// uniformly as "unit translation failed" by the dispatcher.
#[async_trait]
pub trait TranslationClient: Send + Sync + Debug {
    /// Translate `text` from `source_language` to `target_language`
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

pub mod aliyun;
pub mod mock;
