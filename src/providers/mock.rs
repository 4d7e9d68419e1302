/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock translators that simulate different behaviors:
 * - `MockTranslator::working()` - always succeeds with bracketed text
 * - `MockTranslator::failing()` - always fails with an API error
 * - `MockTranslator::failing_on(..)` - fails only for specific unit texts
 * - `with_delay_on(..)` - delays specific units, for completion-order tests
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::TranslationClient;

/// Behavior mode for the mock translator
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeeds with a bracketed translation
    Working,
    /// Always fails with an API error
    Failing,
    /// Fails only for the listed unit texts, succeeds otherwise
    FailingOn(Vec<String>),
}

/// Mock translator for exercising dispatcher and pipeline behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate calls made, shared across clones
    call_count: Arc<AtomicUsize>,
    /// Artificial per-unit delays in milliseconds
    delays_ms: HashMap<String, u64>,
    /// Fixed translations overriding the default bracketed output
    canned: HashMap<String, String>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            delays_ms: HashMap::new(),
            canned: HashMap::new(),
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock translator that fails only for the given unit texts
    pub fn failing_on(units: &[&str]) -> Self {
        Self::new(MockBehavior::FailingOn(
            units.iter().map(|u| u.to_string()).collect(),
        ))
    }

    /// Delay translation of `unit` by `delay_ms` milliseconds
    pub fn with_delay_on(mut self, unit: &str, delay_ms: u64) -> Self {
        self.delays_ms.insert(unit.to_string(), delay_ms);
        self
    }

    /// Answer `unit` with a fixed translation instead of the default
    pub fn with_translation(mut self, unit: &str, translation: &str) -> Self {
        self.canned.insert(unit.to_string(), translation.to_string());
        self
    }

    /// Number of translate calls made so far (shared across clones)
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            call_count: Arc::clone(&self.call_count),
            delays_ms: self.delays_ms.clone(),
            canned: self.canned.clone(),
        }
    }
}

#[async_trait]
impl TranslationClient for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay_ms) = self.delays_ms.get(text) {
            tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
        }

        let failed = match &self.behavior {
            MockBehavior::Working => false,
            MockBehavior::Failing => true,
            MockBehavior::FailingOn(units) => units.iter().any(|u| u == text),
        };
        if failed {
            return Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated provider failure for \"{}\"", text),
            });
        }

        if let Some(translation) = self.canned.get(text) {
            return Ok(translation.clone());
        }
        Ok(format!("[{}:{}]", target_language, text))
    }
}
