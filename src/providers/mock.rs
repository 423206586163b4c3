/*!
 * Mock provider implementation for testing.
 *
 * This module provides a scripted provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with translated text
 * - `MockProvider::transient_failures(n)` - Fails transiently n times, then succeeds
 * - `MockProvider::always_transient()` - Every call fails with a transient error
 * - `MockProvider::fatal()` - Every call fails with a non-retryable error
 *
 * Clones share their call counter and request history.
 */

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// The first `count` calls fail with a transient error
    TransientFailures { count: usize },
    /// Every call fails with a transient error
    AlwaysTransient,
    /// Every call fails with a non-retryable error
    Fatal,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Calls made so far, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Texts received, in call order
    requests: Arc<Mutex<Vec<String>>>,
    /// Fixed translations; other texts get a "[target] text" rendering
    dictionary: HashMap<String, String>,
    /// Texts that always fail transiently regardless of behavior
    unavailable: HashSet<String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            dictionary: HashMap::new(),
            unavailable: HashSet::new(),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a provider whose first `count` calls fail transiently
    pub fn transient_failures(count: usize) -> Self {
        Self::new(MockBehavior::TransientFailures { count })
    }

    /// Create a provider that is permanently rate limited
    pub fn always_transient() -> Self {
        Self::new(MockBehavior::AlwaysTransient)
    }

    /// Create a provider that rejects every request
    pub fn fatal() -> Self {
        Self::new(MockBehavior::Fatal)
    }

    /// Register a fixed translation
    pub fn with_translation(mut self, text: impl Into<String>, translated: impl Into<String>) -> Self {
        self.dictionary.insert(text.into(), translated.into());
        self
    }

    /// Make one text fail transiently on every call
    pub fn with_unavailable_text(mut self, text: impl Into<String>) -> Self {
        self.unavailable.insert(text.into());
        self
    }

    /// Number of calls received
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Texts received, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn render(&self, text: &str, target_language: &str) -> String {
        self.dictionary
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", target_language, text))
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(text.to_string());
        }

        if self.unavailable.contains(text) {
            return Err(ProviderError::RateLimitExceeded(format!(
                "Simulated rate limit (request #{})",
                count + 1
            )));
        }

        match self.behavior {
            MockBehavior::Working => Ok(self.render(text, target_language)),

            MockBehavior::TransientFailures { count: failures } => {
                if count < failures {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated outage (request #{})", count + 1),
                    })
                } else {
                    Ok(self.render(text, target_language))
                }
            }

            MockBehavior::AlwaysTransient => Err(ProviderError::RateLimitExceeded(format!(
                "Simulated rate limit (request #{})",
                count + 1
            ))),

            MockBehavior::Fatal => Err(ProviderError::ApiError {
                status_code: 400,
                message: "Simulated rejected request".to_string(),
            }),
        }
    }
}
