/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which translates one
 * unit's text through a provider. It applies the skip policy for trivial
 * strings, cleans extraction artifacts, and wraps the provider call in the
 * retry policy.
 */

use anyhow::Result;
use log::debug;

use crate::app_config::Config;
use crate::errors::{ProviderError, TranslationFailure};
use crate::language_utils;
use crate::providers::Provider;

use super::retry::{RetryPolicy, with_retry_if};

/// Default maximum trimmed length of a text that is passed through
pub const DEFAULT_SKIP_MAX_CHARS: usize = 3;

/// Successful result of translating one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The provider returned a translation
    Translated(String),
    /// The skip policy applied; the text is returned unchanged
    Skipped(String),
}

impl TranslationOutcome {
    /// Final text regardless of how it was obtained
    pub fn text(&self) -> &str {
        match self {
            Self::Translated(text) | Self::Skipped(text) => text,
        }
    }
}

/// Translation engine for one run
#[derive(Debug)]
pub struct TranslationService {
    /// Provider client, constructed once per run
    provider: Box<dyn Provider>,

    /// Provider code of the source language
    source_language: String,

    /// Provider code of the target language
    target_language: String,

    /// Attempts and backoff applied to each text
    retry_policy: RetryPolicy,

    /// Skip threshold on trimmed character count
    skip_max_chars: usize,
}

impl TranslationService {
    /// Create a service with the default retry and skip policies
    pub fn new(
        provider: Box<dyn Provider>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            source_language: source_language.into(),
            target_language: target_language.into(),
            retry_policy: RetryPolicy::default(),
            skip_max_chars: DEFAULT_SKIP_MAX_CHARS,
        }
    }

    /// Create a service from the application config
    pub fn from_config(config: &Config, provider: Box<dyn Provider>) -> Result<Self> {
        let source_language = language_utils::provider_language_code(&config.source_language)?;
        let target_language = language_utils::provider_language_code(&config.target_language)?;

        Ok(Self::new(provider, source_language, target_language)
            .with_retry_policy(config.translation.retry_policy())
            .with_skip_max_chars(config.translation.skip_max_chars))
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Replace the skip threshold
    pub fn with_skip_max_chars(mut self, skip_max_chars: usize) -> Self {
        self.skip_max_chars = skip_max_chars;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Skip policy: empty texts and texts whose trimmed length is at most
    /// the threshold (IDs, punctuation, short tokens) are never sent
    pub fn should_skip(&self, text: &str) -> bool {
        text.trim().chars().count() <= self.skip_max_chars
    }

    /// Strip a trailing comma and one surrounding pair of double quotes left
    /// over from sloppy extraction. Well-formed text is returned unchanged.
    pub fn clean_text(text: &str) -> &str {
        let text = text.strip_suffix(',').unwrap_or(text);
        let text = text.strip_prefix('"').unwrap_or(text);
        text.strip_suffix('"').unwrap_or(text)
    }

    /// Translate a text with the configured retry policy
    pub async fn translate(&self, text: &str) -> Result<TranslationOutcome, TranslationFailure> {
        self.translate_with_attempts(text, self.retry_policy.max_attempts).await
    }

    /// Translate a text with at most `max_attempts` provider calls.
    ///
    /// Transient provider errors are retried after the policy's backoff;
    /// any other error stops the attempts for this text at once.
    pub async fn translate_with_attempts(
        &self,
        text: &str,
        max_attempts: u32,
    ) -> Result<TranslationOutcome, TranslationFailure> {
        if self.should_skip(text) {
            debug!("Skipping short text: {:?}", text);
            return Ok(TranslationOutcome::Skipped(text.to_string()));
        }

        let cleaned = Self::clean_text(text);
        if cleaned.trim().is_empty() {
            debug!("Nothing left to translate after cleaning: {:?}", text);
            return Ok(TranslationOutcome::Skipped(text.to_string()));
        }

        let policy = RetryPolicy::new(max_attempts, self.retry_policy.backoff);
        let operation_name = format!("Translating {:?}", preview(cleaned));

        with_retry_if(
            &policy,
            &operation_name,
            || {
                self.provider
                    .translate(cleaned, &self.source_language, &self.target_language)
            },
            ProviderError::is_transient,
        )
        .await
        .map(TranslationOutcome::Translated)
        .map_err(|failure| TranslationFailure {
            original_text: text.to_string(),
            cause: failure.error,
            attempts: failure.attempts,
        })
    }
}

/// First few characters of a text for log lines
fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 40;
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", head)
    }
}
