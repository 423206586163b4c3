/*!
 * Provider implementations for different translation services.
 *
 * This module contains the clients the translation engine can talk to:
 * - Google: the public Google Translate web endpoint
 * - Mock: scripted provider for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// A provider is an opaque `text -> text` function for a language pair.
/// Errors are classified by `ProviderError::is_transient`.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Translate one text
    ///
    /// # Arguments
    /// * `text` - Already cleaned text to translate
    /// * `source_language` - Provider language code of the input
    /// * `target_language` - Provider language code of the output
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

pub mod google;
pub mod mock;
