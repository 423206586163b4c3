use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Longest API error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for the Google Translate web endpoint (`translate_a/single`)
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
    /// Per-request timeout, reported in timeout errors
    timeout: Duration,
}

impl GoogleTranslate {
    /// Create a new client. Built once per run and reused for every unit.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Map a transport error onto the provider taxonomy
    fn classify_send_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else if error.is_builder() {
            ProviderError::RequestFailed(error.to_string())
        } else {
            ProviderError::ConnectionError(error.to_string())
        }
    }

    /// Extract the translated text from a `translate_a/single` payload.
    ///
    /// The payload is a nested array whose first element lists sentence
    /// segments as `[translated, original, ...]`; the translation is the
    /// concatenation of every segment's first field.
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("missing translation segments".to_string()))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(ProviderError::ParseError("response contained no translated text".to_string()));
        }

        Ok(translated)
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    fn name(&self) -> &str {
        "Google Translate"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded(truncate(&body)));
        }

        if !status.is_success() {
            debug!("Google Translate error ({}): {}", status, body);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: truncate(&body),
            });
        }

        Self::parse_response(&body)
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
