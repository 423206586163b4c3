/*!
 * Error types for the json-translator application.
 *
 * This module contains custom error types for the different stages of a run,
 * using the thiserror crate for ergonomic error definitions:
 * - `InputError`: the source document cannot be used (fatal to the run)
 * - `ProviderError`: one call to the translation provider failed
 * - `TranslationFailure`: one unit could not be translated (contained)
 */

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails before a response arrives
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}

impl ProviderError {
    /// Whether the provider reported a temporary condition worth retrying.
    ///
    /// Rate limiting, timeouts (including HTTP 408), dropped connections
    /// and 5xx responses are transient. Everything else (4xx, unparseable payloads, request
    /// construction failures) aborts retries for the unit immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimitExceeded(_) | Self::ConnectionError(_) | Self::Timeout(_) => true,
            Self::ApiError { status_code, .. } => {
                matches!(*status_code, 408 | 429) || *status_code >= 500
            }
            Self::RequestFailed(_) | Self::ParseError(_) => false,
        }
    }
}

/// Errors raised while loading the source document.
///
/// All of these abort the run before any translation is attempted.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input path does not exist
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input exists but could not be read
    #[error("Failed to read input file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not syntactically valid JSON
    #[error("Input file {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is valid but not a non-empty object (or array)
    #[error("Input file {} has an unsupported structure: {reason}", .path.display())]
    Structure { path: PathBuf, reason: String },
}

/// A single unit that could not be translated.
///
/// Carries the untouched original text and the provider error that ended
/// the attempt sequence. The display form is `translation failed: <text>`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("translation failed: {original_text}")]
pub struct TranslationFailure {
    /// Text as it appeared in the input document
    pub original_text: String,
    /// Last provider error observed
    pub cause: ProviderError,
    /// Number of provider calls made before giving up
    pub attempts: u32,
}
