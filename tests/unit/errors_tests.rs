/*!
 * Tests for error types
 */

use std::path::PathBuf;
use std::time::Duration;

use json_translator::errors::{InputError, ProviderError, TranslationFailure};

#[test]
fn test_providerError_isTransient_shouldSplitRetryableFromFatal() {
    let transient = [
        ProviderError::RateLimitExceeded("slow down".to_string()),
        ProviderError::ConnectionError("reset by peer".to_string()),
        ProviderError::Timeout(Duration::from_secs(30)),
        ProviderError::ApiError { status_code: 408, message: String::new() },
        ProviderError::ApiError { status_code: 429, message: String::new() },
        ProviderError::ApiError { status_code: 500, message: String::new() },
        ProviderError::ApiError { status_code: 503, message: String::new() },
    ];
    let fatal = [
        ProviderError::ApiError { status_code: 400, message: String::new() },
        ProviderError::ApiError { status_code: 403, message: String::new() },
        ProviderError::ParseError("bad payload".to_string()),
        ProviderError::RequestFailed("bad url".to_string()),
    ];

    for error in &transient {
        assert!(error.is_transient(), "{} should be transient", error);
    }
    for error in &fatal {
        assert!(!error.is_transient(), "{} should be fatal", error);
    }
}

#[test]
fn test_translationFailure_display_shouldEmbedOriginalText() {
    let failure = TranslationFailure {
        original_text: "Good morning".to_string(),
        cause: ProviderError::Timeout(Duration::from_secs(30)),
        attempts: 3,
    };

    assert_eq!(failure.to_string(), "translation failed: Good morning");
}

#[test]
fn test_inputError_display_shouldNameThePath() {
    let error = InputError::NotFound(PathBuf::from("missing.json"));
    assert_eq!(error.to_string(), "Input file not found: missing.json");

    let error = InputError::Structure {
        path: PathBuf::from("list.json"),
        reason: "document is an empty array".to_string(),
    };
    assert!(error.to_string().contains("list.json"));
    assert!(error.to_string().contains("empty array"));
}
