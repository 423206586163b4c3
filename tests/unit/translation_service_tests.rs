/*!
 * Tests for the per-text translation service
 */

use std::time::Duration;

use json_translator::app_config::Config;
use json_translator::errors::ProviderError;
use json_translator::providers::mock::MockProvider;
use json_translator::translation::{RetryPolicy, TranslationOutcome, TranslationService};

fn fast_service(provider: &MockProvider, max_attempts: u32) -> TranslationService {
    TranslationService::new(Box::new(provider.clone()), "en", "ja")
        .with_retry_policy(RetryPolicy::new(max_attempts, Duration::from_millis(1)))
}

#[tokio::test]
async fn test_translate_withShortText_shouldSkipWithoutProviderCall() {
    let provider = MockProvider::working();
    let service = fast_service(&provider, 3);

    for text in ["OK", "id", "", "  ", "42"] {
        let outcome = service.translate(text).await.unwrap();
        assert_eq!(outcome, TranslationOutcome::Skipped(text.to_string()));
    }
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_translate_withWorkingProvider_shouldReturnTranslation() {
    let provider = MockProvider::working().with_translation("Hello", "こんにちは");
    let service = fast_service(&provider, 3);

    let outcome = tokio_test::block_on(service.translate("Hello")).unwrap();

    assert_eq!(outcome.text(), "こんにちは");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_translate_withTransientFailures_shouldSucceedOnLastAttempt() {
    let provider = MockProvider::transient_failures(2);
    let service = fast_service(&provider, 3);

    let outcome = service.translate("Open the door").await.unwrap();

    assert_eq!(outcome, TranslationOutcome::Translated("[ja] Open the door".to_string()));
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn test_translate_withPersistentFailures_shouldStopAfterBudget() {
    let provider = MockProvider::always_transient();
    let service = fast_service(&provider, 3);

    let failure = service.translate("Open the door").await.unwrap_err();

    assert_eq!(provider.call_count(), 3);
    assert_eq!(failure.attempts, 3);
    assert_eq!(failure.original_text, "Open the door");
    assert!(matches!(failure.cause, ProviderError::RateLimitExceeded(_)));
    assert!(failure.to_string().contains("Open the door"));
}

#[tokio::test(start_paused = true)]
async fn test_translate_withPersistentFailures_shouldWaitFixedBackoffBetweenAttempts() {
    let provider = MockProvider::always_transient();
    let service = TranslationService::new(Box::new(provider.clone()), "en", "ja")
        .with_retry_policy(RetryPolicy::new(3, Duration::from_secs(2)));

    let start = tokio::time::Instant::now();
    let failure = service.translate("Open the door").await.unwrap_err();

    // Two waits between three attempts, none after the last one
    assert_eq!(start.elapsed(), Duration::from_secs(4));
    assert_eq!(failure.attempts, 3);
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withRecoveryOnSecondAttempt_shouldWaitOnce() {
    let provider = MockProvider::transient_failures(1);
    let service = TranslationService::new(Box::new(provider.clone()), "en", "ja")
        .with_retry_policy(RetryPolicy::new(3, Duration::from_secs(2)));

    let start = tokio::time::Instant::now();
    service.translate("Open the door").await.unwrap();

    assert_eq!(start.elapsed(), Duration::from_secs(2));
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_translateWithAttempts_withZeroBudget_shouldTryOnce() {
    let provider = MockProvider::always_transient();
    let service = fast_service(&provider, 3);

    let failure = service.translate_with_attempts("Open the door", 0).await.unwrap_err();

    assert_eq!(failure.attempts, 1);
    assert_eq!(provider.call_count(), 1);
}

#[test]
fn test_fromConfig_shouldNormalizeLanguagesAndApplyPolicies() {
    let mut config = Config::default();
    config.source_language = "eng".to_string();
    config.target_language = "jpn".to_string();
    config.translation.retry_count = 4;
    config.translation.retry_backoff_ms = 10;
    config.translation.skip_max_chars = 5;

    let service = TranslationService::from_config(&config, Box::new(MockProvider::working())).unwrap();

    assert_eq!(service.source_language(), "en");
    assert_eq!(service.target_language(), "ja");
    assert_eq!(service.retry_policy().max_attempts, 4);
    assert_eq!(service.retry_policy().backoff, Duration::from_millis(10));
    assert!(service.should_skip("Hello"));
    assert!(!service.should_skip("Hello!"));
    assert_eq!(service.provider_name(), "Mock");
}
