/*!
 * Tests for batch orchestration
 */

use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;
use json_translator::file_utils::RunLocations;
use json_translator::providers::mock::MockProvider;
use json_translator::run_log::LogWriter;
use json_translator::translation::{
    Batch, BatchTranslator, RetryPolicy, TranslationService, TranslationUnit, UnitStatus,
};

use crate::common;

fn translator(provider: &MockProvider) -> BatchTranslator {
    let service = TranslationService::new(Box::new(provider.clone()), "en", "ja")
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(1)));
    BatchTranslator::new(service)
}

#[tokio::test]
async fn test_translateBatch_withEveryUnitFailing_shouldStillFinish() {
    let provider = MockProvider::always_transient();
    let batch = Batch::new(vec![
        TranslationUnit::new("one", "First sentence"),
        TranslationUnit::new("two", "Second sentence"),
    ]);

    let outcome = translator(&provider).translate_batch(batch, |_, _| {}).await;

    assert!(outcome.output.is_empty());
    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.count(UnitStatus::Failed), 2);
    // Three attempts per unit, units processed one after the other
    assert_eq!(provider.call_count(), 6);
    assert_eq!(
        provider.requests(),
        vec![
            "First sentence",
            "First sentence",
            "First sentence",
            "Second sentence",
            "Second sentence",
            "Second sentence"
        ]
    );
}

#[tokio::test]
async fn test_translateBatch_withSkippedUnits_shouldPassTextThroughUnlogged() {
    let provider = MockProvider::working();
    let batch = Batch::new(vec![
        TranslationUnit::new("id", "OK"),
        TranslationUnit::new("flag", "--"),
        TranslationUnit::verbatim("enabled", json!(true)),
    ]);

    let outcome = translator(&provider).translate_batch(batch, |_, _| {}).await;

    assert_eq!(outcome.output.get("id"), Some(&json!("OK")));
    assert_eq!(outcome.output.get("flag"), Some(&json!("--")));
    assert_eq!(outcome.output.get("enabled"), Some(&json!(true)));
    assert!(outcome.run_log.successes().is_empty());
    assert!(outcome.failures.is_empty());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_run_shouldPersistLogsAndReportCounts() {
    let dir = common::create_temp_dir().unwrap();
    let locations = RunLocations::new(dir.path().join("output"), dir.path().join("logs"));
    locations.ensure().unwrap();
    let log_writer = LogWriter::new(&locations);

    let provider = MockProvider::working().with_unavailable_text("Cannot translate");
    let batch = Batch::new(vec![
        TranslationUnit::new("title", "Main menu"),
        TranslationUnit::new("id", "A1"),
        TranslationUnit::new("bad", "Cannot translate"),
    ]);
    let progress = Arc::new(Mutex::new(Vec::new()));
    let seen = progress.clone();

    let report = translator(&provider)
        .run(batch, &log_writer, Local::now(), move |done, total| {
            seen.lock().unwrap().push((done, total));
        })
        .await
        .unwrap();

    assert_eq!(report.translated, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.output.keys().collect::<Vec<_>>(), vec!["title", "id"]);
    assert!(report.success_log_path.exists());
    assert!(report.error_log_path.as_ref().is_some_and(|p| p.exists()));
    assert_eq!(*progress.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
}
