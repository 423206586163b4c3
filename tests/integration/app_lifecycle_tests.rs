/*!
 * End-to-end runs through the application controller.
 *
 * Every run uses the mock provider and writes into a temporary directory.
 */

use serde_json::json;

use json_translator::app_controller::Controller;
use json_translator::errors::InputError;
use json_translator::providers::mock::MockProvider;

use crate::common;

#[tokio::test]
async fn test_run_withSimpleDocument_shouldTranslateAndPassThroughShortValues() {
    common::init_test_logging();
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        dir.path(),
        "en_us.json",
        r#"{"greeting": "Hello", "id": "OK"}"#,
    )
    .unwrap();
    let provider = MockProvider::working().with_translation("Hello", "こんにちは");

    let summary = Controller::with_provider(common::test_config(dir.path()), Box::new(provider.clone()))
        .run(&input)
        .await
        .unwrap();

    let output = common::read_json(&summary.output_path).unwrap();
    assert_eq!(output, json!({"greeting": "こんにちは", "id": "OK"}));
    assert!(summary.output_path.ends_with("output/ja_jp.json"));
    assert!(summary.report.failures.is_empty());
    assert_eq!(provider.call_count(), 1);

    let successes = common::read_json(&summary.report.success_log_path).unwrap();
    assert_eq!(successes.as_array().unwrap().len(), 1);
    assert_eq!(successes[0]["key"], "greeting");

    assert!(summary.report.error_log_path.is_none());
    assert!(common::list_files(&dir.path().join("logs").join("error")).is_empty());

    let written = std::fs::read_to_string(&summary.output_path).unwrap();
    assert!(written.contains("こんにちは"), "non-ASCII text must not be escaped");
    assert!(written.contains("\n    \"greeting\""), "expected 4-space indentation");
}

#[tokio::test]
async fn test_run_withTransientProvider_shouldRecoverWithinRetryBudget() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(dir.path(), "en_us.json", r#"{"title": "Welcome back"}"#).unwrap();
    let provider = MockProvider::transient_failures(2);

    let summary = Controller::with_provider(common::test_config(dir.path()), Box::new(provider.clone()))
        .run(&input)
        .await
        .unwrap();

    assert_eq!(provider.call_count(), 3);
    assert!(summary.report.failures.is_empty());
    assert_eq!(summary.report.output.get("title"), Some(&json!("[ja] Welcome back")));
}

#[tokio::test]
async fn test_run_withUnavailableProvider_shouldIsolateFailedUnits() {
    common::init_test_logging();
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        dir.path(),
        "en_us.json",
        r#"{"ok": "Fine sentence", "broken": "Broken sentence", "after": "Later sentence"}"#,
    )
    .unwrap();
    let provider = MockProvider::working().with_unavailable_text("Broken sentence");

    let summary = Controller::with_provider(common::test_config(dir.path()), Box::new(provider.clone()))
        .run(&input)
        .await
        .unwrap();

    // 1 call for each good unit, 3 for the broken one
    assert_eq!(provider.call_count(), 5);

    let output = common::read_json(&summary.output_path).unwrap();
    assert_eq!(
        output,
        json!({"ok": "[ja] Fine sentence", "after": "[ja] Later sentence"})
    );

    assert_eq!(summary.report.failures.len(), 1);
    let failure = &summary.report.failures[0];
    assert_eq!(failure.key, "broken");
    assert!(failure.error_message.contains("Broken sentence"));

    let error_files = common::list_files(&dir.path().join("logs").join("error"));
    assert_eq!(error_files.len(), 1);
    let records = common::read_json(&error_files[0]).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["key"], "broken");
    assert_eq!(records[0]["attempts"], 3);
}

#[tokio::test]
async fn test_run_withReorderedKeys_shouldKeepInputOrder() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        dir.path(),
        "en_us.json",
        r#"{"zulu": "Last entry", "alpha": "First entry", "mike": "Middle entry", "bravo": "ID"}"#,
    )
    .unwrap();

    let summary = Controller::with_provider(common::test_config(dir.path()), Box::new(MockProvider::working()))
        .run(&input)
        .await
        .unwrap();

    let written = std::fs::read_to_string(&summary.output_path).unwrap();
    let positions: Vec<usize> = ["\"zulu\"", "\"alpha\"", "\"mike\"", "\"bravo\""]
        .iter()
        .map(|key| written.find(key).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn test_run_withMissingInput_shouldFailBeforeWritingAnything() {
    let dir = common::create_temp_dir().unwrap();
    let provider = MockProvider::working();

    let error = Controller::with_provider(common::test_config(dir.path()), Box::new(provider.clone()))
        .run(dir.path().join("missing.json"))
        .await
        .unwrap_err();

    assert!(matches!(error.downcast_ref::<InputError>(), Some(InputError::NotFound(_))));
    assert_eq!(provider.call_count(), 0);
    assert!(!dir.path().join("output").exists());
    assert!(!dir.path().join("logs").exists());
}

#[tokio::test]
async fn test_run_withExistingOutput_shouldOverwriteIt() {
    let dir = common::create_temp_dir().unwrap();
    let config = common::test_config(dir.path());
    std::fs::create_dir_all(&config.output.directory).unwrap();
    std::fs::write(config.output.path(), r#"{"stale": "value"}"#).unwrap();
    let input = common::create_test_file(dir.path(), "en_us.json", r#"{"fresh": "New value"}"#).unwrap();

    let summary = Controller::with_provider(config, Box::new(MockProvider::working()))
        .run(&input)
        .await
        .unwrap();

    let output = common::read_json(&summary.output_path).unwrap();
    assert_eq!(output, json!({"fresh": "[ja] New value"}));
}

#[tokio::test]
async fn test_run_withOutputDirectoryBlockedByFile_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let mut config = common::test_config(dir.path());
    config.output.directory = common::create_test_file(dir.path(), "outfile", "not a directory").unwrap();
    let input = common::create_test_file(dir.path(), "en_us.json", r#"{"title": "Main menu"}"#).unwrap();

    let result = Controller::with_provider(config, Box::new(MockProvider::working()))
        .run(&input)
        .await;

    assert!(result.is_err());
    assert!(!dir.path().join("outfile").join("ja_jp.json").exists());
}

#[test]
fn test_formatDuration_shouldPickReadableUnits() {
    use std::time::Duration;

    assert_eq!(Controller::format_duration(Duration::from_millis(1500)), "1.500s");
    assert_eq!(Controller::format_duration(Duration::from_secs(125)), "2m 5s");
    assert_eq!(Controller::format_duration(Duration::from_secs(3725)), "1h 2m 5s");
}
