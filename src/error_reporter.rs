/*!
 * End-of-run failure summary.
 */

use log::{Level, log};

use crate::translation::batch::FailedUnit;

/// Render the failure summary shown to the operator
pub fn render(failures: &[FailedUnit]) -> String {
    if failures.is_empty() {
        return "All entries were translated without errors.".to_string();
    }

    let mut report = format!("{} entries failed to translate:", failures.len());
    for failure in failures {
        report.push_str(&format!(
            "\n  - {}: {:?}\n    error: {}",
            failure.key, failure.original_text, failure.error_message
        ));
    }
    report
}

/// Level the summary is logged at. Failures use `Error` so the summary
/// still shows with `--log-level error`.
pub fn summary_level(failures: &[FailedUnit]) -> Level {
    if failures.is_empty() {
        Level::Info
    } else {
        Level::Error
    }
}

/// Print the failure summary. Has no effect on the run's output.
pub fn summarize(failures: &[FailedUnit]) {
    log!(summary_level(failures), "{}", render(failures));
}
