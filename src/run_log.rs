/*!
 * Run logs.
 *
 * Every settled unit leaves a record in the in-memory `RunLog`; the
 * `LogWriter` persists the success and failure halves as timestamped JSON
 * artifacts once the batch is done. The failure artifact only exists on
 * disk when at least one unit failed.
 */

use anyhow::Result;
use chrono::{DateTime, Local};
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::errors::TranslationFailure;
use crate::file_utils::{FileManager, RunLocations};
use crate::translation::unit::TranslationUnit;

/// Format of per-record timestamps
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the run timestamp embedded in artifact names
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One translated unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessRecord {
    pub timestamp: String,
    pub key: String,
    pub original_text: String,
    pub translated_text: String,
}

/// One failed unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    pub timestamp: String,
    pub key: String,
    pub original_text: String,
    pub error_message: String,
    /// Provider error behind the failure
    pub cause: String,
    /// Provider calls made for this unit
    pub attempts: u32,
}

/// In-memory records of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunLog {
    successes: Vec<SuccessRecord>,
    failures: Vec<FailureRecord>,
}

fn record_timestamp(unit: &TranslationUnit) -> String {
    unit.timestamp()
        .unwrap_or_else(Local::now)
        .format(RECORD_TIMESTAMP_FORMAT)
        .to_string()
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a unit that settled as `Success`
    pub fn record_success(&mut self, unit: &TranslationUnit) {
        self.successes.push(SuccessRecord {
            timestamp: record_timestamp(unit),
            key: unit.key().to_string(),
            original_text: unit.original_text().to_string(),
            translated_text: unit.translated_text().unwrap_or_default().to_string(),
        });
    }

    /// Record a unit that settled as `Failed`
    pub fn record_failure(&mut self, unit: &TranslationUnit, failure: &TranslationFailure) {
        self.failures.push(FailureRecord {
            timestamp: record_timestamp(unit),
            key: unit.key().to_string(),
            original_text: unit.original_text().to_string(),
            error_message: unit.error_message().unwrap_or_default().to_string(),
            cause: failure.cause.to_string(),
            attempts: failure.attempts,
        });
    }

    pub fn successes(&self) -> &[SuccessRecord] {
        &self.successes
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }
}

/// Paths of the artifacts written for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogArtifacts {
    pub success_path: PathBuf,
    /// `None` when the run had no failures
    pub error_path: Option<PathBuf>,
}

/// Writes run logs under `<log root>/success` and `<log root>/error`
#[derive(Debug, Clone)]
pub struct LogWriter {
    success_dir: PathBuf,
    error_dir: PathBuf,
}

impl LogWriter {
    pub fn new(locations: &RunLocations) -> Self {
        Self {
            success_dir: locations.success_log_dir.clone(),
            error_dir: locations.error_log_dir.clone(),
        }
    }

    /// Success artifact path for a run started at `run_timestamp`
    pub fn success_path(&self, run_timestamp: &DateTime<Local>) -> PathBuf {
        artifact_path(&self.success_dir, "success", run_timestamp)
    }

    /// Failure artifact path for a run started at `run_timestamp`
    pub fn error_path(&self, run_timestamp: &DateTime<Local>) -> PathBuf {
        artifact_path(&self.error_dir, "error", run_timestamp)
    }

    /// Persist both halves of the run log.
    ///
    /// The success artifact is always written. The failure artifact is
    /// written only when there are failures; otherwise any file already at
    /// that path is removed.
    pub fn persist(&self, run_log: &RunLog, run_timestamp: DateTime<Local>) -> Result<LogArtifacts> {
        let success_path = self.success_path(&run_timestamp);
        FileManager::write_json(&success_path, run_log.successes())?;
        debug!(
            "Wrote {} success records to {}",
            run_log.successes().len(),
            success_path.display()
        );

        let error_path = self.error_path(&run_timestamp);
        if run_log.failures().is_empty() {
            if FileManager::remove_if_exists(&error_path)? {
                debug!("Removed empty failure log {}", error_path.display());
            }
            return Ok(LogArtifacts { success_path, error_path: None });
        }

        FileManager::write_json(&error_path, run_log.failures())?;
        debug!(
            "Wrote {} failure records to {}",
            run_log.failures().len(),
            error_path.display()
        );

        Ok(LogArtifacts {
            success_path,
            error_path: Some(error_path),
        })
    }
}

fn artifact_path(dir: &Path, prefix: &str, run_timestamp: &DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "{}_{}.json",
        prefix,
        run_timestamp.format(RUN_TIMESTAMP_FORMAT)
    ))
}
