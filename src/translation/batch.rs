/*!
 * Batch translation processing.
 *
 * This module drives the translation service over a batch, strictly in
 * input order and one unit at a time. Unit failures are recorded and the
 * batch carries on; only file errors while persisting logs abort a run.
 */

use anyhow::Result;
use chrono::{DateTime, Local};
use log::{debug, warn};
use std::path::PathBuf;

use crate::errors::ProviderError;
use crate::run_log::{LogWriter, RunLog};

use super::core::{TranslationOutcome, TranslationService};
use super::unit::{Batch, OutputDocument, TranslationUnit, UnitStatus};

/// A unit that could not be translated
#[derive(Debug, Clone, PartialEq)]
pub struct FailedUnit {
    pub key: String,
    pub original_text: String,
    pub error_message: String,
    pub cause: ProviderError,
}

/// In-memory result of a batch
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Translated document, failed keys absent
    pub output: OutputDocument,
    /// Every unit in its terminal state, in input order
    pub units: Vec<TranslationUnit>,
    /// Failed units, in input order
    pub failures: Vec<FailedUnit>,
    /// Success and failure records
    pub run_log: RunLog,
}

impl BatchOutcome {
    /// Number of units with the given status
    pub fn count(&self, status: UnitStatus) -> usize {
        self.units.iter().filter(|unit| unit.status() == status).count()
    }
}

/// Result of a full run, logs persisted
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output: OutputDocument,
    pub failures: Vec<FailedUnit>,
    pub success_log_path: PathBuf,
    /// `None` when no unit failed
    pub error_log_path: Option<PathBuf>,
    pub translated: usize,
    pub skipped: usize,
}

/// Batch translator for processing translation units in order
#[derive(Debug)]
pub struct BatchTranslator {
    /// The translation service to use
    service: TranslationService,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(service: TranslationService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Translate every unit of the batch.
    ///
    /// `progress_callback` receives `(completed, total)` after each unit.
    pub async fn translate_batch(
        &self,
        batch: Batch,
        progress_callback: impl Fn(usize, usize),
    ) -> BatchOutcome {
        let total = batch.len();
        let mut output = OutputDocument::new();
        let mut failures = Vec::new();
        let mut run_log = RunLog::new();
        let mut units = batch.into_units();

        for (index, unit) in units.iter_mut().enumerate() {
            if !unit.is_text() {
                debug!("Copying non-string value of '{}' as-is", unit.key());
                unit.mark_skipped(Local::now());
            } else {
                match self.service.translate(unit.original_text()).await {
                    Ok(TranslationOutcome::Translated(text)) => {
                        unit.mark_success(text, Local::now());
                        run_log.record_success(unit);
                    }
                    Ok(TranslationOutcome::Skipped(_)) => {
                        unit.mark_skipped(Local::now());
                    }
                    Err(failure) => {
                        warn!("Failed to translate '{}': {}", unit.key(), failure.cause);
                        unit.mark_failed(failure.to_string(), Local::now());
                        run_log.record_failure(unit, &failure);
                        failures.push(FailedUnit {
                            key: unit.key().to_string(),
                            original_text: failure.original_text.clone(),
                            error_message: failure.to_string(),
                            cause: failure.cause,
                        });
                    }
                }
            }

            if let Some(value) = unit.output_value() {
                output.insert(unit.key(), value);
            }

            progress_callback(index + 1, total);
        }

        BatchOutcome {
            output,
            units,
            failures,
            run_log,
        }
    }

    /// Translate the batch, then persist the run logs through `log_writer`
    pub async fn run(
        &self,
        batch: Batch,
        log_writer: &LogWriter,
        run_timestamp: DateTime<Local>,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<RunReport> {
        let outcome = self.translate_batch(batch, progress_callback).await;
        let artifacts = log_writer.persist(&outcome.run_log, run_timestamp)?;

        Ok(RunReport {
            translated: outcome.count(UnitStatus::Success),
            skipped: outcome.count(UnitStatus::Skipped),
            output: outcome.output,
            failures: outcome.failures,
            success_log_path: artifacts.success_path,
            error_log_path: artifacts.error_path,
        })
    }
}
