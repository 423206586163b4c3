use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::error_reporter;
use crate::file_utils::RunLocations;
use crate::input_loader;
use crate::language_utils;
use crate::output_writer::OutputWriter;
use crate::providers::Provider;
use crate::providers::google::GoogleTranslate;
use crate::run_log::LogWriter;
use crate::translation::{BatchTranslator, RunReport, TranslationService};

// @module: Application controller for one translation run

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: RunReport,
    /// Where the output document was written
    pub output_path: PathBuf,
    pub elapsed: Duration,
}

/// Main application controller
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Provider client used for the run
    provider: Box<dyn Provider>,
}

impl Controller {
    // @method: Create a controller talking to the configured Google endpoint
    pub fn with_config(config: Config) -> Result<Self> {
        let provider = GoogleTranslate::new(
            config.translation.endpoint.clone(),
            config.translation.timeout(),
        )?;
        Ok(Self::with_provider(config, Box::new(provider)))
    }

    /// Create a controller with an explicit provider
    pub fn with_provider(config: Config, provider: Box<dyn Provider>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate one input file end to end.
    ///
    /// Loading errors abort before anything is written. Per-unit failures
    /// do not fail the run; they are logged, reported and left out of the
    /// output document.
    pub async fn run<P: AsRef<Path>>(self, input_path: P) -> Result<RunSummary> {
        let start_time = Instant::now();
        let run_timestamp = Local::now();
        let input_path = input_path.as_ref();

        let batch = input_loader::load(input_path)?;
        info!("Loaded {} entries from {}", batch.len(), input_path.display());

        let locations = RunLocations::new(&self.config.output.directory, &self.config.log_directory);
        locations.ensure().context("Failed to prepare output and log directories")?;

        let service = TranslationService::from_config(&self.config, self.provider)?;
        info!(
            "{}: {} -> {}",
            service.provider_name(),
            display_language(service.source_language()),
            display_language(service.target_language())
        );
        let translator = BatchTranslator::new(service);

        let progress_bar = ProgressBar::new(batch.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} entries ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let log_writer = LogWriter::new(&locations);
        let report = translator
            .run(batch, &log_writer, run_timestamp, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await;
        progress_bar.finish_and_clear();
        let report = report?;

        let output_path = OutputWriter::new(&locations.output_dir)
            .write(&report.output, &self.config.output.filename)?;

        error_reporter::summarize(&report.failures);

        let elapsed = start_time.elapsed();
        info!(
            "Translated {}, skipped {}, failed {} in {}.",
            report.translated,
            report.skipped,
            report.failures.len(),
            Self::format_duration(elapsed)
        );
        info!("Output: {}", output_path.display());
        info!("Success log: {}", report.success_log_path.display());
        match &report.error_log_path {
            Some(path) => info!("Error log: {}", path.display()),
            None => debug!("No error log written"),
        }

        Ok(RunSummary {
            report,
            output_path,
            elapsed,
        })
    }

    // Format duration in a human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

fn display_language(code: &str) -> String {
    language_utils::get_language_name(code)
        .map(|name| format!("{} ({})", name, code))
        .unwrap_or_else(|_| code.to_string())
}
