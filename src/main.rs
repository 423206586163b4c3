// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use json_translator::app_config::{Config, LogLevel};
use json_translator::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for json-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// json-translator - translate the values of a flat JSON document
#[derive(Parser, Debug)]
#[command(name = "json-translator")]
#[command(version)]
#[command(about = "Translate the string values of a key/value JSON file")]
#[command(long_about = "json-translator reads a flat JSON object, translates every string value through Google Translate and writes the result with the same keys and key order.

EXAMPLES:
    json-translator strings.json                  # Translate with the default config (en -> ja)
    json-translator -s en -t fr strings.json      # Translate from English to French
    json-translator -o build/i18n strings.json    # Write the output somewhere else
    json-translator                               # Ask for the input path interactively
    json-translator completions bash > jt.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file to translate; prompted for when omitted
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'ja', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Directory the translated document is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "json-translator", &mut std::io::stdout());
        return Ok(());
    }

    run_translate(cli).await
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let (mut config, created) = Config::load_or_create(&options.config_path)?;
    if created {
        warn!(
            "Config file not found at '{}', created default config.",
            options.config_path.display()
        );
    }

    if let Some(source_language) = options.source_language {
        config.source_language = source_language;
    }
    if let Some(target_language) = options.target_language {
        config.target_language = target_language;
    }
    if let Some(output_dir) = options.output_dir {
        config.output.directory = output_dir;
    }
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let input_path = match options.input_path {
        Some(path) => path,
        None => prompt_for_input_path()?,
    };

    let summary = Controller::with_config(config)?.run(&input_path).await?;
    if !summary.report.failures.is_empty() {
        info!(
            "Rerun with the same input to retry the {} failed entries.",
            summary.report.failures.len()
        );
    }

    Ok(())
}

/// Ask the operator for the input path on stdin
fn prompt_for_input_path() -> Result<PathBuf> {
    print!("Path to the JSON file to translate: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read the input path")?;

    let path = line.trim().trim_matches('"');
    if path.is_empty() {
        return Err(anyhow!("No input path given"));
    }

    Ok(PathBuf::from(path))
}
