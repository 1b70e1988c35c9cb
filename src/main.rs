// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::blob_source::BatchNotification;

mod app_config;
mod app_controller;
mod blob_source;
mod errors;
mod language_utils;
mod pipeline;
mod providers;
mod record_parser;
mod sink;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process a batch of records through the enrichment pipeline (default command)
    Process(ProcessArgs),

    /// Generate shell completions for sentistream
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Input batch file or directory of batch files to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Container of the batch object to fetch (notification mode)
    #[arg(long, requires = "key")]
    container: Option<String>,

    /// Key of the batch object to fetch, possibly percent-encoded (notification mode)
    #[arg(long, requires = "container")]
    key: Option<String>,

    /// Name of the sentiment output stream
    #[arg(long, env = "SENTIMENT_STREAM")]
    sentiment_stream: Option<String>,

    /// Name of the entity output stream
    #[arg(long, env = "ENTITY_STREAM")]
    entity_stream: Option<String>,

    /// Canonical language code to normalize records to (e.g., 'en')
    #[arg(short = 'l', long)]
    canonical_language: Option<String>,

    /// Run against mock collaborators and log the derived records instead of delivering them
    #[arg(long)]
    dry_run: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// sentistream - social-media record enrichment pipeline
///
/// Ingests newline-delimited JSON record batches, normalizes each record to a
/// canonical language, classifies sentiment, extracts entities, and emits the
/// derived records to two downstream streams.
#[derive(Parser, Debug)]
#[command(name = "sentistream")]
#[command(version = "1.0.0")]
#[command(about = "Batch sentiment and entity enrichment for social-media records")]
#[command(long_about = "sentistream runs newline-delimited JSON record batches through a \
translate/classify/extract pipeline and fans the derived records out to two stream sinks.

EXAMPLES:
    sentistream tweets.jsonl                      # Process one local batch file
    sentistream /batches/                         # Process every .jsonl/.ndjson file in a directory
    sentistream --container raw --key 2024/day.jsonl   # Fetch the batch from the object store
    sentistream --dry-run tweets.jsonl            # Exercise the pipeline offline
    sentistream --log-level debug tweets.jsonl    # Verbose per-record logging
    sentistream completions bash > sentistream.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The stream names can also come from the
    SENTIMENT_STREAM and ENTITY_STREAM environment variables.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    process: ProcessArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
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
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "sentistream", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Process(args)) => run_process(args).await,
        // Default behavior - use top-level args when no subcommand is given
        None => run_process(cli.process).await,
    }
}

async fn run_process(options: ProcessArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(stream) = &options.sentiment_stream {
        config.sinks.sentiment_stream = stream.clone();
    }
    if let Some(stream) = &options.entity_stream {
        config.sinks.entity_stream = stream.clone();
    }
    if let Some(lang) = &options.canonical_language {
        config.canonical_language = lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    info!(
        "Normalizing records to {}",
        language_utils::language_name(&config.canonical_language)
            .unwrap_or_else(|_| config.canonical_language.clone())
    );

    // Create controller
    let controller = if options.dry_run {
        info!("Dry run: derived records will be logged, not delivered");
        Controller::dry_run(config)
    } else {
        Controller::with_config(config)?
    };

    // Notification mode: fetch the named object, then process it
    if let (Some(container), Some(key)) = (&options.container, &options.key) {
        let notification = BatchNotification {
            container: container.clone(),
            key: key.clone(),
        };
        let source = controller.blob_source();
        let summary = controller
            .run_notification(source.as_ref(), &notification)
            .await?;
        info!("Done: processed {} records", summary.attempted);
        return Ok(());
    }

    // Local mode: process a batch file or a directory of batch files
    let input_path = options
        .input_path
        .ok_or_else(|| anyhow!("INPUT_PATH is required unless --container/--key are given"))?;

    let summary = if input_path.is_file() {
        controller.run_file(&input_path).await?
    } else if input_path.is_dir() {
        controller.run_folder(&input_path).await?
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    };

    info!("Done: processed {} records", summary.attempted);
    Ok(())
}
