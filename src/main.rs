// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod dispatcher;
mod error_log;
mod errors;
mod extractor;
mod file_utils;
mod language_utils;
mod merger;
mod pipeline;
mod providers;

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

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
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
    /// Translate embedded foreign-script text across a folder tree (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for scriptswap
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Root folder to translate in place
    #[arg(value_name = "ROOT_DIR")]
    root_dir: PathBuf,

    /// Source language code (e.g., 'zh', 'ja', 'ko')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'fr', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation service endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Access key id for the translation service
    #[arg(long, env = "SCRIPTSWAP_ACCESS_KEY_ID", hide_env_values = true)]
    access_key_id: Option<String>,

    /// Access key secret for the translation service
    #[arg(long, env = "SCRIPTSWAP_ACCESS_KEY_SECRET", hide_env_values = true)]
    access_key_secret: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// scriptswap - in-place batch folder translation
///
/// Walks a folder tree, finds embedded foreign-script text fragments in each
/// file, translates every distinct fragment, and rewrites the file with the
/// translations substituted. A file is either fully translated or left
/// exactly as it was found.
#[derive(Parser, Debug)]
#[command(name = "scriptswap")]
#[command(version = "1.0.0")]
#[command(about = "In-place batch translation of embedded foreign-script text")]
#[command(long_about = "scriptswap walks a folder tree, extracts embedded foreign-script text
fragments from each file, translates every distinct fragment and rewrites
the file in place. Each file is all-or-nothing: fully translated, or left
byte-identical to its original.

EXAMPLES:
    scriptswap ./project                         # Translate using default config
    scriptswap -s zh -t en ./project             # Chinese to English
    scriptswap --log-level debug ./project       # Narrate every replacement
    scriptswap completions bash > scriptswap.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically. Provider credentials
    can come from the config file or from SCRIPTSWAP_ACCESS_KEY_ID and
    SCRIPTSWAP_ACCESS_KEY_SECRET environment variables.

FAILURES:
    A file that fails to translate is restored to its original content and
    recorded in the error log (error.log by default); the run continues with
    the next file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Root folder to translate in place
    #[arg(value_name = "ROOT_DIR")]
    root_dir: Option<PathBuf>,

    /// Source language code (e.g., 'zh', 'ja', 'ko')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'fr', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation service endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Access key id for the translation service
    #[arg(long, env = "SCRIPTSWAP_ACCESS_KEY_ID", hide_env_values = true)]
    access_key_id: Option<String>,

    /// Access key secret for the translation service
    #[arg(long, env = "SCRIPTSWAP_ACCESS_KEY_SECRET", hide_env_values = true)]
    access_key_secret: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
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

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "scriptswap", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let root_dir = cli
                .root_dir
                .ok_or_else(|| anyhow!("ROOT_DIR is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                root_dir,
                source_language: cli.source_language,
                target_language: cli.target_language,
                endpoint: cli.endpoint,
                access_key_id: cli.access_key_id,
                access_key_secret: cli.access_key_secret,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config.save_to_file(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(endpoint) = &options.endpoint {
        config.provider.endpoint = endpoint.clone();
    }
    if let Some(access_key_id) = &options.access_key_id {
        config.provider.access_key_id = access_key_id.clone();
    }
    if let Some(access_key_secret) = &options.access_key_secret {
        config.provider.access_key_secret = access_key_secret.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(to_level_filter(&config.log_level));

    let controller = Controller::from_config(config)?;
    controller.run(&options.root_dir).await?;

    Ok(())
}
