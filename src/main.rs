// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::{AppError, UpdateError};
use crate::export::{ExportEngine, ExportOutcome, ExportRequest, StatusFilter, resolve_language};
use crate::source::file::FileSource;
use crate::store::models::LanguageRecord;
use crate::store::{Repository, StoreConnection};
use crate::update::{UpdateChecker, UpdateRunner};

mod app_config;
mod errors;
mod export;
mod language_utils;
mod source;
mod store;
mod update;

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

fn level_filter(level: app_config::LogLevel) -> LevelFilter {
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
    /// Export stored translations as a gettext PO file on stdout
    Export(ExportArgs),

    /// Check the release source for available translation updates
    Check {
        /// Bypass the cached availability listing
        #[arg(short, long)]
        force: bool,
    },

    /// Download and import available translation updates
    Update {
        /// Restrict the import to these language codes
        #[arg(short, long, value_delimiter = ',')]
        langcode: Vec<String>,

        /// Suppress the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Manage the language registry
    #[command(subcommand)]
    Language(LanguageCommands),

    /// Generate shell completions for locsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum LanguageCommands {
    /// Register a language, or update its registry entry
    Add {
        /// ISO 639 language code (e.g. 'fr', 'de')
        code: String,

        /// Display name; defaults to the ISO 639 English name
        #[arg(short, long)]
        name: Option<String>,

        /// Lock the language against translation and export
        #[arg(short, long)]
        locked: bool,
    },

    /// List registered languages
    List,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Target language code (e.g. 'fr', 'de')
    #[arg(short, long)]
    langcode: Option<String>,

    /// Export a translation template (source strings only)
    #[arg(short, long)]
    template: bool,

    /// Restrict the export to these translation statuses
    /// (not-customized, customized, not-translated)
    #[arg(long = "types", value_delimiter = ',')]
    types: Vec<String>,
}

/// locsync - Translation store synchronization and PO export
///
/// Manages a local translation store, exports gettext PO files, and keeps
/// the store in sync with a translation release source.
#[derive(Parser, Debug)]
#[command(name = "locsync")]
#[command(version = "0.3.0")]
#[command(about = "Translation synchronization and PO export tool")]
#[command(long_about = "locsync manages a local translation store, exports gettext PO files
and imports translation releases from a configured source.

EXAMPLES:
    locsync export --langcode fr > fr.po        # Export French translations
    locsync export --template > project.pot     # Export a translation template
    locsync export -l fr --types customized     # Export customized strings only
    locsync check                               # List available updates (cached)
    locsync check --force                       # Bypass the availability cache
    locsync update                              # Import every available update
    locsync update -l fr,de                     # Import French and German only
    locsync language add fr                     # Register French
    locsync completions bash > locsync.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Translation store database path (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// Custom logger writing colored lines to stderr, keeping stdout free for
// PO output
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let _ = writeln!(stderr, "\x1B[{}m{} {}\x1B[0m", color, now, record.args());
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

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "locsync", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(cmd_log_level.clone().into()));
    }

    let config = load_or_create_config(&cli)?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(config.log_level));
    }

    match cli.command {
        Commands::Export(args) => run_export(&config, args).map_err(anyhow::Error::from),
        Commands::Check { force } => run_check(&config, force)
            .await
            .map_err(anyhow::Error::from),
        Commands::Update { langcode, quiet } => run_update(&config, &langcode, quiet)
            .await
            .map_err(anyhow::Error::from),
        Commands::Language(command) => run_language(&config, command).map_err(anyhow::Error::from),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load the configuration file, creating a default one when missing, and
/// apply command line overrides.
fn load_or_create_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
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

    if let Some(database) = &cli.database {
        config.database_path = Some(database.clone());
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

fn open_repository(config: &Config) -> Result<Repository> {
    let db = match &config.database_path {
        Some(path) => StoreConnection::new(path)?,
        None => StoreConnection::new_default()?,
    };
    Ok(Repository::new(db))
}

fn open_source(config: &Config) -> Result<FileSource, UpdateError> {
    match &config.update.source_path {
        Some(root) => Ok(FileSource::new(root.clone())),
        None => Err(UpdateError::NoSource(
            "set update.source_path in the config file".to_string(),
        )),
    }
}

fn run_export(config: &Config, args: ExportArgs) -> Result<(), AppError> {
    let request = ExportRequest {
        langcode: args.langcode,
        template: args.template,
        types: args.types,
    };

    // Fail fast on conflicting options, before the store is even opened
    request.preflight()?;

    let filter = StatusFilter::from_tokens(&request.types)?;

    let repo = open_repository(config)?;
    let language = resolve_language(
        request.langcode.as_deref(),
        &repo,
        &config.source_language,
        config.translate_english,
    )?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let engine = ExportEngine::new(&repo, &config.project_name);
    match engine.export(language.as_ref(), &filter, &mut out)? {
        ExportOutcome::Exported { entries } => {
            info!("Exported {} string(s)", entries);
        }
        ExportOutcome::NothingToExport => {
            warn!("Nothing to export.");
        }
    }

    Ok(())
}

async fn run_check(config: &Config, force: bool) -> Result<(), AppError> {
    let repo = open_repository(config)?;
    let source = open_source(config)?;

    let checker = UpdateChecker::new(&repo, &source, config.update.ttl_secs);
    let releases = checker.check(force).await?;

    if releases.is_empty() {
        info!("No translation updates available");
        return Ok(());
    }

    info!("{} translation update(s) available:", releases.len());
    for release in &releases {
        info!(
            "  {} {}: version {} ({} strings, checked {})",
            release.project,
            release.langcode,
            release.version,
            release.string_count,
            release.checked_at
        );
    }

    Ok(())
}

async fn run_update(config: &Config, langcodes: &[String], quiet: bool) -> Result<(), AppError> {
    let repo = open_repository(config)?;
    let source = open_source(config)?;

    // Refresh the availability listing first so the import sees current
    // releases; the TTL keeps this cheap when the cache is fresh
    let checker = UpdateChecker::new(&repo, &source, config.update.ttl_secs);
    checker.check(false).await?;

    let mut runner = UpdateRunner::new(&repo, &source, config.update.batch_size);
    if quiet {
        runner = runner.quiet();
    }

    let summary = runner.run(langcodes).await?;
    info!(
        "Imported {} string(s) from {} release(s)",
        summary.imported, summary.releases
    );

    Ok(())
}

fn run_language(config: &Config, command: LanguageCommands) -> Result<(), AppError> {
    let repo = open_repository(config)?;

    match command {
        LanguageCommands::Add { code, name, locked } => {
            let code = language_utils::normalize_langcode(&code)?;
            let name = match name {
                Some(name) => name,
                None => language_utils::display_name(&code)
                    .ok_or_else(|| anyhow!("no display name known for '{}'", code))?,
            };

            let mut language = LanguageRecord::new(code.clone(), name.clone());
            language.locked = locked;
            repo.add_language(&language)?;

            info!("Registered language {} ({})", code, name);
        }
        LanguageCommands::List => {
            let languages = repo.list_languages()?;
            if languages.is_empty() {
                info!("No languages registered");
            }
            for language in languages {
                let status = if language.locked { " [locked]" } else { "" };
                info!("  {}: {}{}", language.code, language.name, status);
            }
        }
    }

    Ok(())
}
