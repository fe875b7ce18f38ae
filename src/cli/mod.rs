//! Command-line interface for cchistory.
//!
//! The program has a single mode: an interactive browser over the projects
//! and sessions found in the Claude Code data directory.

mod commands;

pub use commands::*;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::menu::{install_signal_handlers, Theme};

/// Claude Code conversation history viewer.
#[derive(Debug, Parser)]
#[command(name = "cchistory")]
#[command(author, version, long_about = None)]
#[command(about = "Interactive CLI tool to browse Claude Code conversation history")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Show version information.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Path to Claude directory (default: ~/.claude).
    #[arg(short = 'd', long, env = "CCHISTORY_CLAUDE_DIR")]
    pub claude_dir: Option<PathBuf>,

    /// Path to custom configuration file.
    #[arg(long, env = "CCHISTORY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn", env = "CCHISTORY_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, default_value = "text", env = "CCHISTORY_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Log output file (default: stderr).
    #[arg(long, env = "CCHISTORY_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Open the log file for appending, falling back to stderr on failure.
fn open_log_file(path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!(
                "Warning: Could not open log file {}: {e}",
                path.display()
            );
            None
        }
    }
}

/// Initialize logging based on CLI options.
///
/// `RUST_LOG` takes precedence over `--log-level`. Terminal output belongs to
/// the menus, so logs go to stderr or to `--log-file`.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_string()));

    let log_file = cli.log_file.as_deref().and_then(open_log_file);
    let ansi = log_file.is_none();
    let writer = match log_file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let result = match cli.log_format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .with_ansi(ansi)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_ansi(ansi).with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Load configuration, preferring an explicit `--config` path.
///
/// Load failures never stop the program; defaults are used instead.
fn load_config(cli: &Cli) -> Config {
    match &cli.config {
        Some(path) => Config::load_from(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config from {}: {}", path.display(), e);
            Config::default()
        }),
        None => Config::load().unwrap_or_else(|e| {
            debug!(error = %e, "Using default configuration");
            Config::default()
        }),
    }
}

/// Parsed arguments together with the configuration they select.
#[derive(Debug)]
pub struct App {
    cli: Cli,
    config: Config,
}

impl App {
    /// Parse the process arguments, start logging and load configuration.
    ///
    /// Exits the process for `--help`, `--version` and usage errors.
    #[must_use]
    pub fn from_args() -> Self {
        let cli = Cli::parse();

        init_logging(&cli);

        let config = load_config(&cli);
        debug!(?config, "Configuration loaded");

        Self::from_parts(cli, config)
    }

    /// Assemble from already-parsed parts.
    #[must_use]
    pub fn from_parts(cli: Cli, config: Config) -> Self {
        Self { cli, config }
    }

    /// Theme honoring `--no-color`, `display.color` and `NO_COLOR`.
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::from_preference(self.config.display.color && !self.cli.no_color)
    }

    /// Run the browser.
    pub fn run(&self) -> Result<()> {
        if let Err(e) = install_signal_handlers() {
            warn!(error = %e, "Continuing without signal handlers");
        }

        commands::browse::run(&self.cli, &self.config, self.theme())
    }
}
