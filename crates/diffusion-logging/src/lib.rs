//! Logging setup for the diffusion simulator
//!
//! Every crate in the workspace instruments itself with `tracing` macros; this
//! crate wires those events to the console and, optionally, a log file.
//!
//! - Console output is compact, pretty or JSON lines and goes to stderr, so it
//!   never interleaves with traces printed on stdout
//! - File output is JSON lines through `tracing-appender`, rolling daily or
//!   hourly or written to a single truncated file
//! - `RUST_LOG` overrides the configured level
//!
//! # Quick Start
//!
//! ```ignore
//! use diffusion_logging::{DiffusionSubscriberBuilder, LogConfig};
//!
//! let _guard = DiffusionSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .init()?;
//! ```

pub mod config;

pub use config::{ConsoleConfig, ConsoleFormat, FileConfig, LogConfig, RotationStrategy};

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log file {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to install global subscriber: {0}")]
    Init(String),
}

/// Builder for configuring and initializing the logging subscriber
#[derive(Debug, Clone, Default)]
pub struct DiffusionSubscriberBuilder {
    config: LogConfig,
}

impl DiffusionSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Set the console line format
    pub fn with_console_format(mut self, format: ConsoleFormat) -> Self {
        self.config.console.format = format;
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Configure file output
    pub fn with_file_output(mut self, config: FileConfig) -> Self {
        self.config.file = Some(config);
        self
    }

    /// The configuration that [`init`](Self::init) will apply
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Initialize the subscriber globally
    ///
    /// The returned guard flushes the file writer on drop and must be kept
    /// alive for as long as file output is wanted. Fails if a global
    /// subscriber has already been installed.
    pub fn init(self) -> Result<Option<WorkerGuard>, LoggingError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.config.filter_directive()));

        let console = &self.config.console;
        let pretty_layer = (console.enabled && console.format == ConsoleFormat::Pretty).then(|| {
            fmt::layer()
                .pretty()
                .with_ansi(console.ansi)
                .with_writer(io::stderr)
        });
        let compact_layer =
            (console.enabled && console.format == ConsoleFormat::Compact).then(|| {
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_ansi(console.ansi)
                    .with_writer(io::stderr)
            });
        let json_layer = (console.enabled && console.format == ConsoleFormat::Json).then(|| {
            fmt::layer()
                .json()
                .flatten_event(true)
                .with_ansi(false)
                .with_writer(io::stderr)
        });

        let (file_layer, guard) = match &self.config.file {
            Some(file_config) => {
                let (writer, guard) = file_writer(file_config)?;
                let layer = fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_ansi(false)
                    .with_writer(writer);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        Registry::default()
            .with(env_filter)
            .with(pretty_layer)
            .with(compact_layer)
            .with(json_layer)
            .with(file_layer)
            .try_init()
            .map_err(|err| LoggingError::Init(err.to_string()))?;

        Ok(guard)
    }
}

/// Open the non-blocking writer for file output
fn file_writer(config: &FileConfig) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    let create_err = |source| LoggingError::FileCreate {
        path: config.directory.clone(),
        source,
    };

    match config.rotation {
        RotationStrategy::Never => {
            fs::create_dir_all(&config.directory).map_err(create_err)?;
            let path = config.single_file_path();
            let file = File::create(&path).map_err(|source| LoggingError::FileCreate {
                path: path.clone(),
                source,
            })?;
            Ok(tracing_appender::non_blocking(file))
        }
        RotationStrategy::Daily | RotationStrategy::Hourly => {
            let rotation = match config.rotation {
                RotationStrategy::Hourly => Rotation::HOURLY,
                _ => Rotation::DAILY,
            };
            let appender = RollingFileAppender::builder()
                .rotation(rotation)
                .filename_prefix(&config.prefix)
                .filename_suffix("log")
                .build(&config.directory)
                .map_err(|err| create_err(io::Error::other(err)))?;
            Ok(tracing_appender::non_blocking(appender))
        }
    }
}

/// Install a test-friendly subscriber, ignoring "already installed" errors
pub fn init_for_tests() {
    let _ = DiffusionSubscriberBuilder::new()
        .with_config(LogConfig::testing())
        .init();
}
