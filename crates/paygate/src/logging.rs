//! Structured logging bootstrap built on the `tracing` ecosystem.
//!
//! The library itself only emits `tracing` events; binaries embedding it
//! call [`init_logging`] once at startup to install a subscriber.
//!
//! ```no_run
//! use paygate::logging::{init_logging, LogConfig};
//!
//! let _guard = init_logging(&LogConfig::default()).expect("logging init");
//! tracing::info!("gateway client ready");
//! ```

use std::path::PathBuf;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Error type for logging initialization failures.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Failed to create the log file or its directory.
    #[error("failed to create log file: {0}")]
    FileCreation(String),

    /// Failed to install the subscriber (e.g. already initialized).
    #[error("failed to initialize logging: {0}")]
    SubscriberInit(String),

    /// The configuration is invalid.
    #[error("invalid log configuration: {0}")]
    InvalidConfig(String),
}

/// Minimum severity of messages that will be logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Most verbose.
    Trace,
    /// Verbose.
    Debug,
    /// Standard.
    #[default]
    Info,
    /// Quiet.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// The string representation used for the env filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format for interactive use.
    #[default]
    Pretty,
    /// JSON structured format for log aggregation.
    Json,
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Minimum severity to log.
    pub level: LogLevel,

    /// Output format.
    pub format: LogFormat,

    /// Optional log file; when set, logs are written there in addition to
    /// stdout. Parent directories are created as needed.
    pub file_path: Option<PathBuf>,
}

/// Guard that keeps file logging alive and flushes on drop.
///
/// Keep this alive for the duration of the program.
pub struct LogGuard {
    guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

impl std::fmt::Debug for LogGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogGuard")
            .field("has_file_guard", &self.guard.is_some())
            .finish()
    }
}

/// Initialize the logging system.
///
/// # Errors
///
/// Returns [`LogError`] if the log file directory cannot be created or a
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<LogGuard, LogError> {
    let filter = EnvFilter::try_new(config.level.as_str())
        .map_err(|e| LogError::InvalidConfig(e.to_string()))?;

    let (file_writer, guard) = if let Some(ref path) = config.file_path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LogError::FileCreation(format!("{}: {e}", parent.display())))?;
        }

        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LogError::InvalidConfig("invalid log file name".to_string()))?;

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        (Some(non_blocking), Some(guard))
    } else {
        (None, None)
    };

    match config.format {
        LogFormat::Pretty => {
            let stdout_layer = fmt::layer().with_target(true);
            if let Some(writer) = file_writer {
                let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
                tracing_subscriber::registry()
                    .with(filter)
                    .with(stdout_layer)
                    .with(file_layer)
                    .try_init()
                    .map_err(|e| LogError::SubscriberInit(e.to_string()))?;
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(stdout_layer)
                    .try_init()
                    .map_err(|e| LogError::SubscriberInit(e.to_string()))?;
            }
        }
        LogFormat::Json => {
            let stdout_layer = fmt::layer().json().with_target(true);
            if let Some(writer) = file_writer {
                let file_layer = fmt::layer().json().with_writer(writer);
                tracing_subscriber::registry()
                    .with(filter)
                    .with(stdout_layer)
                    .with(file_layer)
                    .try_init()
                    .map_err(|e| LogError::SubscriberInit(e.to_string()))?;
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(stdout_layer)
                    .try_init()
                    .map_err(|e| LogError::SubscriberInit(e.to_string()))?;
            }
        }
    }

    Ok(LogGuard { guard })
}

/// Redact a secret for logging: first 4 and last 4 characters with `***`
/// in between, or `***` outright for short values.
///
/// ```
/// use paygate::logging::redact_sensitive;
///
/// assert_eq!(redact_sensitive("5c9f0a3b2e117c8ddcf654ba"), "5c9f***54ba");
/// assert_eq!(redact_sensitive("short"), "***");
/// ```
#[must_use]
pub fn redact_sensitive(value: &str) -> String {
    const MIN_LENGTH_FOR_PARTIAL: usize = 12;
    const VISIBLE_CHARS: usize = 4;

    let chars: Vec<char> = value.chars().collect();
    if chars.len() < MIN_LENGTH_FOR_PARTIAL {
        return "***".to_string();
    }

    let prefix: String = chars.iter().take(VISIBLE_CHARS).collect();
    let suffix: String = chars.iter().skip(chars.len() - VISIBLE_CHARS).collect();
    format!("{prefix}***{suffix}")
}
