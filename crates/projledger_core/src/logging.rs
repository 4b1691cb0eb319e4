//! Core logging bootstrap.
//!
//! # Responsibility
//! - Initialize rolling file logs exactly once per process.
//! - Keep log lines metadata-only (`event=... module=... status=...`).
//!
//! # Invariants
//! - Re-initialization with the same config is a no-op.
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, LogSpecification, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Once;

const LOG_FILE_BASENAME: &str = "projledger";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const PANIC_MESSAGE_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

struct ActiveLogger {
    config: LoggingConfig,
    _handle: LoggerHandle,
}

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: LevelFilter,
    log_dir: PathBuf,
    /// Mirror warnings and errors to stderr (CLI use).
    pub echo_warnings: bool,
}

impl LoggingConfig {
    /// Parses `level` and validates `log_dir`.
    ///
    /// # Errors
    /// - `UnsupportedLevel` when `level` is not `trace|debug|info|warn|error`.
    /// - `InvalidDirectory` when `log_dir` is blank or relative.
    pub fn new(level: &str, log_dir: impl Into<PathBuf>) -> Result<Self, LoggingError> {
        Ok(Self {
            level: Self::parse_level(level)?,
            log_dir: Self::absolute_dir(log_dir.into())?,
            echo_warnings: false,
        })
    }

    pub fn with_echo_warnings(mut self, echo: bool) -> Self {
        self.echo_warnings = echo;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
        let trimmed = raw.trim();
        let name = if trimmed.eq_ignore_ascii_case("warning") {
            "warn"
        } else {
            trimmed
        };
        match LevelFilter::from_str(name) {
            Ok(LevelFilter::Off) | Err(_) => {
                Err(LoggingError::UnsupportedLevel(trimmed.to_string()))
            }
            Ok(level) => Ok(level),
        }
    }

    fn absolute_dir(path: PathBuf) -> Result<PathBuf, LoggingError> {
        let path = match path.to_str() {
            Some(raw) => PathBuf::from(raw.trim()),
            None => path,
        };
        if path.as_os_str().is_empty() {
            Err(LoggingError::InvalidDirectory("path must not be empty".to_string()))
        } else if path.is_relative() {
            Err(LoggingError::InvalidDirectory(format!(
                "path must be absolute, got `{}`",
                path.display()
            )))
        } else {
            Ok(path)
        }
    }

    fn label(&self) -> String {
        format!("{}@{}", self.level, self.log_dir.display())
    }
}

/// Logging bootstrap failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    InvalidDirectory(String),
    /// Logging is already active with a different level or directory.
    Conflict {
        active: String,
        requested: String,
    },
    /// Directory creation or logger backend start failed.
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidDirectory(message) => write!(f, "invalid log directory: {message}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already initialized with `{active}`; refusing to switch to `{requested}`"
            ),
            Self::Backend(message) => write!(f, "logger backend failed: {message}"),
        }
    }
}

impl Error for LoggingError {}

/// Initializes core logging from raw level and directory strings.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    init_logging_with(LoggingConfig::new(level, log_dir)?)
}

/// Initializes core logging from a validated config.
///
/// Idempotent for an identical level and directory.
pub fn init_logging_with(config: LoggingConfig) -> Result<(), LoggingError> {
    let active = ACTIVE.get_or_try_init(|| start_logger(config.clone()))?;
    if active.config.level == config.level && active.config.log_dir == config.log_dir {
        Ok(())
    } else {
        Err(LoggingError::Conflict {
            active: active.config.label(),
            requested: config.label(),
        })
    }
}

/// Returns the active level and directory, if logging was started.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.config.level, active.config.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: LoggingConfig) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&config.log_dir).map_err(|err| {
        LoggingError::Backend(format!(
            "failed to create `{}`: {err}",
            config.log_dir.display()
        ))
    })?;

    let spec = LogSpecification::builder().default(config.level).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .duplicate_to_stderr(if config.echo_warnings {
            Duplicate::Warn
        } else {
            Duplicate::None
        })
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic| {
            let location = panic.location().map_or_else(
                || "unknown".to_string(),
                |loc| format!("{}:{}", loc.file(), loc.line()),
            );
            error!(
                "event=panic_captured module=core status=error location={} payload={}",
                location,
                flatten_for_log(panic_message(panic.payload()), PANIC_MESSAGE_LIMIT)
            );
            previous(panic);
        }));
    });

    info!(
        "event=logging_ready module=core status=ok level={} log_dir={} version={}",
        config.level,
        config.log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        config,
        _handle: handle,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Collapses control characters to spaces and caps the result at `limit` chars.
fn flatten_for_log(text: &str, limit: usize) -> String {
    let mut chars = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c });
    let mut flat: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        flat.push_str("...");
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::{
        flatten_for_log, init_logging, logging_status, panic_message, LoggingConfig, LoggingError,
    };
    use log::LevelFilter;

    #[test]
    fn config_accepts_level_aliases_in_any_case() {
        let config = LoggingConfig::new(" WARNING ", "/tmp/projledger").expect("valid config");
        assert_eq!(config.level(), LevelFilter::Warn);
        let config = LoggingConfig::new("Trace", "/tmp/projledger").expect("valid config");
        assert_eq!(config.level(), LevelFilter::Trace);
    }

    #[test]
    fn config_rejects_relative_directory() {
        let err = LoggingConfig::new("info", "logs/dev").expect_err("relative dir must fail");
        assert!(matches!(err, LoggingError::InvalidDirectory(_)));
        let err = LoggingConfig::new("info", "   ").expect_err("blank dir must fail");
        assert!(matches!(err, LoggingError::InvalidDirectory(_)));
    }

    #[test]
    fn config_rejects_unknown_and_off_levels() {
        let err = LoggingConfig::new("loud", "/tmp/projledger").expect_err("unknown level");
        assert_eq!(err, LoggingError::UnsupportedLevel("loud".to_string()));
        let err = LoggingConfig::new("off", "/tmp/projledger").expect_err("off is not a level");
        assert_eq!(err, LoggingError::UnsupportedLevel("off".to_string()));
    }

    #[test]
    fn panic_payloads_resolve_to_text() {
        let owned: Box<dyn std::any::Any + Send> = Box::new("boom".to_string());
        assert_eq!(panic_message(owned.as_ref()), "boom");
        let other: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn panic_messages_are_flattened_and_capped() {
        assert_eq!(flatten_for_log("line1\nline2\rline3", 8), "line1 li...");
        assert_eq!(flatten_for_log("short", 8), "short");
        assert_eq!(flatten_for_log("exactly8", 8), "exactly8");
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let base = tempfile::tempdir().expect("temp dir");
        let first = base.path().join("first");
        let first_dir = first.to_str().expect("utf-8 path").to_string();
        let second_dir = base.path().join("second").to_str().expect("utf-8 path").to_string();

        init_logging("info", &first_dir).expect("first init should succeed");
        init_logging("info", &first_dir).expect("same config should be idempotent");

        let level_err = init_logging("debug", &first_dir).expect_err("level conflict");
        assert!(matches!(level_err, LoggingError::Conflict { .. }));
        let dir_err = init_logging("info", &second_dir).expect_err("directory conflict");
        assert!(matches!(dir_err, LoggingError::Conflict { .. }));

        let (level, dir) = logging_status().expect("logging should be active");
        assert_eq!(level, LevelFilter::Info);
        assert_eq!(dir, first);
    }
}
