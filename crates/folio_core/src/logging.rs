//! Rolling file logs for the CMS process.
//!
//! Events are single `key=value` lines (`event=… module=… status=…`) and carry
//! ids, counts and durations only. Content text never reaches the log.
//!
//! # Invariants
//! - At most one backend runs per process.
//! - Repeating `init_logging` with the same level and directory is a no-op;
//!   any other combination is a `Conflict`.
//! - Initialization never panics.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "folio_cms";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// Logging bootstrap failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    InvalidDirectory(String),
    /// Logging is already running with a different setting.
    Conflict {
        setting: &'static str,
        active: String,
        requested: String,
    },
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidDirectory(message) => write!(f, "{message}"),
            Self::Conflict {
                setting,
                active,
                requested,
            } => write!(
                f,
                "logging already runs with {setting} `{active}`, cannot switch to `{requested}`"
            ),
            Self::Backend(message) => write!(f, "log backend failed to start: {message}"),
        }
    }
}

impl Error for LoggingError {}

/// Starts file logging under `log_dir` at `level`.
///
/// # Errors
/// - `UnsupportedLevel` for anything but trace|debug|info|warn(ing)|error.
/// - `InvalidDirectory` when `log_dir` is empty, relative, or not creatable.
/// - `Conflict` when logging already runs with another level or directory.
/// - `Backend` when flexi_logger refuses to start.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    let log_dir = check_log_dir(log_dir.as_ref())?;

    let active = ACTIVE.get_or_try_init(|| start_backend(level, &log_dir))?;
    if active.log_dir != log_dir {
        return Err(LoggingError::Conflict {
            setting: "directory",
            active: active.log_dir.display().to_string(),
            requested: log_dir.display().to_string(),
        });
    }
    if active.level != level {
        return Err(LoggingError::Conflict {
            setting: "level",
            active: level_name(active.level),
            requested: level_name(level),
        });
    }
    Ok(())
}

/// Active `(level, log_dir)`, or `None` before `init_logging` succeeded.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.level, active.log_dir.clone()))
}

/// `debug` in debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_backend(level: LevelFilter, log_dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        LoggingError::InvalidDirectory(format!(
            "cannot create log directory `{}`: {err}",
            log_dir.display()
        ))
    })?;

    let spec = LogSpecification::builder().default(level).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    if PANIC_HOOK.set(()).is_ok() {
        install_panic_hook();
    }

    info!(
        "event=logging_init module=core status=ok level={} log_dir={} version={} os={}",
        level_name(level),
        log_dir.display(),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    Ok(ActiveLogger {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    let normalized = level.trim().to_ascii_lowercase();
    let candidate = if normalized == "warning" {
        "warn"
    } else {
        normalized.as_str()
    };
    match candidate.parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => Err(LoggingError::UnsupportedLevel(normalized)),
        Ok(parsed) => Ok(parsed),
    }
}

fn level_name(level: LevelFilter) -> String {
    level.as_str().to_ascii_lowercase()
}

fn check_log_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    if log_dir.as_os_str().is_empty() {
        return Err(LoggingError::InvalidDirectory(
            "log directory must not be empty".to_string(),
        ));
    }
    if log_dir.is_relative() {
        return Err(LoggingError::InvalidDirectory(format!(
            "log directory must be absolute, got `{}`",
            log_dir.display()
        )));
    }
    Ok(log_dir.to_path_buf())
}

fn install_panic_hook() {
    let chained = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let (location, payload) = describe_panic(info);
        error!("event=panic_captured module=core status=error location={location} payload={payload}");
        chained(info);
    }));
}

// Payloads may echo user content: flatten and cap them.
fn describe_panic(info: &PanicHookInfo<'_>) -> (String, String) {
    let location = match info.location() {
        Some(loc) => format!("{}:{}", loc.file(), loc.line()),
        None => "unknown".to_string(),
    };
    let raw = info
        .payload()
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    (location, single_line(&raw, PANIC_PAYLOAD_LIMIT))
}

fn single_line(value: &str, limit: usize) -> String {
    let flat: String = value
        .chars()
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect();
    if flat.chars().count() <= limit {
        return flat;
    }
    let mut cut: String = flat.chars().take(limit).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::{check_log_dir, init_logging, logging_status, parse_level, single_line, LoggingError};
    use log::LevelFilter;
    use std::path::Path;

    #[test]
    fn parse_level_accepts_names_and_warning_alias() {
        assert_eq!(parse_level(" Debug ").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("WARNING").unwrap(), LevelFilter::Warn);
        assert_eq!(
            parse_level("off"),
            Err(LoggingError::UnsupportedLevel("off".to_string()))
        );
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn check_log_dir_requires_absolute_path() {
        let err = check_log_dir(Path::new("var/log/folio")).unwrap_err();
        assert!(err.to_string().contains("absolute"));
        assert!(check_log_dir(Path::new("")).is_err());
    }

    #[test]
    fn single_line_flattens_and_caps_payload() {
        assert_eq!(single_line("a\nb", 10), "a b");
        let capped = single_line("title\r\nwith a long body", 6);
        assert_eq!(capped, "title ...");
    }

    #[test]
    fn repeated_init_with_same_settings_succeeds_and_changes_conflict() {
        let log_dir = tempfile::tempdir().unwrap();
        let other_dir = tempfile::tempdir().unwrap();

        init_logging("info", log_dir.path()).unwrap();
        init_logging("INFO", log_dir.path()).unwrap();

        assert!(matches!(
            init_logging("debug", log_dir.path()),
            Err(LoggingError::Conflict {
                setting: "level",
                ..
            })
        ));
        assert!(matches!(
            init_logging("info", other_dir.path()),
            Err(LoggingError::Conflict {
                setting: "directory",
                ..
            })
        ));

        let (level, dir) = logging_status().unwrap();
        assert_eq!(level, LevelFilter::Info);
        assert_eq!(dir, log_dir.path());
    }
}
