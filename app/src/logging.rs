//! FILENAME: app/src/logging.rs
// PURPOSE: Unified logging for the merged-cells plugin.
// CONTEXT: Every line has the form `seq|level|category|message`. Command
// functions use the macros below; engine code logs through the `log` facade,
// which `init_logger` routes into the same sink.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::Lazy;

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Global sequence counter
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Global log file handle
pub static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Path of the current log file, if one was opened
static LOG_PATH: Lazy<Mutex<Option<PathBuf>>> = Lazy::new(|| Mutex::new(None));

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Open (truncating) the unified log file at `path`.
pub fn init_log_file(path: &Path) -> Result<PathBuf, String> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create log dir at {:?}: {}", dir, e))?;
        }
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| format!("Failed to create log file {:?}: {}", path, e))?;

    let mut log_file = LOG_FILE.lock().map_err(|e| format!("Lock error: {}", e))?;
    *log_file = Some(file);

    if let Ok(mut guard) = LOG_PATH.lock() {
        *guard = Some(path.to_path_buf());
    }

    Ok(path.to_path_buf())
}

/// The path passed to the last successful `init_log_file`.
pub fn get_log_path() -> Option<PathBuf> {
    LOG_PATH.lock().ok().and_then(|guard| guard.clone())
}

/// Where a log line ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    File,
    /// No log file yet; the line went to stderr.
    Console,
}

/// Write a log line in unified format.
/// Lines go to the log file once one is open, to stderr before that.
pub fn write_log(level: &str, category: &str, message: &str) {
    emit(level, category, message);
}

fn emit(level: &str, category: &str, message: &str) -> LogSink {
    let seq = next_seq();
    let line = format!("{}|{}|{}|{}", seq, level, category, message);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            if let Err(e) = writeln!(file, "{}", line) {
                eprintln!("[LOG_ERROR] Failed to write: {}", e);
            }
            let _ = file.flush();
            return LogSink::File;
        }
    }

    eprintln!("{}", line);
    LogSink::Console
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(level: &str, category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(level, category, &message);
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(level: &str, category: &str, func_name: &str, result: &str) {
    let message = if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    };
    write_log(level, category, &message);
}

// ============================================================================
// `log` FACADE BACKEND
// ============================================================================

fn level_code(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}

/// Category for facade records: last segment of the target, upper-cased.
/// `merge_engine::collection` -> `COLLECTION`
fn category_for(target: &str) -> String {
    target.rsplit("::").next().unwrap_or(target).to_uppercase()
}

struct UnifiedLogger;

impl Log for UnifiedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            write_log(
                level_code(record.level()),
                &category_for(record.target()),
                &record.args().to_string(),
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

static LOGGER: UnifiedLogger = UnifiedLogger;

/// Install the unified logger as the `log` backend.
/// Fails if another logger was installed first.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("D", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("I", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("W", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("E", $cat, &format!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter("D", $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter("D", $cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit("D", $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit("D", $cat, $func, &format!($($arg)*))
    };
}

pub use log_debug;
pub use log_enter;
pub use log_error;
pub use log_exit;
pub use log_info;
pub use log_warn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_category_for_target() {
        assert_eq!(category_for("merge_engine::collection"), "COLLECTION");
        assert_eq!(category_for("app_lib"), "APP_LIB");
    }

    #[test]
    fn test_console_only_until_file_is_open() {
        assert_eq!(emit("I", "TEST", "before file"), LogSink::Console);

        let dir = tempfile::tempdir().unwrap();
        init_log_file(&dir.path().join("unit.log")).unwrap();
        assert_eq!(emit("I", "TEST", "after file"), LogSink::File);

        let contents = std::fs::read_to_string(dir.path().join("unit.log")).unwrap();
        assert!(contents.contains("|I|TEST|after file"));
        assert!(!contents.contains("before file"));
    }

    #[test]
    fn test_level_codes() {
        assert_eq!(level_code(Level::Error), "E");
        assert_eq!(level_code(Level::Debug), "D");
    }
}
