//! Logging configuration contract.
//!
//! # Responsibility
//! - Describe how the core log backend should be started.
//! - Validate and normalize config values before the backend sees them.
//!
//! # Invariants
//! - `level` resolves to one of `trace|debug|info|warn|error`.
//! - `log_dir` is a non-empty absolute path.
//! - Rotation limits are non-zero.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_MAX_LOG_FILES: usize = 5;

/// Startup options for the rolling file logger.
///
/// Missing fields fall back to [`LoggingConfig::default`] when deserialized,
/// so a caller config only needs to carry `log_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Case-insensitive level name; `warning` is accepted as `warn`.
    pub level: String,
    /// Absolute directory for rotated log files.
    pub log_dir: PathBuf,
    /// Rotate when the active file reaches this size.
    pub max_file_size_bytes: u64,
    /// Number of rotated files kept on disk.
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: PathBuf::new(),
            max_file_size_bytes: DEFAULT_MAX_LOG_FILE_SIZE_BYTES,
            max_files: DEFAULT_MAX_LOG_FILES,
        }
    }
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }

    /// Returns the normalized level name.
    pub fn resolved_level(&self) -> Result<&'static str, String> {
        normalize_level(&self.level)
    }

    /// Returns the validated log directory.
    pub fn resolved_log_dir(&self) -> Result<PathBuf, String> {
        normalize_log_dir(&self.log_dir)
    }

    pub(crate) fn validate_limits(&self) -> Result<(), String> {
        if self.max_file_size_bytes == 0 {
            return Err("max_file_size_bytes must be greater than zero".to_string());
        }
        if self.max_files == 0 {
            return Err("max_files must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, String> {
    let raw = log_dir.to_string_lossy();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}
