//! Environment-driven configuration, resolved once per process.
//!
//! - `RAINBOWTABLE_LOG_LEVEL`: `trace|debug|info|warn|error`, default `info`,
//!   parsed loosely/case-insensitively; unrecognized values fall back to `info`.
//! - `RAINBOWTABLE_LOG_PATH`: file path for JSONL output; default is stdout.
//! - `RAINBOWTABLE_PLUGIN_DIR`: directory scanned for `hashlib<N>.*` plug-ins;
//!   default is the current working directory.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::log::LogLevel;

/// Resolved configuration for one process run.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: LogLevel,
    pub log_path: Option<PathBuf>,
    pub plugin_dir: PathBuf,
}

impl Config {
    fn from_env() -> Self {
        let log_level = std::env::var("RAINBOWTABLE_LOG_LEVEL")
            .map(|v| parse_log_level_loose(&v))
            .unwrap_or(LogLevel::Info);
        let log_path = std::env::var("RAINBOWTABLE_LOG_PATH").ok().map(PathBuf::from);
        let plugin_dir = std::env::var("RAINBOWTABLE_PLUGIN_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            log_level,
            log_path,
            plugin_dir,
        }
    }
}

/// Parse a log level from string, case-insensitively; unrecognized values
/// fall back to `info` rather than erroring.
#[must_use]
pub fn parse_log_level_loose(s: &str) -> LogLevel {
    match s.to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "warn" | "warning" => LogLevel::Warn,
        "error" | "err" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the process-wide configuration, resolving it from the environment on
/// first call and caching it thereafter.
#[must_use]
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_level_known_values() {
        assert!(matches!(parse_log_level_loose("trace"), LogLevel::Trace));
        assert!(matches!(parse_log_level_loose("DEBUG"), LogLevel::Debug));
        assert!(matches!(parse_log_level_loose("Info"), LogLevel::Info));
        assert!(matches!(parse_log_level_loose("warning"), LogLevel::Warn));
        assert!(matches!(parse_log_level_loose("ERROR"), LogLevel::Error));
    }

    #[test]
    fn parse_log_level_unknown_falls_back_to_info() {
        assert!(matches!(parse_log_level_loose("bogus"), LogLevel::Info));
        assert!(matches!(parse_log_level_loose(""), LogLevel::Info));
    }

    #[test]
    fn config_resolves_without_panicking() {
        let cfg = config();
        assert!(cfg.plugin_dir.as_os_str().len() > 0);
    }
}
