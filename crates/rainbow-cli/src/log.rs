//! Structured logging for generation/lookup/crack runs.
//!
//! Provides:
//! - [`LogEntry`]: JSONL log record for one rainbow-table event.
//! - [`LogEmitter`]: writes JSONL lines to a file or stdout.
//! - [`validate_log_line`] / [`validate_log_file`]: schema-check a captured run log.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Canonical structured log entry for one generate/search/crack event.
///
/// Required fields: `timestamp`, `op_id`, `level`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub op_id: String,
    pub level: LogLevel,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_num: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_len: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogEntry {
    #[must_use]
    pub fn new(op_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            op_id: op_id.into(),
            level,
            event: event.into(),
            hash_name: None,
            chain_num: None,
            chain_len: None,
            table_path: None,
            duration_ms: None,
            seed: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_hash_name(mut self, hash_name: impl Into<String>) -> Self {
        self.hash_name = Some(hash_name.into());
        self
    }

    #[must_use]
    pub fn with_chain_params(mut self, chain_num: u64, chain_len: u64) -> Self {
        self.chain_num = Some(chain_num);
        self.chain_len = Some(chain_len);
        self
    }

    #[must_use]
    pub fn with_table_path(mut self, table_path: impl Into<String>) -> Self {
        self.table_path = Some(table_path.into());
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Writes structured JSONL log entries to a file or stdout.
pub struct LogEmitter {
    writer: Box<dyn Write + Send>,
    seq: u64,
    op_id: String,
}

impl LogEmitter {
    /// Create an emitter that appends JSONL to `path`.
    pub fn to_file(path: &Path, op_id: &str) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self {
            writer: Box::new(std::io::BufWriter::new(file)),
            seq: 0,
            op_id: op_id.to_string(),
        })
    }

    /// Create an emitter that writes to stdout.
    #[must_use]
    pub fn to_stdout(op_id: &str) -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
            seq: 0,
            op_id: op_id.to_string(),
        }
    }

    /// Create an emitter that writes to an in-memory buffer, for testing.
    #[must_use]
    pub fn to_buffer(op_id: &str) -> Self {
        Self {
            writer: Box::new(Vec::new()),
            seq: 0,
            op_id: op_id.to_string(),
        }
    }

    /// Emit a minimal entry with auto-generated op_id suffix.
    pub fn emit(&mut self, level: LogLevel, event: &str) -> std::io::Result<LogEntry> {
        self.seq += 1;
        let entry = LogEntry::new(format!("{}::{:04}", self.op_id, self.seq), level, event);
        self.emit_entry(entry.clone())?;
        Ok(entry)
    }

    /// Emit a fully-populated entry as-is.
    pub fn emit_entry(&mut self, entry: LogEntry) -> std::io::Result<()> {
        let line = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

/// A single schema violation found in a log line.
#[derive(Debug)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: field '{}': {}",
            self.line_number, self.field, self.message
        )
    }
}

/// Validate a single JSONL line against the rainbow-table log schema.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            return Err(vec![LogValidationError {
                line_number,
                field: "<json>".to_string(),
                message: format!("invalid JSON: {e}"),
            }])
        }
    };

    let Some(obj) = value.as_object() else {
        return Err(vec![LogValidationError {
            line_number,
            field: "<root>".to_string(),
            message: "expected JSON object".to_string(),
        }]);
    };

    let mut errors = Vec::new();

    for field in ["timestamp", "op_id", "level", "event"] {
        if !obj.contains_key(field) {
            errors.push(LogValidationError {
                line_number,
                field: field.to_string(),
                message: "required field missing".to_string(),
            });
        }
    }

    if let Some(level) = obj.get("level").and_then(|v| v.as_str())
        && !["trace", "debug", "info", "warn", "error"].contains(&level)
    {
        errors.push(LogValidationError {
            line_number,
            field: "level".to_string(),
            message: format!("invalid level: '{level}'"),
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    match serde_json::from_value::<LogEntry>(value) {
        Ok(entry) => Ok(entry),
        Err(e) => Err(vec![LogValidationError {
            line_number,
            field: "<deserialization>".to_string(),
            message: format!("failed to deserialize: {e}"),
        }]),
    }
}

/// Validate an entire JSONL file, returning the line count and any errors.
pub fn validate_log_file(path: &Path) -> Result<(usize, Vec<LogValidationError>), std::io::Error> {
    let content = std::fs::read_to_string(path)?;
    let mut all_errors = Vec::new();
    let mut line_count = 0;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        line_count += 1;
        if let Err(errs) = validate_log_line(line, i + 1) {
            all_errors.extend(errs);
        }
    }

    Ok((line_count, all_errors))
}

fn now_utc() -> String {
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        1970 + secs / 31_557_600,
        (secs % 31_557_600) / 2_629_800 + 1,
        (secs % 2_629_800) / 86400 + 1,
        (secs % 86400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
        millis,
    )
}
