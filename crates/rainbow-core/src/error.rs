//! Error taxonomy shared by every rainbow-table crate.

use thiserror::Error;

/// Fatal error returned at an operation boundary.
///
/// `LookupResult::NotFound` and an exhausted `crack` are *not* represented
/// here — they are successful outcomes, not errors.
#[derive(Debug, Error)]
pub enum RainbowError {
    #[error("unknown hash function: {0}")]
    UnknownHash(String),

    #[error("bad table name '{0}'")]
    BadTableName(String),

    #[error("bad hex input: {0}")]
    BadHexInput(String),

    #[error("io error during {op}: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("allocation failure")]
    AllocFailure,

    #[error("{} worker(s) failed: {}", .0.len(), summarize(.0))]
    WorkerFailure(Vec<RainbowError>),
}

impl From<std::io::Error> for RainbowError {
    fn from(source: std::io::Error) -> Self {
        RainbowError::Io { op: "unknown", source }
    }
}

impl RainbowError {
    /// Construct an [`RainbowError::Io`] naming the operation that failed.
    #[must_use]
    pub fn io(op: &'static str, source: std::io::Error) -> Self {
        RainbowError::Io { op, source }
    }
}

fn summarize(errors: &[RainbowError]) -> String {
    errors
        .iter()
        .map(std::string::ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_operation() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "nope");
        let err = RainbowError::io("open", source);
        assert!(err.to_string().contains("open"));
    }

    #[test]
    fn worker_failure_summarizes_all() {
        let err = RainbowError::WorkerFailure(vec![
            RainbowError::UnknownHash("x".into()),
            RainbowError::AllocFailure,
        ]);
        let msg = err.to_string();
        assert!(msg.contains("2 worker"));
        assert!(msg.contains("unknown hash"));
    }
}
