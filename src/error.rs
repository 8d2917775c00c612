//! Errors raised while turning an epoch log into a throughput series.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EpochError {
    #[error("cannot read epoch log {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `[Epoch] ` line whose payload is not five comma-separated numbers.
    #[error("malformed epoch record at line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("no epoch records found")]
    EmptyLog,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
