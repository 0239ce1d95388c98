use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Why a collector document could not be turned into a metric report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("empty collector output")]
    Empty,

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Failure to run the external collector.
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("failed to start collector `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("collector exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    #[error("collector output is not valid UTF-8")]
    NonUtf8,
}
