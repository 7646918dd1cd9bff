use std::fmt;
use std::path::PathBuf;

/// One discovered input artifact. Handed to exactly one worker, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ConvertError {
    pub kind: FailureKind,
    pub message: String,
}

impl ConvertError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedResponse,
    Unprocessable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Unprocessable => write!(f, "unprocessable input"),
        }
    }
}

/// Classified result of one conversion attempt.
///
/// `Unprocessable` is a content-level rejection by the service and routes to
/// the failure sink; `Recoverable` covers transport-level trouble (network,
/// status, undecodable body) and only produces a console error line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Success { erb: String },
    Recoverable { error: ConvertError },
    Unprocessable { detail: String },
}

impl From<Result<String, ConvertError>> for ConversionOutcome {
    fn from(result: Result<String, ConvertError>) -> Self {
        match result {
            Ok(erb) => ConversionOutcome::Success { erb },
            Err(error) if error.kind == FailureKind::Unprocessable => {
                ConversionOutcome::Unprocessable {
                    detail: error.message,
                }
            }
            Err(error) => ConversionOutcome::Recoverable { error },
        }
    }
}

/// Per-item processing steps, one progress event each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Read,
    Convert,
    Write,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    StepOk {
        step: Step,
        path: PathBuf,
    },
    StepFailed {
        step: Step,
        path: PathBuf,
        message: String,
    },
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

/// Counters for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    pub converted: usize,
    pub unprocessable: usize,
    pub failed: usize,
}
