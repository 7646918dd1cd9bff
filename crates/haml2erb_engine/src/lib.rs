//! haml2erb engine: discovery, remote conversion, outcome classification and
//! persistence for the batch pipeline.
mod convert;
mod discover;
mod persist;
mod pipeline;
mod sink;
mod types;

pub use convert::{ConvertSettings, Converter, Haml2ErbConverter, DEFAULT_ENDPOINT};
pub use discover::{discover, DiscoverError};
pub use persist::{output_path, write_output};
pub use pipeline::{run, PipelineConfig, PipelineError};
pub use sink::{FailureSink, DEFAULT_FAILURE_LOG, RECORD_MARKER};
pub use types::{
    ConversionOutcome, ConvertError, FailureKind, PipelineEvent, ProgressSink, RunSummary,
    SourceItem, Step,
};
