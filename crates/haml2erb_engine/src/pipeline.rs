use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use crate::convert::Converter;
use crate::discover::{discover, DiscoverError};
use crate::persist::{output_path, write_output};
use crate::sink::{FailureSink, DEFAULT_FAILURE_LOG};
use crate::types::{ConversionOutcome, PipelineEvent, ProgressSink, RunSummary, SourceItem, Step};

/// Immutable settings for one run, fixed before any worker starts.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub root: PathBuf,
    pub source_ext: String,
    pub target_ext: String,
    pub worker_count: usize,
    pub remove_sources: bool,
    pub failure_log: PathBuf,
}

impl PipelineConfig {
    /// Defaults for a haml -> erb run: one worker per available core.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            source_ext: "haml".to_string(),
            target_ext: "erb".to_string(),
            worker_count: default_worker_count(),
            remove_sources: false,
            failure_log: PathBuf::from(DEFAULT_FAILURE_LOG),
        }
    }
}

fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),
    #[error("opening failure log {path}: {source}")]
    OpenFailureLog {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Debug, Default, Clone, Copy)]
struct WorkerStats {
    converted: usize,
    unprocessable: usize,
    failed: usize,
}

/// Drive one full run: discover, fan out to a fixed pool of workers, wait for
/// all of them to drain the queue.
///
/// Per-item failures are reported through `progress` and never abort the run;
/// only discovery and failure-log setup are fatal.
pub async fn run(
    config: &PipelineConfig,
    converter: Arc<dyn Converter>,
    progress: Arc<dyn ProgressSink>,
) -> Result<RunSummary, PipelineError> {
    let items = discover(&config.root, &config.source_ext)?;
    let discovered = items.len();

    let failure_sink = Arc::new(FailureSink::open(&config.failure_log).map_err(|source| {
        PipelineError::OpenFailureLog {
            path: config.failure_log.clone(),
            source,
        }
    })?);

    let worker_count = config.worker_count.max(1);
    let (tx, rx) = mpsc::channel::<SourceItem>(worker_count);
    let rx = Arc::new(Mutex::new(rx));

    // Single producer. Dropping the sender closes the channel, which is how
    // every worker observes exhaustion.
    tokio::spawn(async move {
        for item in items {
            if tx.send(item).await.is_err() {
                break;
            }
        }
    });

    let mut workers = JoinSet::new();
    for _ in 0..worker_count {
        let rx = Arc::clone(&rx);
        let converter = Arc::clone(&converter);
        let progress = Arc::clone(&progress);
        let failure_sink = Arc::clone(&failure_sink);
        let config = config.clone();
        workers
            .spawn(async move { worker_loop(rx, converter, progress, failure_sink, config).await });
    }

    // Completion barrier: the run is finished exactly when every worker has
    // returned its stats.
    let mut summary = RunSummary {
        discovered,
        ..RunSummary::default()
    };
    while let Some(joined) = workers.join_next().await {
        let stats = joined?;
        summary.converted += stats.converted;
        summary.unprocessable += stats.unprocessable;
        summary.failed += stats.failed;
    }

    log::info!(
        "run complete: {} discovered, {} converted, {} unprocessable, {} failed",
        summary.discovered,
        summary.converted,
        summary.unprocessable,
        summary.failed
    );
    Ok(summary)
}

async fn worker_loop(
    rx: Arc<Mutex<mpsc::Receiver<SourceItem>>>,
    converter: Arc<dyn Converter>,
    progress: Arc<dyn ProgressSink>,
    failure_sink: Arc<FailureSink>,
    config: PipelineConfig,
) -> WorkerStats {
    let mut stats = WorkerStats::default();
    loop {
        // The lock is held only while waiting for the next item, so each item
        // is delivered to exactly one worker.
        let item = rx.lock().await.recv().await;
        let Some(item) = item else { break };
        process_item(
            item,
            converter.as_ref(),
            progress.as_ref(),
            &failure_sink,
            &config,
            &mut stats,
        )
        .await;
    }
    stats
}

async fn process_item(
    item: SourceItem,
    converter: &dyn Converter,
    progress: &dyn ProgressSink,
    failure_sink: &FailureSink,
    config: &PipelineConfig,
    stats: &mut WorkerStats,
) {
    let path = item.path;

    let haml = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) => {
            progress.emit(PipelineEvent::StepFailed {
                step: Step::Read,
                path,
                message: err.to_string(),
            });
            stats.failed += 1;
            return;
        }
    };
    progress.emit(PipelineEvent::StepOk {
        step: Step::Read,
        path: path.clone(),
    });

    match ConversionOutcome::from(converter.convert(&haml).await) {
        ConversionOutcome::Success { erb } => {
            progress.emit(PipelineEvent::StepOk {
                step: Step::Convert,
                path: path.clone(),
            });

            let target = output_path(&path, &config.target_ext);
            if let Err(err) = write_output(&target, &erb) {
                progress.emit(PipelineEvent::StepFailed {
                    step: Step::Write,
                    path: target,
                    message: err.to_string(),
                });
                stats.failed += 1;
                return;
            }
            progress.emit(PipelineEvent::StepOk {
                step: Step::Write,
                path: target,
            });
            stats.converted += 1;

            if config.remove_sources {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => progress.emit(PipelineEvent::StepOk {
                        step: Step::Remove,
                        path,
                    }),
                    Err(err) => progress.emit(PipelineEvent::StepFailed {
                        step: Step::Remove,
                        path,
                        message: err.to_string(),
                    }),
                }
            }
        }
        ConversionOutcome::Unprocessable { detail } => {
            progress.emit(PipelineEvent::StepFailed {
                step: Step::Convert,
                path: path.clone(),
                message: detail.clone(),
            });
            if let Err(err) = failure_sink.append(&path, &detail) {
                log::error!("appending failure record for {}: {err}", path.display());
            }
            stats.unprocessable += 1;
        }
        ConversionOutcome::Recoverable { error } => {
            progress.emit(PipelineEvent::StepFailed {
                step: Step::Convert,
                path,
                message: error.to_string(),
            });
            stats.failed += 1;
        }
    }
}
