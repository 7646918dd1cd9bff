use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Marker line bounding each failure record.
pub const RECORD_MARKER: &str = "============";

/// Well-known failure log filename, created in the working directory.
pub const DEFAULT_FAILURE_LOG: &str = "haml2erb-error.txt";

/// Append-only log of unprocessable conversions, shared across all workers.
///
/// The file is opened once in append mode and never truncated, so successive
/// runs accumulate records. Each record goes out as a single write under the
/// lock; concurrent appends cannot interleave bytes of different records.
#[derive(Debug)]
pub struct FailureSink {
    file: Mutex<File>,
}

impl FailureSink {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Append one record: marker line, source path, failure detail, marker line.
    pub fn append(&self, source: &Path, detail: &str) -> io::Result<()> {
        let record = format!(
            "{marker}\n{path}\n{detail}\n{marker}\n",
            marker = RECORD_MARKER,
            path = source.display(),
            detail = detail,
        );

        let mut file = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(record.as_bytes())?;
        file.flush()
    }
}
