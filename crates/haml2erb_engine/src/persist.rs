use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Derive the output location for a converted source: same directory, same
/// stem, target extension.
pub fn output_path(source: &Path, target_ext: &str) -> PathBuf {
    source.with_extension(target_ext)
}

/// Write `content` to `target` by writing a temp file in the same directory
/// and renaming it over the target. An existing file is replaced; a failed
/// write leaves no partial file behind.
pub fn write_output(target: &Path, content: &str) -> io::Result<()> {
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    if target.exists() {
        fs::remove_file(target)?;
    }
    tmp.persist(target).map_err(|err| err.error)?;
    Ok(())
}
