use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::SourceItem;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("no *.{extension} files found under {root}")]
    NoMatches { root: PathBuf, extension: String },
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Recursively collect every regular file under `root` whose extension equals
/// `extension`. The walk is sorted by file name, so the result is
/// deterministic for a given tree. Directories are traversed, never returned.
///
/// An empty result is an error: a run over a tree with nothing to convert is
/// treated as a misconfiguration rather than a silent no-op.
pub fn discover(root: &Path, extension: &str) -> Result<Vec<SourceItem>, DiscoverError> {
    let mut items = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) == Some(extension) {
            items.push(SourceItem {
                path: entry.into_path(),
            });
        }
    }

    if items.is_empty() {
        return Err(DiscoverError::NoMatches {
            root: root.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    log::debug!(
        "discovered {} *.{} files under {}",
        items.len(),
        extension,
        root.display()
    );
    Ok(items)
}
