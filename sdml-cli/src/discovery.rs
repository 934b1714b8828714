//! Source file discovery
//!
//! A file path is taken as is. A directory is walked recursively and every file whose
//! extension matches (case-insensitively) is collected, in sorted order.

use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryError {
    NotFound(PathBuf),
    Walk(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NotFound(path) => {
                write!(f, "No such file or directory: {}", path.display())
            }
            DiscoveryError::Walk(msg) => write!(f, "Could not walk source tree: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Source files under `root` with the given extension.
pub fn discover(root: &Path, extension: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::NotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| DiscoveryError::Walk(e.to_string()))?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }
    tracing::debug!(root = %root.display(), count = files.len(), "discovered source files");
    Ok(files)
}

/// Where the structural result of `source` is written.
///
/// `.json` is appended to the source's path relative to `root`; a `root` that is the file
/// itself keeps only the file name.
pub fn output_path(source: &Path, root: &Path, build_dir: &Path) -> PathBuf {
    let relative = match source.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => source
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| source.to_path_buf()),
    };
    let mut name = relative.into_os_string();
    name.push(".json");
    build_dir.join(name)
}
