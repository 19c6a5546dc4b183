use std::path::{Path, PathBuf};

use tracing::debug;

/// Walk up from `start` (inclusive) looking for a regular file named `marker`.
/// Returns the first directory that contains one.
pub fn find_project_root(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_file())
        .map(Path::to_path_buf)
}

/// The project root for `start`, or `start` itself if no ancestor has the marker.
pub fn resolve_root(start: &Path, marker: &str) -> PathBuf {
    match find_project_root(start, marker) {
        Some(root) => {
            debug!(root = %root.display(), marker, "found project root");
            root
        }
        None => {
            debug!(start = %start.display(), marker, "no project root marker, using start");
            start.to_path_buf()
        }
    }
}
