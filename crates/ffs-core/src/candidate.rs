use std::path::{Path, PathBuf};

use serde::Serialize;

/// One file eligible for selection.
///
/// `display_key` is what queries are matched against: the path relative to
/// the listing root, starting with a separator and case-folded when the
/// listing was case-insensitive. `full_path` keeps the original case and
/// identifies the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Candidate {
    pub display_key: String,
    pub full_path: PathBuf,
}

impl Candidate {
    pub fn new(display_key: impl Into<String>, full_path: impl Into<PathBuf>) -> Self {
        Self {
            display_key: display_key.into(),
            full_path: full_path.into(),
        }
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }
}

/// Fold a string the same way for keys and queries.
pub fn fold_case(s: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        s.to_lowercase()
    } else {
        s.to_string()
    }
}
