//! Enumerates the files below a root directory as match candidates.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::candidate::{Candidate, fold_case};
use crate::config::Config;
use crate::error::FfsError;
use crate::session::CandidateSource;

/// Glob patterns matched against single file or directory names.
///
/// Patterns use shell wildcards (`*`, `?`, `[...]`, `[!...]`); a backslash
/// is an ordinary character.
#[derive(Debug, Clone)]
pub struct IgnoreList {
    set: GlobSet,
}

impl IgnoreList {
    pub fn new<S: AsRef<str>>(patterns: &[S], case_insensitive: bool) -> Result<Self, FfsError> {
        let mut builder = GlobSetBuilder::new();
        let mut names = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern: &str = pattern.as_ref();
            names.push(pattern);
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .literal_separator(true)
                .backslash_escape(false)
                .build()
                .map_err(|source| FfsError::IgnorePattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| FfsError::IgnoreSet {
            patterns: names.join(", "),
            source,
        })?;
        Ok(Self { set })
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}

/// Result of listing a root directory.
#[derive(Debug, Clone)]
pub struct Listing {
    pub root: PathBuf,
    /// Length of the root path in characters; display keys start right after it.
    pub base_path_len: usize,
    pub candidates: Vec<Candidate>,
}

/// Lists files below a root, pruning ignored names.
#[derive(Debug, Clone)]
pub struct DirectoryLister {
    root: PathBuf,
    ignore: IgnoreList,
    case_insensitive: bool,
}

impl DirectoryLister {
    pub fn new(root: &Path, ignore: IgnoreList, case_insensitive: bool) -> Result<Self, FfsError> {
        if !root.exists() {
            return Err(FfsError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FfsError::NotADirectory(root.to_path_buf()));
        }
        let root = std::path::absolute(root)?;
        Ok(Self {
            root,
            ignore,
            case_insensitive,
        })
    }

    pub fn from_config(root: &Path, config: &Config) -> Result<Self, FfsError> {
        let ignore = IgnoreList::new(config.ignore_list.as_slice(), config.ignore_case)?;
        Self::new(root, ignore, config.ignore_case)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and collect every file that survives the ignore list.
    ///
    /// Ignored directories are not descended into. Entries are visited in
    /// file-name order; unreadable entries are logged and skipped.
    pub fn listing(&self) -> Result<Listing, FfsError> {
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        let mut candidates = Vec::new();
        for entry in walker.filter_entry(|e| self.keep(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            if !is_listable_file(&entry) {
                continue;
            }
            if let Some(candidate) = self.candidate_for(entry.into_path()) {
                candidates.push(candidate);
            }
        }

        debug!(
            root = %self.root.display(),
            count = candidates.len(),
            "listed candidates"
        );

        Ok(Listing {
            base_path_len: self.root.to_string_lossy().chars().count(),
            root: self.root.clone(),
            candidates,
        })
    }

    fn keep(&self, entry: &DirEntry) -> bool {
        // Never prune the root itself
        if entry.depth() == 0 {
            return true;
        }
        !self.ignore.is_ignored(&entry.file_name().to_string_lossy())
    }

    fn candidate_for(&self, full_path: PathBuf) -> Option<Candidate> {
        let relative = full_path.strip_prefix(&self.root).ok()?;
        let key = format!("{MAIN_SEPARATOR}{}", relative.to_string_lossy());
        Some(Candidate {
            display_key: fold_case(&key, self.case_insensitive),
            full_path,
        })
    }
}

/// Regular files, plus symlinks that do not resolve to a directory.
///
/// Dangling symlinks are listed like files.
fn is_listable_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

impl CandidateSource for DirectoryLister {
    fn list(&self) -> Result<Vec<Candidate>, FfsError> {
        Ok(self.listing()?.candidates)
    }
}

/// List the files below `root`, skipping names that match `ignore_patterns`.
pub fn list_candidates<S: AsRef<str>>(
    root: &Path,
    ignore_patterns: &[S],
    case_insensitive: bool,
) -> Result<Listing, FfsError> {
    let ignore = IgnoreList::new(ignore_patterns, case_insensitive)?;
    DirectoryLister::new(root, ignore, case_insensitive)?.listing()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_match_whole_names() {
        let ignore = IgnoreList::new(&["*.pyc", "~*", "CMakeFiles", "file?.o"], false).unwrap();
        assert!(ignore.is_ignored("module.pyc"));
        assert!(ignore.is_ignored("~backup"));
        assert!(ignore.is_ignored("CMakeFiles"));
        assert!(ignore.is_ignored("file1.o"));
        assert!(!ignore.is_ignored("file10.o"));
        assert!(!ignore.is_ignored("module.py"));
    }

    #[test]
    fn character_classes_and_negation() {
        let ignore = IgnoreList::new(&["[ab]*.txt", "[!x]y"], false).unwrap();
        assert!(ignore.is_ignored("a1.txt"));
        assert!(ignore.is_ignored("b.txt"));
        assert!(!ignore.is_ignored("c.txt"));
        assert!(ignore.is_ignored("zy"));
        assert!(!ignore.is_ignored("xy"));
    }

    #[test]
    fn dot_star_matches_hidden_names() {
        let ignore = IgnoreList::new(&[".*"], false).unwrap();
        assert!(ignore.is_ignored(".git"));
        assert!(!ignore.is_ignored("src"));
    }

    #[test]
    fn case_folding_follows_flag() {
        let insensitive = IgnoreList::new(&["*.PYC"], true).unwrap();
        assert!(insensitive.is_ignored("Module.pyc"));

        let sensitive = IgnoreList::new(&["*.PYC"], false).unwrap();
        assert!(!sensitive.is_ignored("Module.pyc"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = IgnoreList::new(&["[unclosed"], false).unwrap_err();
        match err {
            FfsError::IgnorePattern { pattern, .. } => assert_eq!(pattern, "[unclosed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn set_error_names_every_pattern() {
        let source = globset::Glob::new("[").unwrap_err();
        let err = FfsError::IgnoreSet {
            patterns: ["*.o", "build"].join(", "),
            source,
        };
        assert!(err.to_string().starts_with("failed to compile ignore patterns [*.o, build]: "));
    }

    #[test]
    fn empty_list_ignores_nothing() {
        let ignore = IgnoreList::new::<&str>(&[], false).unwrap();
        assert!(!ignore.is_ignored("anything"));
    }
}
