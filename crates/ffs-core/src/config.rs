use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::FfsError;
use crate::matcher::{MatchOptions, TrigramScoring};

/// User configuration loaded from `~/.config/ffs/config.toml`.
///
/// All fields have sensible defaults so the config file is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fold case in both path keys and queries before matching.
    #[serde(default = "default_ignore_case")]
    pub ignore_case: bool,
    /// Glob patterns matched against file and directory names. Matching
    /// directories are not descended into.
    #[serde(default = "default_ignore_list")]
    pub ignore_list: Vec<String>,
    /// File whose presence marks the project root.
    #[serde(default = "default_root_marker")]
    pub root_marker: String,
    /// Score three-character queries with the two-character rule.
    #[serde(default)]
    pub legacy_trigram: bool,
}

fn default_ignore_case() -> bool {
    cfg!(windows)
}

fn default_ignore_list() -> Vec<String> {
    [
        ".*",
        "*.bak",
        "~*",
        "*~",
        "*.obj",
        "*.pdb",
        "*.res",
        "*.dll",
        "*.idb",
        "*.exe",
        "*.lib",
        "*.so",
        "*.a",
        "*.pyc",
        "CMakeFiles",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_root_marker() -> String {
    "tags".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_case: default_ignore_case(),
            ignore_list: default_ignore_list(),
            root_marker: default_root_marker(),
            legacy_trigram: false,
        }
    }
}

impl Config {
    /// Load the user config, falling back to defaults if there is none.
    pub fn load() -> Result<Self, FfsError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load a config file from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, FfsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| FfsError::ConfigRead(Box::new(e)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, FfsError> {
        toml::from_str(content).map_err(|e| FfsError::ConfigRead(Box::new(e)))
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ffs").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            case_insensitive: self.ignore_case,
            trigram: if self.legacy_trigram {
                TrigramScoring::Legacy
            } else {
                TrigramScoring::Bracketed
            },
        }
    }
}
