//! REPL configuration from TOML (`[repl]` section)

use super::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show the spinner while the judge is working
    pub show_progress: bool,
    /// Statement history file; `~/` is expanded
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl FileReplConfig {
    /// Resolve `history_file`, expanding a leading `~/` to the home directory.
    pub fn history_path(&self) -> Option<PathBuf> {
        expand_home(self.history_file.as_deref()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_history_by_default() {
        let config = FileReplConfig::default();
        assert!(config.show_progress);
        assert!(config.history_path().is_none());
    }

    #[test]
    fn test_absolute_history_path() {
        let config = FileReplConfig {
            history_file: Some("/tmp/debate-history.txt".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/debate-history.txt"))
        );
    }
}
