use super::paths::expand_path;
use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default bound of the queue between the directory walker and the parser
pub const DEFAULT_QUEUE_CAPACITY: usize = 4;

/// File names tried, in order, when no config file is given explicitly
const DEFAULT_CONFIG_NAMES: [&str; 3] = [".refaudit.toml", ".refaudit.yml", ".refaudit.yaml"];

/// Configuration for an export audit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directories that contain exports
    pub from: Vec<PathBuf>,

    /// Directories under `from` to leave out
    pub exclude_from: Vec<PathBuf>,

    /// Directories that contain imports
    pub to: Vec<PathBuf>,

    /// Directories under `to` to leave out
    pub exclude_to: Vec<PathBuf>,

    /// Report format: json or terminal
    pub format: String,

    /// Write the report here instead of stdout
    pub output: Option<PathBuf>,

    /// Also prune paths matched by .gitignore/.ignore files and hidden entries
    pub respect_ignore_files: bool,

    /// Capacity of the bounded file queue of each pass
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            from: vec![],
            exclude_from: vec![],
            to: vec![],
            exclude_to: vec![],
            format: "json".to_string(),
            output: None,
            respect_ignore_files: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self, AuditError> {
        let contents = std::fs::read_to_string(path).map_err(|e| AuditError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parsed: Result<Config, String> = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
            "toml" => toml::from_str(&contents).map_err(|e| e.to_string()),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents).map_err(|e| e.to_string())
                }
            }
        };

        let config = parsed.map_err(|message| AuditError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(config.normalized())
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(dir: &Path) -> Result<Self, AuditError> {
        for name in &DEFAULT_CONFIG_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// True when there is nothing to audit
    pub fn has_no_roots(&self) -> bool {
        self.from.is_empty() && self.to.is_empty()
    }

    /// Bounded queue capacity, never below one
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity.max(1)
    }

    /// Expand environment variables and make every configured path absolute
    fn normalized(mut self) -> Self {
        for list in [
            &mut self.from,
            &mut self.exclude_from,
            &mut self.to,
            &mut self.exclude_to,
        ] {
            for path in list.iter_mut() {
                *path = expand_path(&path.to_string_lossy());
            }
        }
        self
    }
}
