use crate::error::Result;
use crate::sort::{DEFAULT_SORT_LEN, DEFAULT_VALUE_BOUND};
use crate::structures::stack::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default save file name
pub const DEFAULT_SAVE_PATH: &str = "save_one.dat";

/// Model settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Where `save` writes and `load` reads
    pub save_path: PathBuf,
    /// Starting slot count for stacks and queues
    pub initial_capacity: usize,
    /// How many random values a sorter starts with
    pub sort_len: usize,
    /// Exclusive upper bound of random sorter values
    pub value_bound: i32,
    /// Fixed RNG seed; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            initial_capacity: DEFAULT_CAPACITY,
            sort_len: DEFAULT_SORT_LEN,
            value_bound: DEFAULT_VALUE_BOUND,
            seed: None,
        }
    }
}

impl ModelConfig {
    /// Read settings from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.save_path, PathBuf::from("save_one.dat"));
        assert_eq!(config.initial_capacity, 10);
        assert_eq!(config.sort_len, 10);
        assert_eq!(config.value_bound, 100);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dsviz.json");
        std::fs::write(&path, r#"{"sort_len": 4, "seed": 42}"#).unwrap();

        let config = ModelConfig::from_json_file(&path).unwrap();
        assert_eq!(config.sort_len, 4);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.initial_capacity, 10);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(ModelConfig::from_json_file(&dir.path().join("absent.json")).is_err());
    }
}
