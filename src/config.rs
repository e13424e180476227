use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Optional settings read from `<config_dir>/taskflow/config.toml`. A
/// missing file yields the defaults; a malformed one is a startup error.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_path: Option<PathBuf>,
    pub show_archived: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Where the database lives: the configured override, or
    /// `<data_dir>/taskflow/taskflow.db`.
    pub fn database_file(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskflow")
            .join("taskflow.db")
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskflow").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.database_path.is_none());
        assert!(!config.show_archived);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database_path = \"/tmp/tasks.db\"\nshow_archived = true\n")
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/tasks.db")));
        assert!(config.show_archived);
        assert_eq!(config.database_file(), PathBuf::from("/tmp/tasks.db"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "show_archived = \"definitely\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
