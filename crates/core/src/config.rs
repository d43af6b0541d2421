//! Database location configuration

use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TODO_DB_PATH";
pub const DATA_DIR_ENV: &str = "TODO_DATA_DIR";

const DEFAULT_DATA_DIR: &str = ".todo-data";
const DB_FILE_NAME: &str = "todoapp.db";

/// Where the task database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    pub db_path: PathBuf,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl TodoConfig {
    /// Use the default database file name inside `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_path: data_dir.into().join(DB_FILE_NAME),
        }
    }

    /// Resolve from `TODO_DB_PATH`, falling back to `TODO_DATA_DIR`
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(DB_PATH_ENV).ok(),
            std::env::var(DATA_DIR_ENV).ok(),
        )
    }

    fn from_vars(db_path: Option<String>, data_dir: Option<String>) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty(db_path) {
            return Self {
                db_path: PathBuf::from(path),
            };
        }

        match non_empty(data_dir) {
            Some(dir) => Self::with_data_dir(dir),
            None => Self::default(),
        }
    }
}
