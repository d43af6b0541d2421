//! SQLite-backed task storage implementation
//!
//! Stores tasks in the `taskItems` table of a local database file.

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::model::{Task, TaskId};
use super::repository::TaskRepository;
use crate::{Error, Result};

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS taskItems (id INTEGER PRIMARY KEY AUTOINCREMENT, task TEXT)";
const SELECT_ALL: &str = "SELECT id, task FROM taskItems";
const INSERT_TASK: &str = "INSERT INTO taskItems (task) VALUES (?1)";
const DELETE_TASK: &str = "DELETE FROM taskItems WHERE id = ?1";

/// Task store backed by a single SQLite connection
///
/// All statements go through one mutex, so a reader never observes a row
/// mid-write. Statements run synchronously on the calling task; each one is
/// a short local-disk operation.
pub struct SqliteTaskStore {
    /// Path to the database file, `None` for in-memory databases
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteTaskStore {
    /// Open (or create) the database file at `path`
    ///
    /// Parent directories are created as needed. The table itself is not
    /// created until [`TaskRepository::initialize`] runs.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::StorageUnavailable(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(&path).map_err(|e| {
            Error::StorageUnavailable(format!(
                "Failed to open database {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!("Opened task database at {:?}", path);

        Ok(Self {
            path: Some(path),
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::StorageUnavailable("Database connection lock poisoned".to_string()))
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskStore {
    async fn initialize(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(CREATE_TABLE, [])?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let rows = stmt.query_map([], |row| {
            let id: TaskId = row.get(0)?;
            // The column is nullable; rows written outside this store may
            // hold NULL, which reads back as empty text
            let text: Option<String> = row.get(1)?;
            Ok(Task::new(id, text.unwrap_or_default()))
        })?;

        let tasks = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!("Loaded {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn insert(&self, text: &str) -> Result<Task> {
        let mut conn = self.conn()?;

        // The row only becomes visible once the commit succeeds
        let tx = conn.transaction()?;
        tx.execute(INSERT_TASK, [text])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!("Inserted task {}", id);
        Ok(Task::new(id, text))
    }

    async fn delete(&self, id: TaskId) -> Result<usize> {
        let conn = self.conn()?;
        let removed = conn.execute(DELETE_TASK, [id])?;
        tracing::debug!("Deleted task {} ({} rows)", id, removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    async fn create_test_store() -> (SqliteTaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todoapp.db");
        let store = SqliteTaskStore::open(&path).unwrap();
        store.initialize().await.unwrap();
        (store, temp_dir)
    }

    async fn table_count(store: &SqliteTaskStore) -> i64 {
        let conn = store.conn.lock().unwrap();
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'taskItems'",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let (store, _temp) = create_test_store().await;

        for _ in 0..3 {
            store.initialize().await.unwrap();
        }

        assert_eq!(table_count(&store).await, 1);
    }

    #[tokio::test]
    async fn test_open_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data").join("todoapp.db");

        let store = SqliteTaskStore::open(&path).unwrap();
        store.initialize().await.unwrap();

        assert!(path.exists());
        assert_eq!(store.path(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_open_fails_when_path_is_a_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = SqliteTaskStore::open(temp_dir.path());
        let result = match result {
            Ok(store) => store.initialize().await,
            Err(e) => Err(e),
        };

        match result {
            Err(Error::StorageUnavailable(_)) => {}
            other => panic!("Expected StorageUnavailable error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (store, _temp) = create_test_store().await;

        let tasks = store.list_all().await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let (store, _temp) = create_test_store().await;

        let before = store.list_all().await.unwrap();
        let created = store.insert("Buy milk").await.unwrap();
        let after = store.list_all().await.unwrap();

        assert_eq!(created.text, "Buy milk");
        assert!(!before.contains(&created));
        assert_eq!(after.iter().filter(|t| **t == created).count(), 1);
        assert_eq!(after.len(), before.len() + 1);
    }

    #[tokio::test]
    async fn test_insert_accepts_any_text() {
        let (store, _temp) = create_test_store().await;

        let empty = store.insert("").await.unwrap();
        let quoted = store.insert("it's \"quoted\"; DROP TABLE taskItems").await.unwrap();
        let unicode = store.insert("café ☕").await.unwrap();
        let duplicate = store.insert("café ☕").await.unwrap();

        let tasks: HashSet<Task> = store.list_all().await.unwrap().into_iter().collect();
        assert_eq!(tasks.len(), 4);
        assert!(tasks.contains(&empty));
        assert!(tasks.contains(&quoted));
        assert!(tasks.contains(&unicode));
        assert!(tasks.contains(&duplicate));
        assert_ne!(unicode.id, duplicate.id);
    }

    #[tokio::test]
    async fn test_ids_increase() {
        let (store, _temp) = create_test_store().await;

        let first = store.insert("Buy milk").await.unwrap();
        let second = store.insert("Walk dog").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let (store, _temp) = create_test_store().await;

        let task = store.insert("Task to delete").await.unwrap();

        let removed = store.delete(task.id).await.unwrap();
        assert_eq!(removed, 1);

        let tasks = store.list_all().await.unwrap();
        assert!(tasks.iter().all(|t| t.id != task.id));

        // Delete again should remove nothing
        let removed_again = store.delete(task.id).await.unwrap();
        assert_eq!(removed_again, 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let (store, _temp) = create_test_store().await;
        store.insert("Keep me").await.unwrap();

        assert_eq!(store.delete(42).await.unwrap(), 0);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_never_reused() {
        let (store, _temp) = create_test_store().await;

        store.insert("One").await.unwrap();
        let second = store.insert("Two").await.unwrap();
        store.delete(second.id).await.unwrap();

        let third = store.insert("Three").await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_insert_before_initialize_fails() {
        let store = SqliteTaskStore::open_in_memory().unwrap();

        let result = store.insert("Too early").await;
        match result {
            Err(Error::StorageUnavailable(_)) => {}
            other => panic!("Expected StorageUnavailable error, got: {:?}", other),
        }

        // Nothing partial is left behind
        store.initialize().await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_row() {
        let (store, temp_dir) = create_test_store().await;
        let existing = store.insert("Already here").await.unwrap();
        let path = temp_dir.path().join("todoapp.db");

        let read_only = SqliteTaskStore {
            path: Some(path.clone()),
            conn: Mutex::new(
                Connection::open_with_flags(&path, rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY)
                    .unwrap(),
            ),
        };

        let result = read_only.insert("Never stored").await;
        match result {
            Err(Error::StorageUnavailable(_)) => {}
            other => panic!("Expected StorageUnavailable error, got: {:?}", other),
        }

        assert_eq!(read_only.list_all().await.unwrap(), vec![existing.clone()]);
        assert_eq!(store.list_all().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_null_text_reads_as_empty() {
        let (store, _temp) = create_test_store().await;
        store
            .conn
            .lock()
            .unwrap()
            .execute("INSERT INTO taskItems (task) VALUES (NULL)", [])
            .unwrap();

        let tasks = store.list_all().await.unwrap();
        assert_eq!(tasks, vec![Task::new(1, "")]);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = SqliteTaskStore::open_in_memory().unwrap();
        store.initialize().await.unwrap();

        let task = store.insert("Ephemeral").await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), vec![task]);
        assert!(store.path().is_none());
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todoapp.db");

        let task;

        // Create store and add task
        {
            let store = SqliteTaskStore::open(&path).unwrap();
            store.initialize().await.unwrap();
            task = store.insert("Persistent task").await.unwrap();
        }

        // Reopen and verify data persisted
        {
            let store = SqliteTaskStore::open(&path).unwrap();
            store.initialize().await.unwrap();
            let tasks = store.list_all().await.unwrap();
            assert_eq!(tasks, vec![task]);
        }
    }
}
