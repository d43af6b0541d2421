//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{Task, TaskId};
use crate::Result;

/// Repository interface for the persisted task list
///
/// Every failure is reported as [`crate::Error::StorageUnavailable`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Ensure the backing table exists. Safe to call repeatedly.
    async fn initialize(&self) -> Result<()>;

    /// Get all tasks. No ordering is guaranteed.
    async fn list_all(&self) -> Result<Vec<Task>>;

    /// Store a new task and return it with its assigned id
    async fn insert(&self, text: &str) -> Result<Task>;

    /// Delete a task by ID, returning the number of rows removed (0 or 1)
    async fn delete(&self, id: TaskId) -> Result<usize>;
}
