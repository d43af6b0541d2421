//! Task list session
//!
//! Holds the cached task list for one application session and mirrors
//! every confirmed store mutation into it.

use crate::error::Error;
use crate::task::{Task, TaskId, TaskRepository};
use crate::Result;

use super::state::SessionState;

/// View-model bridging a [`TaskRepository`] and the presentation layer
///
/// The cache is only updated after the store confirms an operation, so a
/// failed add or delete leaves the visible list exactly as it was.
pub struct TaskListSession<R: TaskRepository> {
    store: R,
    tasks: Vec<Task>,
    input: Option<String>,
    state: SessionState,
}

impl<R: TaskRepository> TaskListSession<R> {
    /// Create a session over the given store. Nothing is read until [`load`](Self::load).
    pub fn new(store: R) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            input: None,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    /// Cached tasks in the order the store returned them
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Cached tasks sorted by id
    pub fn tasks_for_display(&self) -> Vec<Task> {
        let mut tasks = self.tasks.clone();
        tasks.sort_by_key(|t| t.id);
        tasks
    }

    /// Pending input value
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn set_input(&mut self, input: Option<String>) {
        self.input = input;
    }

    /// Whether the add action is currently available
    pub fn can_add(&self) -> bool {
        self.state.is_ready() && self.input.is_some()
    }

    /// Ensure the table exists and fill the cache from the store
    pub async fn load(&mut self) -> Result<&[Task]> {
        if self.state != SessionState::Uninitialized {
            return Err(Error::InvalidState { state: self.state });
        }

        self.state = SessionState::Loading;
        match self.fetch_all().await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.state = SessionState::Ready;
                tracing::info!("Session loaded with {} tasks", self.tasks.len());
                Ok(&self.tasks)
            }
            Err(e) => {
                tracing::error!("Failed to load tasks: {}", e);
                self.state = SessionState::Uninitialized;
                Err(e)
            }
        }
    }

    /// Discard the cache and rebuild it from the store
    pub async fn reload(&mut self) -> Result<&[Task]> {
        self.ensure_ready()?;

        let tasks = self.store.list_all().await.map_err(|e| {
            tracing::error!("Failed to reload tasks: {}", e);
            e
        })?;
        self.tasks = tasks;
        Ok(&self.tasks)
    }

    /// Add a task with the given text
    ///
    /// `None` is rejected without touching the store and yields `Ok(None)`.
    /// On success the new task is appended to the cache and the pending
    /// input is cleared.
    pub async fn add_task(&mut self, text: Option<&str>) -> Result<Option<Task>> {
        self.ensure_ready()?;

        let Some(text) = text else {
            tracing::debug!("Ignoring add with no input");
            return Ok(None);
        };

        let task = self.store.insert(text).await.map_err(|e| {
            tracing::error!("Failed to add task: {}", e);
            e
        })?;

        self.tasks.push(task.clone());
        self.input = None;
        Ok(Some(task))
    }

    /// Add the pending input as a new task
    pub async fn submit_input(&mut self) -> Result<Option<Task>> {
        let input = self.input.clone();
        self.add_task(input.as_deref()).await
    }

    /// Remove a task by ID
    ///
    /// Returns whether a row was removed. An unknown id is not an error.
    pub async fn remove_task(&mut self, id: TaskId) -> Result<bool> {
        self.ensure_ready()?;

        let removed = self.store.delete(id).await.map_err(|e| {
            tracing::error!("Failed to delete task {}: {}", id, e);
            e
        })?;

        if removed > 0 {
            self.tasks.retain(|t| t.id != id);
        }
        Ok(removed > 0)
    }

    async fn fetch_all(&self) -> Result<Vec<Task>> {
        self.store.initialize().await?;
        self.store.list_all().await
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(Error::InvalidState { state: self.state })
        }
    }
}
