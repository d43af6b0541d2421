//! Core library for the to-do list
//!
//! This crate contains the core logic, including:
//! - Task persistence (SQLite-backed store)
//! - The session view-model that keeps an in-memory list in step with the store
//! - Configuration of the database location

pub mod config;
pub mod error;
pub mod session;
pub mod task;

pub use config::TodoConfig;
pub use error::Error;
pub use session::{SessionState, TaskListSession};
pub use task::{SqliteTaskStore, Task, TaskId, TaskRepository};

pub type Result<T> = std::result::Result<T, Error>;
