//! Task module
//!
//! This module contains the task record and its durable storage.

mod model;
mod repository;
mod sqlite_store;

pub use model::*;
pub use repository::TaskRepository;
pub use sqlite_store::SqliteTaskStore;
