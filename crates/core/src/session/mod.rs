//! Session view-model
//!
//! This module keeps an in-memory copy of the task list in step with the
//! store and exposes the operations the presentation layer drives.

mod state;
mod view_model;

pub use state::SessionState;
pub use view_model::TaskListSession;
