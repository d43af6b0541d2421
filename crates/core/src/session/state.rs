//! Session lifecycle state

use std::fmt;

/// Lifecycle of a task list session
///
/// `Ready` is terminal; storage failures never leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    /// Set for the duration of `load`. `load` holds the session mutably,
    /// so callers never observe it; a front end shows its loading
    /// placeholder for any state that is not `Ready`.
    Loading,
    Ready,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
