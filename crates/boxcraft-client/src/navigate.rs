use std::sync::{Mutex, PoisonError};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Forces the application onto another screen.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator for environments without a location bar (server rendering, native tools).
/// Remembers where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        tracing::debug!("navigate to {path}");
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
